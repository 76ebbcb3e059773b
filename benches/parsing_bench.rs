use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rphonenum::{testdata, PhoneNumberUtil};

type TestEntity = (&'static str, &'static str);

/// A varied input set gives a more honest picture than a single number:
/// national and international notation, national prefixes, vanity letters,
/// extensions and a number that is not valid at all.
fn setup_parsing_data() -> Vec<TestEntity> {
    vec![
        ("0011 54 9 3435 55 1212 ext. 1234", "AU"),
        ("(650) 253-0000", "US"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("0343 15 555 1212", "AR"),
        ("02 3661 8300", "IT"),
        ("1-800-FLOWERS", "US"),
        ("12345", "DE"),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new_for_metadata(testdata::test_metadata_collection());
    let numbers_to_parse = setup_parsing_data();

    let mut group = c.benchmark_group("Parsing");

    group.bench_function("parse()", |b| {
        b.iter(|| {
            for (number_str, region) in &numbers_to_parse {
                let _ = phone_util.parse(black_box(number_str), black_box(region));
            }
        })
    });

    group.bench_function("parse_and_keep_raw_input()", |b| {
        b.iter(|| {
            for (number_str, region) in &numbers_to_parse {
                let _ =
                    phone_util.parse_and_keep_raw_input(black_box(number_str), black_box(region));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
