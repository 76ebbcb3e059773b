// Copyright (C) 2009 The Libphonenumber Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small hand-maintained metadata set for tests and benchmarks.
//!
//! The numbering plans here are deliberately simplified versions of the real
//! ones; they are stable, so expected strings in tests never change under a
//! metadata update. Formatting rules are stored in their compiled form: the
//! national prefix is already substituted into the rules, only `$CC` is left
//! for runtime replacement.

use super::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc};

fn desc(pattern: &str, example: &str, lengths: &[i32]) -> PhoneNumberDesc {
    let mut desc = PhoneNumberDesc::new();
    desc.set_national_number_pattern(pattern);
    if !example.is_empty() {
        desc.set_example_number(example);
    }
    desc.possible_length = lengths.to_vec();
    desc
}

fn desc_with_local(
    pattern: &str,
    example: &str,
    lengths: &[i32],
    local_only: &[i32],
) -> PhoneNumberDesc {
    let mut desc = desc(pattern, example, lengths);
    desc.possible_length_local_only = local_only.to_vec();
    desc
}

fn fmt(pattern: &str, format: &str, leading_digits: &[&str]) -> NumberFormat {
    let mut number_format = NumberFormat::new();
    number_format.set_pattern(pattern);
    number_format.set_format(format);
    number_format.leading_digits_pattern = leading_digits
        .iter()
        .map(|pattern| pattern.to_string())
        .collect();
    number_format
}

fn fmt_with_rule(
    pattern: &str,
    format: &str,
    leading_digits: &[&str],
    national_prefix_formatting_rule: &str,
) -> NumberFormat {
    let mut number_format = fmt(pattern, format, leading_digits);
    number_format.set_national_prefix_formatting_rule(national_prefix_formatting_rule);
    number_format
}

fn region(id: &str, country_code: i32, international_prefix: &str) -> PhoneMetadata {
    let mut metadata = PhoneMetadata::new();
    metadata.set_id(id);
    metadata.set_country_code(country_code);
    metadata.set_international_prefix(international_prefix);
    metadata
}

fn us() -> PhoneMetadata {
    let mut metadata = region("US", 1, "011");
    metadata.set_main_country_for_code(true);
    metadata.set_national_prefix("1");
    metadata.set_national_prefix_for_parsing("1");
    metadata.set_preferred_extn_prefix(" extn. ");
    metadata.general_desc = Some(desc_with_local(
        "[13-689]\\d{9}|2[0-35-9]\\d{8}",
        "",
        &[10],
        &[7],
    ));
    metadata.fixed_line = Some(desc_with_local(
        "[13-689]\\d{9}|2[0-35-9]\\d{8}",
        "6502530000",
        &[10],
        &[7],
    ));
    metadata.mobile = Some(desc_with_local(
        "[13-689]\\d{9}|2[0-35-9]\\d{8}",
        "6502530001",
        &[10],
        &[7],
    ));
    metadata.toll_free = Some(desc("8(?:00|66|77|88)\\d{7}", "8004567890", &[10]));
    metadata.premium_rate = Some(desc("900\\d{7}", "9004567890", &[10]));
    metadata.no_international_dialling = Some(desc("800\\d{7}", "", &[10]));
    metadata.number_format = vec![
        fmt("(\\d{3})(\\d{4})", "$1 $2", &[]),
        fmt("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &[]),
    ];
    metadata
}

fn ca() -> PhoneMetadata {
    let mut metadata = region("CA", 1, "011");
    metadata.set_national_prefix("1");
    metadata.set_national_prefix_for_parsing("1");
    // 242 belongs to BS; keep it out of the CA catch-all.
    let ca_pattern = "(?:2(?:[0-35-9]\\d|4[0-13-9])|[3-9]\\d{2})\\d{7}";
    metadata.general_desc = Some(desc(ca_pattern, "", &[10]));
    metadata.fixed_line = Some(desc(ca_pattern, "6042345678", &[10]));
    metadata.mobile = Some(desc(ca_pattern, "6042345679", &[10]));
    metadata
}

fn bs() -> PhoneMetadata {
    let mut metadata = region("BS", 1, "011");
    metadata.set_national_prefix("1");
    metadata.set_national_prefix_for_parsing("1");
    metadata.general_desc = Some(desc_with_local(
        "(?:242|8(?:00|66|77|88))\\d{7}",
        "",
        &[10],
        &[7],
    ));
    metadata.fixed_line = Some(desc(
        "242(?:3(?:02|[236][1-9]|4[0-24-9]|5[0-68]|7[347]|8[0-4]|9[2-467])|461|502|636|702)\\d{4}",
        "2423651234",
        &[10],
    ));
    metadata.mobile = Some(desc("242(?:357|359|457|557)\\d{4}", "2423591234", &[10]));
    metadata.toll_free = Some(desc("8(?:00|66|77|88)\\d{7}", "8004567890", &[10]));
    metadata
}

fn gb() -> PhoneMetadata {
    let mut metadata = region("GB", 44, "00");
    metadata.set_main_country_for_code(true);
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.set_mobile_number_portable_region(true);
    metadata.general_desc = Some(desc_with_local("\\d{10}", "", &[10], &[7]));
    metadata.fixed_line = Some(desc("[1-6]\\d{9}", "2012345678", &[10]));
    metadata.mobile = Some(desc("7[1-57-9]\\d{8}", "7912345678", &[10]));
    metadata.toll_free = Some(desc("80\\d{8}", "8012345678", &[10]));
    metadata.premium_rate = Some(desc("9[018]\\d{8}", "9012345678", &[10]));
    metadata.shared_cost = Some(desc("8(?:4[2-5]|7[0-3])\\d{7}", "8431234567", &[10]));
    metadata.personal_number = Some(desc("70\\d{8}", "7012345678", &[10]));
    metadata.pager = Some(desc("76\\d{8}", "7612345678", &[10]));
    metadata.number_format = vec![
        fmt_with_rule(
            "(\\d{2})(\\d{4})(\\d{4})",
            "$1 $2 $3",
            &["[1-59]|[78]0"],
            "(0$1)",
        ),
        fmt_with_rule(
            "(\\d{4})(\\d{3})(\\d{3})",
            "$1 $2 $3",
            &["[78][1-9]"],
            "(0$1)",
        ),
    ];
    metadata
}

fn de() -> PhoneMetadata {
    let mut metadata = region("DE", 49, "00");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc_with_local(
        "[1-9]\\d{3,14}",
        "",
        &[4, 5, 6, 7, 8, 9, 10, 11],
        &[2, 3],
    ));
    metadata.fixed_line = Some(desc_with_local(
        "(?:[24-6]\\d{2}|3[03-9]\\d|[789](?:0[2-9]|[1-9]\\d))\\d{1,8}",
        "30123456",
        &[4, 5, 6, 7, 8, 9, 10, 11],
        &[2, 3],
    ));
    metadata.mobile = Some(desc("1(?:5\\d{9}|7\\d{8})", "15123456789", &[10, 11]));
    metadata.toll_free = Some(desc("800\\d{7}", "8001234567", &[10]));
    metadata.premium_rate = Some(desc("900([135]\\d{6}|9\\d{7})", "9001654321", &[10, 11]));
    metadata.number_format = vec![
        fmt_with_rule("(\\d{3})(\\d{3,4})(\\d{4})", "$1 $2 $3", &["900"], "0$1"),
        fmt_with_rule("(\\d{2})(\\d{3,11})", "$1/$2", &["3[02]|40|[68]9"], "0$1"),
        fmt_with_rule("(\\d{3})(\\d{3,11})", "$1/$2", &["[24-9]|3[3-9]"], "0$1"),
        fmt_with_rule("(\\d{4})(\\d{7})", "$1 $2", &["15"], "0$1"),
    ];
    metadata
}

fn it() -> PhoneMetadata {
    let mut metadata = region("IT", 39, "00");
    metadata.set_leading_zero_possible(true);
    metadata.general_desc = Some(desc("[038]\\d{5,10}", "", &[6, 7, 8, 9, 10, 11]));
    metadata.fixed_line = Some(desc("0\\d{9}", "0236618300", &[10]));
    metadata.mobile = Some(desc("3\\d{8}", "312345678", &[9]));
    metadata.number_format = vec![
        fmt("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["0[26]"]),
        fmt("(\\d{3})(\\d{3})(\\d{3})", "$1 $2 $3", &["3"]),
    ];
    metadata
}

fn nz() -> PhoneMetadata {
    let mut metadata = region("NZ", 64, "00");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[289]\\d{7,9}|[3-7]\\d{7}", "", &[8, 9, 10]));
    metadata.fixed_line = Some(desc(
        "24099\\d{3}|(?:3[2-79]|[49][2-9]|6[235-9]|7[2-57-9])\\d{6}",
        "33316005",
        &[8],
    ));
    metadata.mobile = Some(desc(
        "2(?:[027]\\d{7}|9\\d{6,7}|1(?:0\\d{5,7}|[12]\\d{5,6}|[3-9]\\d{5}))",
        "21123456",
        &[8, 9, 10],
    ));
    metadata.toll_free = Some(desc("800\\d{6,7}", "800123456", &[9, 10]));
    metadata.premium_rate = Some(desc("900\\d{5,7}", "900123456", &[8, 9, 10]));
    metadata.number_format = vec![
        fmt_with_rule("(\\d)(\\d{3})(\\d{4})", "$1-$2 $3", &["24|[34679]"], "0$1"),
        fmt_with_rule(
            "(\\d{3})(\\d{3})(\\d{2,5})",
            "$1 $2 $3",
            &["2[0-79]|9|80"],
            "0$1",
        ),
    ];
    metadata
}

fn pl() -> PhoneMetadata {
    let mut metadata = region("PL", 48, "00");
    metadata.general_desc = Some(desc("[1-9]\\d{8}", "", &[9]));
    metadata.fixed_line = Some(desc("[1-8]\\d{8}", "221234567", &[9]));
    metadata.mobile = Some(desc(
        "(?:5[0137]|6[069]|7[2389]|88)\\d{7}",
        "881234567",
        &[9],
    ));
    metadata.number_format = vec![fmt(
        "(\\d{2})(\\d{3})(\\d{2})(\\d{2})",
        "$1 $2 $3 $4",
        &[],
    )];
    metadata
}

fn by() -> PhoneMetadata {
    let mut metadata = region("BY", 375, "810");
    metadata.set_national_prefix("8");
    metadata.set_national_prefix_for_parsing("8");
    metadata.general_desc = Some(desc("[1-9]\\d{5,9}", "", &[6, 7, 8, 9, 10]));
    metadata.fixed_line = Some(desc("[1-9]\\d{5,9}", "123456", &[6, 7, 8, 9, 10]));
    metadata
}

fn hu() -> PhoneMetadata {
    let mut metadata = region("HU", 36, "00");
    metadata.set_national_prefix("06");
    metadata.set_national_prefix_for_parsing("06");
    metadata.general_desc = Some(desc("[1-9]\\d{7,8}", "", &[8, 9]));
    metadata.fixed_line = Some(desc("1\\d{7}", "12345678", &[8]));
    metadata.mobile = Some(desc("(?:[357]0|31)\\d{7}", "301234567", &[9]));
    metadata.number_format = vec![
        fmt("(\\d{2})(\\d{3})(\\d{4})", "$1 $2 $3", &["[2-9]"]),
        fmt("(\\d)(\\d{3})(\\d{4})", "$1 $2 $3", &["1"]),
    ];
    metadata
}

fn ae() -> PhoneMetadata {
    let mut metadata = region("AE", 971, "00");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[1-9]\\d{7,8}", "", &[8, 9]));
    metadata.fixed_line = Some(desc("[2-4]\\d{7}", "21234567", &[8]));
    metadata.mobile = Some(desc("5[024-68]\\d{7}", "501234567", &[9]));
    metadata.uan = Some(desc("600\\d{6}", "600123456", &[9]));
    metadata.number_format = vec![
        fmt("(\\d{3})(\\d{3})(\\d{3})", "$1 $2 $3", &["60"]),
        fmt_with_rule("(\\d{2})(\\d{3})(\\d{4})", "$1 $2 $3", &["5"], "0$1"),
        fmt_with_rule("(\\d)(\\d{3})(\\d{4})", "$1 $2 $3", &["[2-4]"], "0$1"),
    ];
    metadata
}

fn ar() -> PhoneMetadata {
    let mut metadata = region("AR", 54, "00");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0(?:(11|343|3715)15)?");
    metadata.set_national_prefix_transform_rule("9$1");
    metadata.general_desc = Some(desc("11\\d{8}|[23]\\d{9}|9\\d{10}", "", &[10, 11]));
    metadata.fixed_line = Some(desc("11\\d{8}|[23]\\d{9}", "1123456789", &[10]));
    metadata.mobile = Some(desc("9\\d{10}", "91123456789", &[11]));
    metadata.toll_free = Some(desc("800\\d{7}", "8001234567", &[10]));
    let mut mobile_format = fmt_with_rule(
        "(9)(\\d{4})(\\d{2})(\\d{4})",
        "$2 $3-$4",
        &["9"],
        "0$1",
    );
    mobile_format.set_domestic_carrier_code_formatting_rule("0$1 $CC");
    metadata.number_format = vec![
        fmt_with_rule("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", &["11"], "0$1"),
        fmt_with_rule("(\\d{4})(\\d{2})(\\d{4})", "$1 $2-$3", &["[23]"], "0$1"),
        fmt_with_rule(
            "(9)(\\d{4})(\\d{2})(\\d{4})",
            "$2 15 $3-$4",
            &["9(?:11|343|3715)"],
            "0$1",
        ),
        mobile_format,
    ];
    metadata.intl_number_format = vec![
        fmt("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", &["11"]),
        fmt("(\\d{4})(\\d{2})(\\d{4})", "$1 $2-$3", &["[23]"]),
        fmt("(9)(\\d{4})(\\d{2})(\\d{4})", "$1 $2 $3 $4", &["9"]),
    ];
    metadata
}

fn mx() -> PhoneMetadata {
    let mut metadata = region("MX", 52, "00");
    metadata.set_national_prefix("01");
    metadata.set_national_prefix_for_parsing("0[12]|04[45](\\d{10})");
    metadata.set_national_prefix_transform_rule("1$1");
    metadata.general_desc = Some(desc_with_local(
        "[1-9]\\d{9,10}",
        "",
        &[10, 11],
        &[7, 8],
    ));
    metadata.fixed_line = Some(desc("[2-9]\\d{9}", "2123456789", &[10]));
    metadata.mobile = Some(desc("1\\d{10}", "13312345678", &[11]));
    metadata.number_format = vec![
        fmt_with_rule("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["33|55|81"], "01 $1"),
        fmt_with_rule("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &["[2-9]"], "01 $1"),
        fmt("(1)(\\d{2})(\\d{4})(\\d{4})", "045 $2 $3 $4", &["1(?:33|55|81)"]),
        fmt("(1)(\\d{3})(\\d{3})(\\d{4})", "045 $2 $3 $4", &["1"]),
    ];
    metadata.intl_number_format = vec![
        fmt("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["33|55|81"]),
        fmt("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &["[2-9]"]),
        fmt("(1)(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3 $4", &["1(?:33|55|81)"]),
        fmt("(1)(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3 $4", &["1"]),
    ];
    metadata
}

fn au() -> PhoneMetadata {
    let mut metadata = region("AU", 61, "001[12]");
    metadata.set_preferred_international_prefix("0011");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[1-578]\\d{5,9}", "", &[6, 7, 8, 9, 10]));
    metadata.fixed_line = Some(desc("[237]\\d{8}", "212345678", &[9]));
    metadata.mobile = Some(desc("4\\d{8}", "412345678", &[9]));
    metadata.toll_free = Some(desc("1800\\d{6}", "1800123456", &[10]));
    metadata.premium_rate = Some(desc("190[0-2]\\d{6}", "1900123456", &[10]));
    metadata.number_format = vec![
        fmt_with_rule("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", &["[2378]"], "(0$1)"),
        fmt_with_rule("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", &["1[45]|4"], "0$1"),
    ];
    metadata
}

fn sg() -> PhoneMetadata {
    let mut metadata = region("SG", 65, "0[0-3]\\d");
    metadata.general_desc = Some(desc(
        "[36]\\d{7}|[17-9]\\d{7,10}",
        "",
        &[8, 9, 10, 11],
    ));
    metadata.fixed_line = Some(desc("[36]\\d{7}", "61234567", &[8]));
    metadata.mobile = Some(desc("[89]\\d{7}", "81234567", &[8]));
    metadata.number_format = vec![fmt("(\\d{4})(\\d{4})", "$1 $2", &["[369]|8[1-9]"])];
    metadata
}

fn jp() -> PhoneMetadata {
    let mut metadata = region("JP", 81, "010");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[1-9]\\d{8,9}", "", &[9, 10]));
    metadata.fixed_line = Some(desc("[1-9]\\d{8}", "312345678", &[9]));
    metadata.mobile = Some(desc("[7-9]0[1-9]\\d{7}", "9012345678", &[10]));
    metadata.number_format = vec![
        fmt_with_rule("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", &["[1-6]"], "0$1"),
        fmt_with_rule("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["[7-9]"], "0$1"),
    ];
    metadata
}

fn kr() -> PhoneMetadata {
    let mut metadata = region("KR", 82, "001");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0(8[1-46-8])?");
    metadata.general_desc = Some(desc_with_local(
        "[1-9]\\d{6,9}",
        "",
        &[7, 8, 9, 10],
        &[5, 6],
    ));
    metadata.fixed_line = Some(desc("2\\d{7}", "22123456", &[8]));
    metadata.mobile = Some(desc("1[0-25-9]\\d{7,8}", "1023456789", &[9, 10]));
    let mut seoul_format =
        fmt_with_rule("(\\d)(\\d{3,4})(\\d{4})", "$1-$2-$3", &["2"], "0$1");
    seoul_format.set_domestic_carrier_code_formatting_rule("0$1-$CC");
    let mut mobile_format =
        fmt_with_rule("(\\d{2})(\\d{3,4})(\\d{4})", "$1-$2-$3", &["1"], "0$1");
    mobile_format.set_domestic_carrier_code_formatting_rule("0$1-$CC");
    metadata.number_format = vec![seoul_format, mobile_format];
    metadata
}

fn cn() -> PhoneMetadata {
    let mut metadata = region("CN", 86, "00");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("1[3-9]\\d{9}|[2-9]\\d{9}", "", &[10, 11]));
    metadata.fixed_line = Some(desc("[2-9]\\d{9}", "2112345678", &[10]));
    metadata.mobile = Some(desc("1[3-9]\\d{9}", "13123456789", &[11]));
    metadata.number_format = vec![
        fmt("(\\d{3})(\\d{4})(\\d{4})", "$1 $2 $3", &["1"]),
        fmt_with_rule("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["[2-9]"], "0$1"),
    ];
    metadata
}

fn re() -> PhoneMetadata {
    let mut metadata = region("RE", 262, "00");
    metadata.set_main_country_for_code(true);
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[268]\\d{8}", "", &[9]));
    metadata.fixed_line = Some(desc("262\\d{6}", "262161234", &[9]));
    metadata.mobile = Some(desc("69[23]\\d{6}", "692123456", &[9]));
    metadata.toll_free = Some(desc("80\\d{7}", "801234567", &[9]));
    metadata.number_format = vec![fmt_with_rule(
        "(\\d{3})(\\d{2})(\\d{2})(\\d{2})",
        "$1 $2 $3 $4",
        &[],
        "0$1",
    )];
    metadata
}

fn yt() -> PhoneMetadata {
    let mut metadata = region("YT", 262, "00");
    metadata.set_leading_digits("269|63");
    metadata.set_national_prefix("0");
    metadata.set_national_prefix_for_parsing("0");
    metadata.general_desc = Some(desc("[268]\\d{8}", "", &[9]));
    metadata.fixed_line = Some(desc("26960\\d{4}", "269601234", &[9]));
    metadata.mobile = Some(desc("63960\\d{4}", "639601234", &[9]));
    metadata.toll_free = Some(desc("80\\d{7}", "801234567", &[9]));
    metadata
}

fn universal_toll_free() -> PhoneMetadata {
    let mut metadata = region("001", 800, "");
    metadata.clear_international_prefix();
    metadata.general_desc = Some(desc("\\d{8}", "", &[8]));
    metadata.toll_free = Some(desc("\\d{8}", "12345678", &[8]));
    metadata.number_format = vec![fmt("(\\d{4})(\\d{4})", "$1 $2", &[])];
    metadata
}

fn universal_premium_rate() -> PhoneMetadata {
    let mut metadata = region("001", 979, "");
    metadata.clear_international_prefix();
    metadata.general_desc = Some(desc("\\d{9}", "", &[9]));
    metadata.premium_rate = Some(desc("\\d{9}", "123456789", &[9]));
    metadata.number_format = vec![fmt("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", &[])];
    metadata
}

/// Builds the full collection the test engine is constructed from.
pub fn test_metadata_collection() -> PhoneMetadataCollection {
    PhoneMetadataCollection {
        metadata: vec![
            us(),
            bs(),
            ca(),
            gb(),
            de(),
            it(),
            nz(),
            pl(),
            by(),
            hu(),
            ae(),
            ar(),
            mx(),
            au(),
            sg(),
            jp(),
            kr(),
            cn(),
            re(),
            yt(),
            universal_toll_free(),
            universal_premium_rate(),
        ],
    }
}
