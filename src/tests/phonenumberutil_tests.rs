use crate::{
    errors::{ParseError, ValidationError},
    metadata::testdata,
    CountryCodeSource, MatchType, NumberFormat, NumberLengthType, PhoneNumber, PhoneNumberFormat,
    PhoneNumberType, PhoneNumberUtil,
};

use super::region_code::RegionCode;

fn get_phone_util() -> PhoneNumberUtil {
    super::init_test_logging();

    PhoneNumberUtil::new_for_metadata(testdata::test_metadata_collection())
}

fn number(country_code: i32, national_number: u64) -> PhoneNumber {
    let mut number = PhoneNumber::new();
    number.set_country_code(country_code);
    number.set_national_number(national_number);
    number
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert_eq!(20, regions.len());
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::yt()));
    // Non-geographical entities are not regions.
    assert!(!regions.contains(&RegionCode::un001()));
}

#[test]
fn get_supported_global_network_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_global_network_calling_codes();
    assert_eq!(2, calling_codes.len());
    assert!(calling_codes.contains(&800));
    assert!(calling_codes.contains(&979));
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes();
    assert!(calling_codes.contains(&1));
    assert!(calling_codes.contains(&44));
    assert!(calling_codes.contains(&262));
    // Global network calling codes are included as well.
    assert!(calling_codes.contains(&800));
    assert!(calling_codes.contains(&979));
    assert!(!calling_codes.contains(&999));
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    let types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .expect("US should be supported");
    assert!(types.contains(&PhoneNumberType::FixedLine));
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(types.contains(&PhoneNumberType::PremiumRate));
    // FixedLineOrMobile is a convenience type and never reported.
    assert!(!types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!types.contains(&PhoneNumberType::VoiceMail));

    assert!(phone_util
        .get_supported_types_for_region(RegionCode::zz())
        .is_none());
}

#[test]
fn get_supported_types_for_non_geo_entity() {
    let phone_util = get_phone_util();
    assert!(phone_util.get_supported_types_for_non_geo_entity(999).is_none());

    let types = phone_util
        .get_supported_types_for_non_geo_entity(979)
        .expect("+979 should be supported");
    assert!(types.contains(&PhoneNumberType::PremiumRate));
    assert!(!types.contains(&PhoneNumberType::TollFree));
}

#[test]
fn get_region_codes_for_country_calling_code() {
    let phone_util = get_phone_util();
    let nanpa_regions = phone_util.get_region_codes_for_country_calling_code(1);
    assert_eq!(Some(&RegionCode::us()), nanpa_regions.first());
    assert!(nanpa_regions.contains(&RegionCode::ca()));
    assert!(nanpa_regions.contains(&RegionCode::bs()));

    assert_eq!(
        vec![RegionCode::gb()],
        phone_util.get_region_codes_for_country_calling_code(44)
    );
    assert!(phone_util
        .get_region_codes_for_country_calling_code(999)
        .is_empty());
}

#[test]
fn get_region_code_for_country_code() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_country_code(44));
    // The main country comes first for shared calling codes.
    assert_eq!(RegionCode::re(), phone_util.get_region_code_for_country_code(262));
    assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_country_code(800));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_country_code(999));
}

#[test]
fn get_country_code_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(1, phone_util.get_country_code_for_region(RegionCode::us()));
    assert_eq!(64, phone_util.get_country_code_for_region(RegionCode::nz()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::zz()));
    // A non-geographical entity is not a region.
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::un001()));
}

#[test]
fn get_ndd_prefix_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some("1".to_string()),
        phone_util.get_ndd_prefix_for_region(RegionCode::us(), false)
    );
    assert_eq!(
        Some("0".to_string()),
        phone_util.get_ndd_prefix_for_region(RegionCode::nz(), false)
    );
    assert_eq!(
        Some("8".to_string()),
        phone_util.get_ndd_prefix_for_region(RegionCode::by(), false)
    );
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::zz(), false));
}

#[test]
fn is_nanpa_country() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::gb()));
    assert!(!phone_util.is_nanpa_country(RegionCode::zz()));
}

#[test]
fn get_country_mobile_token() {
    let phone_util = get_phone_util();
    assert_eq!("9", phone_util.get_country_mobile_token(54));
    assert_eq!("", phone_util.get_country_mobile_token(1));
}

#[test]
fn is_mobile_number_portable_region() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_mobile_number_portable_region(RegionCode::gb()));
    assert!(!phone_util.is_mobile_number_portable_region(RegionCode::us()));
    assert!(!phone_util.is_mobile_number_portable_region(RegionCode::zz()));
}

#[test]
fn get_national_significant_number() {
    let mut phone_number = number(1, 6502530000);
    assert_eq!(
        "6502530000",
        PhoneNumberUtil::get_national_significant_number(&phone_number)
    );

    phone_number = number(39, 236618300);
    phone_number.set_italian_leading_zero(true);
    assert_eq!(
        "0236618300",
        PhoneNumberUtil::get_national_significant_number(&phone_number)
    );

    phone_number = number(1, 650);
    phone_number.set_italian_leading_zero(true);
    phone_number.set_number_of_leading_zeros(2);
    assert_eq!(
        "00650",
        PhoneNumberUtil::get_national_significant_number(&phone_number)
    );
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let us_number = number(1, 6502530000);
    assert_eq!(
        "650 253 0000",
        phone_util.format(&us_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+1 650 253 0000",
        phone_util.format(&us_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+16502530000",
        phone_util.format(&us_number, PhoneNumberFormat::E164)
    );
    assert_eq!(
        "tel:+1-650-253-0000",
        phone_util.format(&us_number, PhoneNumberFormat::RFC3966)
    );

    let us_premium = number(1, 9004567890);
    assert_eq!(
        "900 456 7890",
        phone_util.format(&us_premium, PhoneNumberFormat::National)
    );
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();
    let mut us_number = number(1, 6502530000);
    us_number.set_extension("4567");
    // Uses the preferred extension prefix of the region.
    assert_eq!(
        "650 253 0000 extn. 4567",
        phone_util.format(&us_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "tel:+1-650-253-0000;ext=4567",
        phone_util.format(&us_number, PhoneNumberFormat::RFC3966)
    );

    let mut nz_number = number(64, 33316005);
    nz_number.set_extension("1234");
    // Falls back to the default extension prefix.
    assert_eq!(
        "03-331 6005 ext. 1234",
        phone_util.format(&nz_number, PhoneNumberFormat::National)
    );
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();
    let gb_fixed = number(44, 2070313000);
    assert_eq!(
        "(020) 7031 3000",
        phone_util.format(&gb_fixed, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+44 20 7031 3000",
        phone_util.format(&gb_fixed, PhoneNumberFormat::International)
    );

    let gb_mobile = number(44, 7912345678);
    assert_eq!(
        "(07912) 345 678",
        phone_util.format(&gb_mobile, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+44 7912 345 678",
        phone_util.format(&gb_mobile, PhoneNumberFormat::International)
    );
}

#[test]
fn format_de_number() {
    let phone_util = get_phone_util();
    let de_number = number(49, 30123456);
    assert_eq!(
        "030/123456",
        phone_util.format(&de_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+49 30/123456",
        phone_util.format(&de_number, PhoneNumberFormat::International)
    );

    let de_short = number(49, 291123);
    assert_eq!(
        "0291/123",
        phone_util.format(&de_short, PhoneNumberFormat::National)
    );

    let de_premium = number(49, 9001654321);
    assert_eq!(
        "0900 165 4321",
        phone_util.format(&de_premium, PhoneNumberFormat::National)
    );
}

#[test]
fn format_it_number() {
    let phone_util = get_phone_util();
    let mut it_fixed = number(39, 236618300);
    it_fixed.set_italian_leading_zero(true);
    assert_eq!(
        "02 3661 8300",
        phone_util.format(&it_fixed, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format(&it_fixed, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+390236618300",
        phone_util.format(&it_fixed, PhoneNumberFormat::E164)
    );

    let it_mobile = number(39, 345678901);
    assert_eq!(
        "345 678 901",
        phone_util.format(&it_mobile, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+39 345 678 901",
        phone_util.format(&it_mobile, PhoneNumberFormat::International)
    );
}

#[test]
fn format_ar_number() {
    let phone_util = get_phone_util();
    let ar_fixed = number(54, 1187654321);
    assert_eq!(
        "011 8765-4321",
        phone_util.format(&ar_fixed, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+54 11 8765-4321",
        phone_util.format(&ar_fixed, PhoneNumberFormat::International)
    );

    // Mobile numbers use a different format in international context, where
    // the mobile token is kept as its own group.
    let ar_mobile = number(54, 93435551212);
    assert_eq!(
        "03435 15 55-1212",
        phone_util.format(&ar_mobile, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+54 9 3435 55 1212",
        phone_util.format(&ar_mobile, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+5493435551212",
        phone_util.format(&ar_mobile, PhoneNumberFormat::E164)
    );
}

#[test]
fn format_mx_number() {
    let phone_util = get_phone_util();
    let mx_mobile = number(52, 13312345678);
    assert_eq!(
        "045 33 1234 5678",
        phone_util.format(&mx_mobile, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+52 1 33 1234 5678",
        phone_util.format(&mx_mobile, PhoneNumberFormat::International)
    );

    let mx_fixed = number(52, 2123456789);
    assert_eq!(
        "01 212 345 6789",
        phone_util.format(&mx_fixed, PhoneNumberFormat::National)
    );
}

#[test]
fn format_number_without_metadata_falls_back_to_digits() {
    let phone_util = get_phone_util();
    let unknown_region_number = number(999, 12345678);
    assert_eq!(
        "+99912345678",
        phone_util.format(&unknown_region_number, PhoneNumberFormat::E164)
    );
    assert_eq!(
        "12345678",
        phone_util.format(&unknown_region_number, PhoneNumberFormat::National)
    );
}

#[test]
fn format_by_pattern() {
    let phone_util = get_phone_util();
    let us_number = number(1, 6502530000);
    let mut user_format = NumberFormat::new();
    user_format.set_pattern("(\\d{3})(\\d{3})(\\d{4})");
    user_format.set_format("($1) $2-$3");
    let formats = [user_format];
    assert_eq!(
        "(650) 253-0000",
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::National, &formats)
    );
    assert_eq!(
        "+1 (650) 253-0000",
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::International, &formats)
    );

    let gb_number = number(44, 2012345678);
    let mut gb_format = NumberFormat::new();
    gb_format.set_pattern("(\\d{2})(\\d{4})(\\d{4})");
    gb_format.set_format("$1 $2 $3");
    gb_format.set_national_prefix_formatting_rule("($NP$FG)");
    let gb_formats = [gb_format];
    assert_eq!(
        "(020) 1234 5678",
        phone_util.format_by_pattern(&gb_number, PhoneNumberFormat::National, &gb_formats)
    );
}

#[test]
fn format_national_number_with_carrier_code() {
    let phone_util = get_phone_util();
    let ar_mobile = number(54, 91234125678);
    assert_eq!(
        "01234 12-5678",
        phone_util.format(&ar_mobile, PhoneNumberFormat::National)
    );
    assert_eq!(
        "01234 15 12-5678",
        phone_util.format_national_number_with_carrier_code(&ar_mobile, "15")
    );
    // An empty carrier code leaves the plain national format.
    assert_eq!(
        "01234 12-5678",
        phone_util.format_national_number_with_carrier_code(&ar_mobile, "")
    );

    let kr_number = number(82, 22123456);
    assert_eq!(
        "02-81-212-3456",
        phone_util.format_national_number_with_carrier_code(&kr_number, "81")
    );
}

#[test]
fn format_national_number_with_preferred_carrier_code() {
    let phone_util = get_phone_util();
    let kr_number = phone_util
        .parse_and_keep_raw_input("08122123456", RegionCode::kr())
        .expect("should parse");
    assert_eq!("81", kr_number.preferred_domestic_carrier_code());
    // The carrier recorded at parsing time wins over the fallback.
    assert_eq!(
        "02-81-212-3456",
        phone_util.format_national_number_with_preferred_carrier_code(&kr_number, "130")
    );

    let plain_number = number(82, 22123456);
    assert_eq!(
        "02-130-212-3456",
        phone_util.format_national_number_with_preferred_carrier_code(&plain_number, "130")
    );
}

#[test]
fn format_number_for_mobile_dialing() {
    let phone_util = get_phone_util();
    // NANPA numbers are dialled in international format, unless they could be
    // short numbers.
    let us_number = number(1, 6502530000);
    assert_eq!(
        "+16502530000",
        phone_util.format_number_for_mobile_dialing(&us_number, RegionCode::us(), false)
    );
    assert_eq!(
        "+1 650 253 0000",
        phone_util.format_number_for_mobile_dialing(&us_number, RegionCode::us(), true)
    );

    // Hungarian mobiles must be dialled with the national prefix even though
    // the national format omits it.
    let hu_mobile = number(36, 301234567);
    assert_eq!(
        "06 30 123 4567",
        phone_util.format_number_for_mobile_dialing(&hu_mobile, RegionCode::hu(), true)
    );
    assert_eq!(
        "06301234567",
        phone_util.format_number_for_mobile_dialing(&hu_mobile, RegionCode::hu(), false)
    );

    // UAN short codes in AE cannot be dialled with the country code.
    let ae_uan = number(971, 600123456);
    assert_eq!(
        "600123456",
        phone_util.format_number_for_mobile_dialing(&ae_uan, RegionCode::ae(), false)
    );

    // Dialling a valid foreign number always uses the international format.
    let gb_mobile = number(44, 7912345678);
    assert_eq!(
        "+447912345678",
        phone_util.format_number_for_mobile_dialing(&gb_mobile, RegionCode::us(), false)
    );

    let universal_toll_free = number(800, 12345678);
    assert_eq!(
        "+80012345678",
        phone_util.format_number_for_mobile_dialing(&universal_toll_free, RegionCode::us(), false)
    );
}

#[test]
fn format_out_of_country_calling_number() {
    let phone_util = get_phone_util();
    let us_number = number(1, 6502530000);
    assert_eq!(
        "00 1 650 253 0000",
        phone_util.format_out_of_country_calling_number(&us_number, RegionCode::de())
    );
    // Within NANPA the country code is dialled without an IDD.
    assert_eq!(
        "1 650 253 0000",
        phone_util.format_out_of_country_calling_number(&us_number, RegionCode::bs())
    );

    // Same country: national format is enough.
    let de_number = number(49, 30123456);
    assert_eq!(
        "030/123456",
        phone_util.format_out_of_country_calling_number(&de_number, RegionCode::de())
    );

    // AU prefers 0011 among its international prefixes.
    let mut it_number = number(39, 236618300);
    it_number.set_italian_leading_zero(true);
    assert_eq!(
        "0011 39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&it_number, RegionCode::au())
    );
    // SG has several international prefixes and no preferred one, so the
    // international format is returned.
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&it_number, RegionCode::sg())
    );
    // Unknown calling region: international formatting applied.
    assert_eq!(
        "+39 02 3661 8300",
        phone_util.format_out_of_country_calling_number(&it_number, RegionCode::zz())
    );

    let universal_toll_free = number(800, 12345678);
    assert_eq!(
        "011 800 1234 5678",
        phone_util.format_out_of_country_calling_number(&universal_toll_free, RegionCode::us())
    );
}

#[test]
fn format_in_original_format() {
    let phone_util = get_phone_util();
    let number1 = phone_util
        .parse_and_keep_raw_input("+442087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!(
        "+44 20 8765 4321",
        phone_util.format_in_original_format(&number1, RegionCode::gb())
    );

    let number2 = phone_util
        .parse_and_keep_raw_input("02087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!(
        "(020) 8765 4321",
        phone_util.format_in_original_format(&number2, RegionCode::gb())
    );

    let number3 = phone_util
        .parse_and_keep_raw_input("011442087654321", RegionCode::us())
        .expect("should parse");
    assert_eq!(
        "011 44 20 8765 4321",
        phone_util.format_in_original_format(&number3, RegionCode::us())
    );

    let number4 = phone_util
        .parse_and_keep_raw_input("442087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!(CountryCodeSource::FromNumberWithoutPlusSign, number4.country_code_source());
    assert_eq!(
        "44 20 8765 4321",
        phone_util.format_in_original_format(&number4, RegionCode::gb())
    );

    let number5 = phone_util
        .parse_and_keep_raw_input("6502530000", RegionCode::us())
        .expect("should parse");
    assert_eq!(
        "650 253 0000",
        phone_util.format_in_original_format(&number5, RegionCode::us())
    );

    // A number parsed without raw input comes back in national format.
    let number6 = phone_util
        .parse("+442087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!(
        "(020) 8765 4321",
        phone_util.format_in_original_format(&number6, RegionCode::gb())
    );
}

#[test]
fn format_out_of_country_keeping_alpha_chars() {
    let phone_util = get_phone_util();
    let mut alpha_numeric_number = number(1, 8007493524);
    alpha_numeric_number.set_raw_input("1800 six-flag");
    assert_eq!(
        "0011 1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::au())
    );

    alpha_numeric_number.set_raw_input("1-800-SIX-flag");
    assert_eq!(
        "0011 1 800-SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::au())
    );

    // Formatting from within the NANPA region.
    alpha_numeric_number.set_raw_input("1800 six-flag");
    assert_eq!(
        "1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::us())
    );
    assert_eq!(
        "1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::bs())
    );

    // Calling from an unsupported region: the international format with a plus
    // sign is all we can do.
    assert_eq!(
        "+1 800 SIX-FLAG",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::zz())
    );

    // Without raw input this falls back to the ordinary out-of-country format.
    alpha_numeric_number.clear_raw_input();
    assert_eq!(
        "00 1 800 749 3524",
        phone_util.format_out_of_country_keeping_alpha_chars(&alpha_numeric_number, RegionCode::de())
    );
}

#[test]
fn get_number_type() {
    let phone_util = get_phone_util();
    assert_eq!(
        PhoneNumberType::PremiumRate,
        phone_util.get_number_type(&number(1, 9004567890))
    );
    assert_eq!(
        PhoneNumberType::PremiumRate,
        phone_util.get_number_type(&number(49, 9001654321))
    );
    assert_eq!(
        PhoneNumberType::TollFree,
        phone_util.get_number_type(&number(1, 8004567890))
    );
    assert_eq!(
        PhoneNumberType::Mobile,
        phone_util.get_number_type(&number(44, 7912345678))
    );
    assert_eq!(
        PhoneNumberType::Mobile,
        phone_util.get_number_type(&number(54, 91123456789))
    );
    assert_eq!(
        PhoneNumberType::FixedLine,
        phone_util.get_number_type(&number(44, 2012345678))
    );
    // US fixed-line and mobile ranges are indistinguishable.
    assert_eq!(
        PhoneNumberType::FixedLineOrMobile,
        phone_util.get_number_type(&number(1, 6502530000))
    );
    assert_eq!(
        PhoneNumberType::SharedCost,
        phone_util.get_number_type(&number(44, 8431234567))
    );
    assert_eq!(
        PhoneNumberType::PersonalNumber,
        phone_util.get_number_type(&number(44, 7012345678))
    );
    assert_eq!(
        PhoneNumberType::Pager,
        phone_util.get_number_type(&number(44, 7612345678))
    );
    assert_eq!(
        PhoneNumberType::UAN,
        phone_util.get_number_type(&number(971, 600123456))
    );
    assert_eq!(
        PhoneNumberType::TollFree,
        phone_util.get_number_type(&number(800, 12345678))
    );
    assert_eq!(
        PhoneNumberType::Unknown,
        phone_util.get_number_type(&number(1, 6502530))
    );
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number(&number(1, 6502530000)));
    assert!(phone_util.is_valid_number(&number(44, 2070313000)));
    assert!(phone_util.is_valid_number(&number(800, 12345678)));
    assert!(phone_util.is_valid_number(&number(979, 123456789)));

    let mut it_number = number(39, 236618300);
    it_number.set_italian_leading_zero(true);
    assert!(phone_util.is_valid_number(&it_number));

    assert!(!phone_util.is_valid_number(&number(1, 2530000)));
    assert!(!phone_util.is_valid_number(&number(44, 791234567)));
    assert!(!phone_util.is_valid_number(&number(49, 1234)));
    assert!(!phone_util.is_valid_number(&number(64, 3316005)));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();
    let bs_number = number(1, 2423651234);
    assert!(phone_util.is_valid_number(&bs_number));
    assert!(phone_util.is_valid_number_for_region(&bs_number, RegionCode::bs()));
    assert!(!phone_util.is_valid_number_for_region(&bs_number, RegionCode::us()));

    // La Mayotte and Réunion share the country calling code 262.
    let re_number = number(262, 262161234);
    assert!(phone_util.is_valid_number_for_region(&re_number, RegionCode::re()));
    assert!(!phone_util.is_valid_number_for_region(&re_number, RegionCode::yt()));
    let yt_number = number(262, 639601234);
    assert!(phone_util.is_valid_number_for_region(&yt_number, RegionCode::yt()));
    assert!(!phone_util.is_valid_number_for_region(&yt_number, RegionCode::re()));
    // This toll-free number is valid in both.
    let shared_toll_free = number(262, 800123456);
    assert!(phone_util.is_valid_number_for_region(&shared_toll_free, RegionCode::re()));
    assert!(phone_util.is_valid_number_for_region(&shared_toll_free, RegionCode::yt()));

    let universal_toll_free = number(800, 12345678);
    assert!(phone_util.is_valid_number_for_region(&universal_toll_free, RegionCode::un001()));
    assert!(!phone_util.is_valid_number_for_region(&universal_toll_free, RegionCode::us()));
}

#[test]
fn get_region_code_for_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        RegionCode::us(),
        phone_util.get_region_code_for_number(&number(1, 6502530000))
    );
    assert_eq!(
        RegionCode::bs(),
        phone_util.get_region_code_for_number(&number(1, 2423570000))
    );
    assert_eq!(
        RegionCode::gb(),
        phone_util.get_region_code_for_number(&number(44, 7912345678))
    );
    assert_eq!(
        RegionCode::re(),
        phone_util.get_region_code_for_number(&number(262, 262161234))
    );
    // The leading digits of YT keep it apart from RE.
    assert_eq!(
        RegionCode::yt(),
        phone_util.get_region_code_for_number(&number(262, 639601234))
    );
    assert_eq!(
        RegionCode::un001(),
        phone_util.get_region_code_for_number(&number(800, 12345678))
    );
    assert_eq!(
        RegionCode::zz(),
        phone_util.get_region_code_for_number(&number(999, 12345678))
    );
}

#[test]
fn is_number_geographical() {
    let phone_util = get_phone_util();
    // Bahamas mobiles are not geographical.
    assert!(!phone_util.is_number_geographical(&number(1, 2423570000)));
    // Australian fixed lines are.
    assert!(phone_util.is_number_geographical(&number(61, 236618300)));
    assert!(!phone_util.is_number_geographical(&number(61, 412345678)));
    // Argentinian mobiles carry geographical information.
    assert!(phone_util.is_number_geographical(&number(54, 91123456789)));
    // So do Chinese ones.
    assert!(phone_util.is_number_geographical(&number(86, 13123456789)));
}

#[test]
fn get_length_of_geographical_area_code() {
    let phone_util = get_phone_util();
    // Google MTV, which has area code "650".
    assert_eq!(
        3,
        phone_util.get_length_of_geographical_area_code(&number(1, 6502530000))
    );
    // A North America toll-free number, which has no area code.
    assert_eq!(
        0,
        phone_util.get_length_of_geographical_area_code(&number(1, 8004567890))
    );
    // Google London, which has area code "20".
    assert_eq!(
        2,
        phone_util.get_length_of_geographical_area_code(&number(44, 2070313000))
    );
    // A mobile number in the UK does not have an area code.
    assert_eq!(
        0,
        phone_util.get_length_of_geographical_area_code(&number(44, 7912345678))
    );
    // Google Milan, with leading zero.
    let mut it_number = number(39, 236618300);
    it_number.set_italian_leading_zero(true);
    assert_eq!(2, phone_util.get_length_of_geographical_area_code(&it_number));
    // Chinese mobiles are geographical, but the geography is not expressed as
    // an area code.
    assert_eq!(
        0,
        phone_util.get_length_of_geographical_area_code(&number(86, 13123456789))
    );
}

#[test]
fn get_length_of_national_destination_code() {
    let phone_util = get_phone_util();
    assert_eq!(
        3,
        phone_util.get_length_of_national_destination_code(&number(1, 6502530000))
    );
    assert_eq!(
        2,
        phone_util.get_length_of_national_destination_code(&number(44, 2070313000))
    );
    // An Argentinian mobile: the NDC covers the mobile token and the area code.
    assert_eq!(
        5,
        phone_util.get_length_of_national_destination_code(&number(54, 93435551212))
    );
    // An international toll-free number, which has an NDC of "1234".
    assert_eq!(
        4,
        phone_util.get_length_of_national_destination_code(&number(800, 12345678))
    );
}

#[test]
fn can_be_internationally_dialled() {
    let phone_util = get_phone_util();
    // US toll-free numbers starting with 800 are marked as not being
    // internationally diallable.
    assert!(!phone_util.can_be_internationally_dialled(&number(1, 8004567890)));
    assert!(phone_util.can_be_internationally_dialled(&number(1, 6502530000)));
    assert!(phone_util.can_be_internationally_dialled(&number(1, 9004567890)));
    // Regions without the special desc let everything through.
    assert!(phone_util.can_be_internationally_dialled(&number(64, 33316005)));
}

#[test]
fn is_possible_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number(&number(1, 6502530000)));
    assert!(phone_util.is_possible_number(&number(44, 2070313000)));
    // Local-only lengths are still possible.
    assert!(phone_util.is_possible_number(&number(1, 2530000)));
    assert!(!phone_util.is_possible_number(&number(1, 253000)));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_with_reason(&number(1, 6502530000))
    );
    assert_eq!(
        Ok(NumberLengthType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&number(1, 2530000))
    );
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&number(1, 253000))
    );
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&number(1, 65025300000))
    );
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number(0, 2530000))
    );
}

#[test]
fn is_possible_number_for_type_with_reason() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util
            .is_possible_number_for_type_with_reason(&number(1, 8004567890), PhoneNumberType::TollFree)
    );
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util
            .is_possible_number_for_type_with_reason(&number(1, 2530000), PhoneNumberType::TollFree)
    );
    // AR fixed lines have 10 digits, mobiles 11.
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util
            .is_possible_number_for_type_with_reason(&number(54, 93435551212), PhoneNumberType::Mobile)
    );
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util
            .is_possible_number_for_type_with_reason(&number(54, 93435551212), PhoneNumberType::FixedLine)
    );
}

#[test]
fn is_possible_number_for_string() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number_for_string("+1 650 253 0000", RegionCode::us()));
    assert!(phone_util.is_possible_number_for_string("(650) 253-0000", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("+1 650 253 00000", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("not a number", RegionCode::us()));
}

#[test]
fn truncate_too_long_number() {
    let phone_util = get_phone_util();
    let mut too_long = number(1, 65025300001);
    assert!(phone_util.truncate_too_long_number(&mut too_long));
    assert_eq!(6502530000, too_long.national_number());

    let mut it_too_long = number(39, 2366183001);
    it_too_long.set_italian_leading_zero(true);
    assert!(phone_util.truncate_too_long_number(&mut it_too_long));
    assert_eq!(236618300, it_too_long.national_number());

    // A valid number is left alone.
    let mut valid = number(1, 6502530000);
    assert!(phone_util.truncate_too_long_number(&mut valid));
    assert_eq!(6502530000, valid.national_number());

    // An invalid number that cannot be truncated into a valid one is left
    // unchanged.
    let mut too_short = number(1, 2530000);
    assert!(!phone_util.truncate_too_long_number(&mut too_short));
    assert_eq!(2530000, too_short.national_number());
}

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some(number(49, 30123456)),
        phone_util.get_example_number(RegionCode::de())
    );
    assert_eq!(
        Some(number(1, 6502530000)),
        phone_util.get_example_number(RegionCode::us())
    );
    assert_eq!(None, phone_util.get_example_number(RegionCode::zz()));
}

#[test]
fn get_example_number_for_type() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some(number(44, 7912345678)),
        phone_util.get_example_number_for_type(RegionCode::gb(), PhoneNumberType::Mobile)
    );
    assert_eq!(
        Some(number(1, 8004567890)),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::TollFree)
    );
    assert_eq!(
        None,
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::VoiceMail)
    );
}

#[test]
fn get_example_number_for_non_geo_entity() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some(number(800, 12345678)),
        phone_util.get_example_number_for_non_geo_entity(800)
    );
    assert_eq!(
        Some(number(979, 123456789)),
        phone_util.get_example_number_for_non_geo_entity(979)
    );
    assert_eq!(None, phone_util.get_example_number_for_non_geo_entity(999));
}

#[test]
fn normalize_strips_punctuation_and_alpha_characters() {
    let phone_util = get_phone_util();
    assert_eq!("03456234", phone_util.normalize("034-56&+#234"));
    // A viable alpha number has its letters converted instead.
    assert_eq!("8007493524", phone_util.normalize("800 six-flag"));
}

#[test]
fn normalize_digits_only() {
    let phone_util = get_phone_util();
    assert_eq!("03456234", phone_util.normalize_digits_only("034-56&+a#234"));
    // Wide digits are folded to ASCII.
    assert_eq!("123", phone_util.normalize_digits_only("\u{FF11}\u{FF12}\u{FF13}"));
}

#[test]
fn normalize_diallable_chars_only() {
    let phone_util = get_phone_util();
    // '#' is diallable and survives, unlike punctuation and letters.
    assert_eq!(
        "03*456+1#234",
        phone_util.normalize_diallable_chars_only("03*4-56&+1a#234")
    );
}

#[test]
fn convert_alpha_characters_in_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        "1800-222-333",
        phone_util.convert_alpha_characters_in_number("1800-ABC-DEF")
    );
}

#[test]
fn is_alpha_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_alpha_number("1800 six-flags"));
    assert!(phone_util.is_alpha_number("1800 six-flags ext. 1234"));
    assert!(!phone_util.is_alpha_number("1800 123-1234"));
    assert!(!phone_util.is_alpha_number("1 six-flags"));
}

#[test]
fn is_viable_phone_number() {
    let phone_util = get_phone_util();
    assert!(!phone_util.is_viable_phone_number("1"));
    assert!(!phone_util.is_viable_phone_number("mp+"));
    assert!(phone_util.is_viable_phone_number("+1 650 253 0000"));
    assert!(phone_util.is_viable_phone_number("011 (413) 535-2312"));
    assert!(phone_util.is_viable_phone_number("0800-4-pizza"));
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok("0800-345-600".to_string()),
        phone_util.extract_possible_number("Tel:0800-345-600")
    );
    assert_eq!(
        Ok("0800 FOR PIZZA".to_string()),
        phone_util.extract_possible_number("Tel:0800 FOR PIZZA")
    );
    // Extraction starts at the first digit, so a leading parenthesis is
    // dropped; trailing punctuation is removed.
    assert_eq!(
        Ok("650) 253-0000".to_string()),
        phone_util.extract_possible_number("(650) 253-0000..- ..")
    );
    // A number starting with non-ASCII digits is accepted.
    assert_eq!(
        Ok("\u{FF11}\u{FF12}\u{FF13}".to_string()),
        phone_util.extract_possible_number("Num-\u{FF11}\u{FF12}\u{FF13}")
    );
    assert!(phone_util.extract_possible_number("Sorry").is_err());
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let nz_number = number(64, 33316005);
    assert_eq!(Ok(nz_number.clone()), phone_util.parse("033316005", RegionCode::nz()));
    assert_eq!(Ok(nz_number.clone()), phone_util.parse("33316005", RegionCode::nz()));
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("03-331 6005", RegionCode::nz())
    );
    // International formats work regardless of the default region.
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("+64 3 331 6005", RegionCode::us())
    );
    // Leading IDD of the default region.
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("0064 3 331 6005", RegionCode::nz())
    );
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("01164 3 331 6005", RegionCode::us())
    );

    let us_number = number(1, 6502530000);
    assert_eq!(
        Ok(us_number.clone()),
        phone_util.parse("(650) 253-0000", RegionCode::us())
    );
    // Square brackets count as punctuation too.
    assert_eq!(
        Ok(us_number.clone()),
        phone_util.parse("650 [253]-0000", RegionCode::us())
    );
    // A number with the country calling code but no plus sign.
    assert_eq!(
        Ok(us_number.clone()),
        phone_util.parse("1-650-253-0000", RegionCode::us())
    );

    assert_eq!(
        Ok(number(800, 12345678)),
        phone_util.parse("011 800 1234 5678", RegionCode::us())
    );
}

#[test]
fn parse_number_with_italian_leading_zero() {
    let phone_util = get_phone_util();
    let mut it_number = number(39, 236618300);
    it_number.set_italian_leading_zero(true);
    assert_eq!(Ok(it_number), phone_util.parse("0236618300", RegionCode::it()));

    let it_mobile = number(39, 312345678);
    assert_eq!(Ok(it_mobile), phone_util.parse("312 345 678", RegionCode::it()));
}

#[test]
fn parse_rfc3966_number() {
    let phone_util = get_phone_util();
    let nz_number = number(64, 33316005);
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("tel:033316005;phone-context=+64", RegionCode::nz())
    );
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("tel:331-6005;phone-context=+64-3", RegionCode::nz())
    );
    // An isdn-subaddress is dropped.
    assert_eq!(
        Ok(nz_number),
        phone_util.parse("tel:03-331-6005;isub=12345;phone-context=+64", RegionCode::nz())
    );
    assert!(matches!(
        phone_util.parse("tel:033316005;phone-context=", RegionCode::nz()),
        Err(ParseError::NotANumber(_))
    ));
}

#[test]
fn parse_number_with_extension() {
    let phone_util = get_phone_util();
    let mut nz_number = number(64, 33316005);
    nz_number.set_extension("3456");
    assert_eq!(
        Ok(nz_number.clone()),
        phone_util.parse("03 331 6005 ext 3456", RegionCode::nz())
    );
    assert_eq!(
        Ok(nz_number),
        phone_util.parse("tel:+64-3-331-6005;ext=3456", RegionCode::nz())
    );

    let mut us_number = number(1, 6502530000);
    us_number.set_extension("1234");
    assert_eq!(
        Ok(us_number),
        phone_util.parse("(650) 253-0000 x1234", RegionCode::us())
    );
}

#[test]
fn parse_with_national_prefix_transform_rule() {
    let phone_util = get_phone_util();
    // AR mobile numbers written with the 0...15 convention get the 9 mobile
    // token inserted.
    let ar_mobile = number(54, 93435551212);
    assert_eq!(
        Ok(ar_mobile.clone()),
        phone_util.parse("0343 15 555 1212", RegionCode::ar())
    );
    assert_eq!(
        Ok(ar_mobile),
        phone_util.parse("+54 9 343 555 1212", RegionCode::ar())
    );

    // MX mobiles written with 044/045.
    let mx_mobile = number(52, 13312345678);
    assert_eq!(
        Ok(mx_mobile.clone()),
        phone_util.parse("045 33 1234 5678", RegionCode::mx())
    );
    assert_eq!(
        Ok(mx_mobile),
        phone_util.parse("+52 1 33 1234 5678", RegionCode::mx())
    );
    let mx_fixed = number(52, 3312345678);
    assert_eq!(
        Ok(mx_fixed),
        phone_util.parse("01 33 1234 5678", RegionCode::mx())
    );
}

#[test]
fn parse_keeps_national_prefix_when_stripping_leaves_too_few_digits() {
    let phone_util = get_phone_util();
    // Stripping the BY national prefix here would leave a number that is too
    // short, so the prefix is treated as part of the number.
    assert_eq!(
        Ok(number(375, 812345)),
        phone_util.parse("812345", RegionCode::by())
    );
    // With one more digit the prefix is really a prefix.
    assert_eq!(
        Ok(number(375, 123456)),
        phone_util.parse("8123456", RegionCode::by())
    );
}

#[test]
fn parse_failures() {
    let phone_util = get_phone_util();
    assert!(matches!(
        phone_util.parse("This is not a phone number", RegionCode::nz()),
        Err(ParseError::NotANumber(_))
    ));
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("123 456 7890", RegionCode::zz())
    );
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("+999 123 456 7890", RegionCode::zz())
    );
    // Too few digits to pass the viability check at all.
    assert!(matches!(
        phone_util.parse("+1 6", RegionCode::us()),
        Err(ParseError::NotANumber(_))
    ));
    assert_eq!(
        Err(ParseError::TooShortNsn),
        phone_util.parse("+49 0", RegionCode::de())
    );
    assert_eq!(
        Err(ParseError::TooLongNsn),
        phone_util.parse("+1 650 253 00000000000000", RegionCode::us())
    );
    // Input longer than 250 characters is rejected outright.
    let long_input = "6502530000".repeat(30);
    assert_eq!(
        Err(ParseError::TooLongNsn),
        phone_util.parse(&long_input, RegionCode::us())
    );
}

#[test]
fn parse_and_keep_raw_input() {
    let phone_util = get_phone_util();
    let parsed = phone_util
        .parse_and_keep_raw_input("+442087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!("+442087654321", parsed.raw_input());
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, parsed.country_code_source());
    assert_eq!(2087654321, parsed.national_number());

    let parsed = phone_util
        .parse_and_keep_raw_input("02087654321", RegionCode::gb())
        .expect("should parse");
    assert_eq!(CountryCodeSource::FromDefaultCountry, parsed.country_code_source());

    let parsed = phone_util
        .parse_and_keep_raw_input("011442087654321", RegionCode::us())
        .expect("should parse");
    assert_eq!(CountryCodeSource::FromNumberWithIdd, parsed.country_code_source());

    // Without keeping the raw input the source is never populated.
    let parsed = phone_util
        .parse("+442087654321", RegionCode::gb())
        .expect("should parse");
    assert!(!parsed.has_country_code_source());
    assert!(!parsed.has_raw_input());
}

#[test]
fn is_number_match() {
    let phone_util = get_phone_util();
    let nz_number = number(64, 33316005);
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match(&nz_number, &nz_number.clone())
    );

    let mut with_extension = nz_number.clone();
    with_extension.set_extension("3456");
    let mut with_other_extension = nz_number.clone();
    with_other_extension.set_extension("3457");
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match(&with_extension, &with_other_extension)
    );
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match(&with_extension, &with_extension.clone())
    );
}

#[test]
fn is_number_match_with_two_strings() {
    let phone_util = get_phone_util();
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match_with_two_strings("+64 3 331 6005", "+64 03 331 6005")
    );
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match_with_two_strings("+64 3 331-6005", "tel:+64-3-331-6005")
    );
    // One number lacks the country calling code.
    assert_eq!(
        MatchType::NsnMatch,
        phone_util.is_number_match_with_two_strings("+64 3 331-6005", "3 331 6005")
    );
    // One number is a shorter form of the other.
    assert_eq!(
        MatchType::ShortNsnMatch,
        phone_util.is_number_match_with_two_strings("+64 3 331-6005", "331 6005")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match_with_two_strings("+64 3 331-6005", "+16433316005")
    );
    assert_eq!(
        MatchType::NotANumber,
        phone_util.is_number_match_with_two_strings("abcd", "+64 3 331 6005")
    );
}

#[test]
fn is_number_match_with_one_string() {
    let phone_util = get_phone_util();
    let nz_number = number(64, 33316005);
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match_with_one_string(&nz_number, "+64 3 331 6005")
    );
    assert_eq!(
        MatchType::NsnMatch,
        phone_util.is_number_match_with_one_string(&nz_number, "03 331 6005")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match_with_one_string(&nz_number, "+64 3 331 6001")
    );
}
