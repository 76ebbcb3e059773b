use crate::{metadata::testdata, PhoneNumberUtil};

use super::region_code::RegionCode;

fn get_phone_util() -> PhoneNumberUtil {
    super::init_test_logging();

    PhoneNumberUtil::new_for_metadata(testdata::test_metadata_collection())
}

#[test]
fn us_number_formatted_as_you_type() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650 2", formatter.input_digit('2'));
    assert_eq!("650 25", formatter.input_digit('5'));
    assert_eq!("650 253", formatter.input_digit('3'));
    // The seven digit number matches a complete format.
    assert_eq!("650 2532", formatter.input_digit('2'));
    // One more digit no longer fits, so the longer format takes over.
    assert_eq!("650 253 22", formatter.input_digit('2'));
    assert_eq!("650 253 222", formatter.input_digit('2'));
    assert_eq!("650 253 2222", formatter.input_digit('2'));
}

#[test]
fn us_number_with_plus_sign() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::zz());
    assert_eq!("+", formatter.input_digit('+'));
    assert_eq!("+1", formatter.input_digit('1'));
    assert_eq!("+1 4", formatter.input_digit('4'));
    assert_eq!("+1 41", formatter.input_digit('1'));
    assert_eq!("+1 415", formatter.input_digit('5'));
    assert_eq!("+1 415 6", formatter.input_digit('6'));
    assert_eq!("+1 415 66", formatter.input_digit('6'));
    assert_eq!("+1 415 666", formatter.input_digit('6'));
    assert_eq!("+1 415 6667", formatter.input_digit('7'));
    assert_eq!("+1 415 666 77", formatter.input_digit('7'));
    assert_eq!("+1 415 666 777", formatter.input_digit('7'));
    assert_eq!("+1 415 666 7777", formatter.input_digit('7'));
}

#[test]
fn gb_number_with_national_prefix() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::gb());
    assert_eq!("0", formatter.input_digit('0'));
    assert_eq!("02", formatter.input_digit('2'));
    assert_eq!("020", formatter.input_digit('0'));
    assert_eq!("020 7", formatter.input_digit('7'));
    assert_eq!("020 70", formatter.input_digit('0'));
    assert_eq!("020 703", formatter.input_digit('3'));
    assert_eq!("020 7031", formatter.input_digit('1'));
    assert_eq!("020 7031 3", formatter.input_digit('3'));
    assert_eq!("020 7031 30", formatter.input_digit('0'));
    assert_eq!("020 7031 300", formatter.input_digit('0'));
    assert_eq!("020 7031 3000", formatter.input_digit('0'));
    assert_eq!("0", formatter.get_extracted_national_prefix());
}

#[test]
fn it_number_with_leading_zero() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::it());
    assert_eq!("0", formatter.input_digit('0'));
    assert_eq!("02", formatter.input_digit('2'));
    assert_eq!("02 3", formatter.input_digit('3'));
    assert_eq!("02 36", formatter.input_digit('6'));
    assert_eq!("02 366", formatter.input_digit('6'));
    assert_eq!("02 3661", formatter.input_digit('1'));
    assert_eq!("02 3661 8", formatter.input_digit('8'));
    assert_eq!("02 3661 83", formatter.input_digit('3'));
    assert_eq!("02 3661 830", formatter.input_digit('0'));
    assert_eq!("02 3661 8300", formatter.input_digit('0'));
}

#[test]
fn pl_number_dialled_internationally() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::pl());
    assert_eq!("+", formatter.input_digit('+'));
    assert_eq!("+4", formatter.input_digit('4'));
    assert_eq!("+48 ", formatter.input_digit('8'));
    assert_eq!("+48 8", formatter.input_digit('8'));
    assert_eq!("+48 88", formatter.input_digit('8'));
    assert_eq!("+48 88 1", formatter.input_digit('1'));
    assert_eq!("+48 88 12", formatter.input_digit('2'));
    assert_eq!("+48 88 123", formatter.input_digit('3'));
    assert_eq!("+48 88 123 1", formatter.input_digit('1'));
    assert_eq!("+48 88 123 12", formatter.input_digit('2'));
    assert_eq!("+48 88 123 12 1", formatter.input_digit('1'));
    assert_eq!("+48 88 123 12 12", formatter.input_digit('2'));
}

#[test]
fn pl_number_entered_with_unknown_region() {
    let phone_util = get_phone_util();
    // Without a usable region the formatter still follows the country code.
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::zz());
    assert_eq!("+", formatter.input_digit('+'));
    assert_eq!("+4", formatter.input_digit('4'));
    assert_eq!("+48 ", formatter.input_digit('8'));
    assert_eq!("+48 8", formatter.input_digit('8'));
    assert_eq!("+48 88", formatter.input_digit('8'));
    assert_eq!("+48 88 1", formatter.input_digit('1'));
    assert_eq!("+48 88 12", formatter.input_digit('2'));
    assert_eq!("+48 88 123", formatter.input_digit('3'));
}

#[test]
fn user_supplied_formatting_is_echoed() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    // Once the user types their own separator, the formatter stops trying.
    assert_eq!("650-", formatter.input_digit('-'));
    assert_eq!("650-2", formatter.input_digit('2'));
    assert_eq!("650-25", formatter.input_digit('5'));
}

#[test]
fn remembered_position() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650 2", formatter.input_digit_and_remember_position('2'));
    assert_eq!(5, formatter.get_remembered_position());
    assert_eq!("650 25", formatter.input_digit('5'));
    assert_eq!("650 253", formatter.input_digit('3'));
    // The remembered digit has not moved.
    assert_eq!(5, formatter.get_remembered_position());
}

#[test]
fn clear_resets_the_formatter() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    formatter.input_digit('6');
    formatter.input_digit('5');
    formatter.input_digit('0');
    formatter.clear();
    assert_eq!("2", formatter.input_digit('2'));
    assert_eq!("21", formatter.input_digit('1'));
    assert_eq!("212", formatter.input_digit('2'));
}
