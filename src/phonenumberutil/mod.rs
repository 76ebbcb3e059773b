mod helper_constants;
mod helper_functions;
pub mod errors;
pub mod enums;
pub mod phonenumberutil;
mod phone_number_regexps_and_mappings;
pub(self) mod helper_types;

pub use enums::{MatchType, NumberLengthType, PhoneNumberFormat, PhoneNumberType};
