mod asyoutypeformatter;
mod interfaces;
mod metadata;
mod phone_number;
mod phonenumberutil;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;
pub(crate) mod string_util;

/// I decided to create this module because there are many
/// boilerplate places in the code that can be replaced with macros,
/// the name of which will describe what is happening more
/// clearly than a few lines of code.
mod macros;

#[cfg(test)]
mod tests;

pub use asyoutypeformatter::AsYouTypeFormatter;
pub use metadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc};
#[cfg(feature = "test-metadata")]
pub use metadata::testdata;
pub use phone_number::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{MatchType, NumberLengthType, PhoneNumberFormat, PhoneNumberType};
pub use phonenumberutil::errors;
pub use phonenumberutil::phonenumberutil::PhoneNumberUtil;
