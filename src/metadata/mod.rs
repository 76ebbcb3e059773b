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

//! Numbering-plan metadata model.
//!
//! The types here mirror the wire schema produced by the offline metadata
//! compiler: every scalar field carries explicit presence (`Option`), and the
//! accessors follow the protobuf convention of returning the type default for
//! an unset field. `$NP`/`$FG` macros in formatting rules are expanded at
//! build time by the compiler; only `$CC` survives into the stored rules.

#[cfg(any(test, feature = "test-metadata"))]
pub mod testdata;

macro_rules! optional_str_accessors {
    ($field:ident, $has:ident, $set:ident, $clear:ident) => {
        pub fn $field(&self) -> &str {
            self.$field.as_deref().unwrap_or_default()
        }

        pub fn $has(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, value: impl Into<String>) {
            self.$field = Some(value.into());
        }

        pub fn $clear(&mut self) {
            self.$field = None;
        }
    };
}

macro_rules! optional_copy_accessors {
    ($field:ident, $has:ident, $set:ident, $clear:ident, $ty:ty, $default:expr) => {
        pub fn $field(&self) -> $ty {
            self.$field.unwrap_or($default)
        }

        pub fn $has(&self) -> bool {
            self.$field.is_some()
        }

        pub fn $set(&mut self, value: $ty) {
            self.$field = Some(value);
        }

        pub fn $clear(&mut self) {
            self.$field = None;
        }
    };
}

macro_rules! optional_desc_accessors {
    ($field:ident, $has:ident) => {
        pub fn $field(&self) -> &PhoneNumberDesc {
            self.$field.as_ref().unwrap_or(&EMPTY_DESC)
        }

        pub fn $has(&self) -> bool {
            self.$field.is_some()
        }
    };
}

/// A rule for rendering a national significant number as human-readable
/// groups, plus the prefix decoration that goes with it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    pub pattern: Option<String>,
    pub format: Option<String>,
    /// Successively longer anchored prefixes; the last entry is the most
    /// specific one and is the one consulted when digits outgrow the list.
    pub leading_digits_pattern: Vec<String>,
    pub national_prefix_formatting_rule: Option<String>,
    pub national_prefix_optional_when_formatting: Option<bool>,
    pub domestic_carrier_code_formatting_rule: Option<String>,
}

impl NumberFormat {
    pub fn new() -> Self {
        Self::default()
    }

    optional_str_accessors!(pattern, has_pattern, set_pattern, clear_pattern);
    optional_str_accessors!(format, has_format, set_format, clear_format);
    optional_str_accessors!(
        national_prefix_formatting_rule,
        has_national_prefix_formatting_rule,
        set_national_prefix_formatting_rule,
        clear_national_prefix_formatting_rule
    );
    optional_str_accessors!(
        domestic_carrier_code_formatting_rule,
        has_domestic_carrier_code_formatting_rule,
        set_domestic_carrier_code_formatting_rule,
        clear_domestic_carrier_code_formatting_rule
    );
    optional_copy_accessors!(
        national_prefix_optional_when_formatting,
        has_national_prefix_optional_when_formatting,
        set_national_prefix_optional_when_formatting,
        clear_national_prefix_optional_when_formatting,
        bool,
        false
    );
}

/// The shape of one number type within a region: a full-match pattern plus
/// the lengths a well-formed number of this type may have.
///
/// An entirely absent desc means the type does not exist in the plan; a
/// `possible_length` of `[-1]` is the compiler's explicit "no possible
/// numbers" marker for types declared but unusable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumberDesc {
    pub national_number_pattern: Option<String>,
    pub example_number: Option<String>,
    pub possible_length: Vec<i32>,
    pub possible_length_local_only: Vec<i32>,
}

static EMPTY_DESC: PhoneNumberDesc = PhoneNumberDesc {
    national_number_pattern: None,
    example_number: None,
    possible_length: Vec::new(),
    possible_length_local_only: Vec::new(),
};

impl PhoneNumberDesc {
    pub fn new() -> Self {
        Self::default()
    }

    optional_str_accessors!(
        national_number_pattern,
        has_national_number_pattern,
        set_national_number_pattern,
        clear_national_number_pattern
    );
    optional_str_accessors!(
        example_number,
        has_example_number,
        set_example_number,
        clear_example_number
    );
}

/// Everything known about one region's numbering plan (or one
/// non-geographical entity's, in which case `id` is `001`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhoneMetadata {
    pub general_desc: Option<PhoneNumberDesc>,
    pub fixed_line: Option<PhoneNumberDesc>,
    pub mobile: Option<PhoneNumberDesc>,
    pub toll_free: Option<PhoneNumberDesc>,
    pub premium_rate: Option<PhoneNumberDesc>,
    pub shared_cost: Option<PhoneNumberDesc>,
    pub personal_number: Option<PhoneNumberDesc>,
    pub voip: Option<PhoneNumberDesc>,
    pub pager: Option<PhoneNumberDesc>,
    pub uan: Option<PhoneNumberDesc>,
    pub emergency: Option<PhoneNumberDesc>,
    pub voicemail: Option<PhoneNumberDesc>,
    pub no_international_dialling: Option<PhoneNumberDesc>,

    pub id: Option<String>,
    pub country_code: Option<i32>,
    pub international_prefix: Option<String>,
    pub preferred_international_prefix: Option<String>,
    pub national_prefix: Option<String>,
    pub preferred_extn_prefix: Option<String>,
    pub national_prefix_for_parsing: Option<String>,
    pub national_prefix_transform_rule: Option<String>,
    pub same_mobile_and_fixed_line_pattern: Option<bool>,
    pub number_format: Vec<NumberFormat>,
    pub intl_number_format: Vec<NumberFormat>,
    pub main_country_for_code: Option<bool>,
    pub leading_digits: Option<String>,
    pub leading_zero_possible: Option<bool>,
    pub mobile_number_portable_region: Option<bool>,
}

impl PhoneMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    optional_desc_accessors!(general_desc, has_general_desc);
    optional_desc_accessors!(fixed_line, has_fixed_line);
    optional_desc_accessors!(mobile, has_mobile);
    optional_desc_accessors!(toll_free, has_toll_free);
    optional_desc_accessors!(premium_rate, has_premium_rate);
    optional_desc_accessors!(shared_cost, has_shared_cost);
    optional_desc_accessors!(personal_number, has_personal_number);
    optional_desc_accessors!(voip, has_voip);
    optional_desc_accessors!(pager, has_pager);
    optional_desc_accessors!(uan, has_uan);
    optional_desc_accessors!(emergency, has_emergency);
    optional_desc_accessors!(voicemail, has_voicemail);
    optional_desc_accessors!(no_international_dialling, has_no_international_dialling);

    optional_str_accessors!(id, has_id, set_id, clear_id);
    optional_str_accessors!(
        international_prefix,
        has_international_prefix,
        set_international_prefix,
        clear_international_prefix
    );
    optional_str_accessors!(
        preferred_international_prefix,
        has_preferred_international_prefix,
        set_preferred_international_prefix,
        clear_preferred_international_prefix
    );
    optional_str_accessors!(
        national_prefix,
        has_national_prefix,
        set_national_prefix,
        clear_national_prefix
    );
    optional_str_accessors!(
        preferred_extn_prefix,
        has_preferred_extn_prefix,
        set_preferred_extn_prefix,
        clear_preferred_extn_prefix
    );
    optional_str_accessors!(
        national_prefix_for_parsing,
        has_national_prefix_for_parsing,
        set_national_prefix_for_parsing,
        clear_national_prefix_for_parsing
    );
    optional_str_accessors!(
        national_prefix_transform_rule,
        has_national_prefix_transform_rule,
        set_national_prefix_transform_rule,
        clear_national_prefix_transform_rule
    );
    optional_str_accessors!(
        leading_digits,
        has_leading_digits,
        set_leading_digits,
        clear_leading_digits
    );
    optional_copy_accessors!(
        country_code,
        has_country_code,
        set_country_code,
        clear_country_code,
        i32,
        0
    );
    optional_copy_accessors!(
        same_mobile_and_fixed_line_pattern,
        has_same_mobile_and_fixed_line_pattern,
        set_same_mobile_and_fixed_line_pattern,
        clear_same_mobile_and_fixed_line_pattern,
        bool,
        false
    );
    optional_copy_accessors!(
        main_country_for_code,
        has_main_country_for_code,
        set_main_country_for_code,
        clear_main_country_for_code,
        bool,
        false
    );
    optional_copy_accessors!(
        leading_zero_possible,
        has_leading_zero_possible,
        set_leading_zero_possible,
        clear_leading_zero_possible,
        bool,
        false
    );
    optional_copy_accessors!(
        mobile_number_portable_region,
        has_mobile_number_portable_region,
        set_mobile_number_portable_region,
        clear_mobile_number_portable_region,
        bool,
        false
    );
}

/// The full metadata set an engine is constructed from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhoneMetadataCollection {
    pub metadata: Vec<PhoneMetadata>,
}

impl PhoneMetadataCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_report_defaults_but_not_presence() {
        let desc = PhoneNumberDesc::new();
        assert_eq!("", desc.national_number_pattern());
        assert!(!desc.has_national_number_pattern());

        let metadata = PhoneMetadata::new();
        assert_eq!(0, metadata.country_code());
        assert!(!metadata.has_country_code());
        assert!(!metadata.has_general_desc());
        assert_eq!(&PhoneNumberDesc::new(), metadata.general_desc());
    }

    #[test]
    fn presence_is_part_of_equality() {
        let mut set_to_default = NumberFormat::new();
        set_to_default.set_national_prefix_formatting_rule("");
        // An unset rule and a rule explicitly set to the default value are
        // different messages.
        assert_ne!(NumberFormat::new(), set_to_default);
    }
}
