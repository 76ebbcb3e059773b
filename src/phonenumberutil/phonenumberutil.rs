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

use std::{
    borrow::Cow,
    cmp::max,
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
};

use log::{trace, warn};
use regex::Regex;

use super::phone_number_regexps_and_mappings::{
    MobileDialingOverride, PhoneNumberRegExpsAndMappings,
};
use crate::{
    asyoutypeformatter::AsYouTypeFormatter,
    i18n,
    interfaces::MatcherApi,
    macros::owned_from_cow_or,
    metadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    phone_number::{CountryCodeSource, PhoneNumber},
    phonenumberutil::{
        MatchType, NumberLengthType, PhoneNumberFormat, PhoneNumberType,
        errors::{
            ExtractNumberError, NotANumberError, ParseError, ValidationError,
            valid_metadata_regex,
        },
        helper_constants::{
            DEFAULT_EXTN_PREFIX, MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE,
            MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, PLUS_SIGN,
            REGION_CODE_FOR_NON_GEO_ENTITY, RFC3966_EXTN_PREFIX, RFC3966_ISDN_SUBADDRESS,
            RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
        },
        helper_functions::{
            self, copy_core_fields_only, get_number_desc_by_type,
            get_supported_types_for_metadata, is_national_number_suffix_of_the_other,
            normalize_helper, prefix_number_with_country_calling_code, test_number_length,
            test_number_length_with_unknown_type,
        },
        helper_types::PhoneNumberWithCountryCodeSource,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{RegexConsume, RegexFullMatch},
    string_util,
};

pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    reg_exps: PhoneNumberRegExpsAndMappings,

    /// A mapping from a country calling code to a RegionCode object which denotes
    /// the region represented by that country calling code. Note regions under
    /// NANPA share the country calling code 1 and Russia and Kazakhstan share the
    /// country calling code 7. Under this map, 1 is mapped to region code "US" and
    /// 7 is mapped to region code "RU". This is implemented as a sorted vector to
    /// achieve better performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,

    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,
}

impl PhoneNumberUtil {
    /// Builds an engine over the given metadata collection. The collection is
    /// trusted input: a pattern in it that fails to compile is a bug in the
    /// metadata pipeline and panics at first use.
    pub fn new_for_metadata(metadata_collection: PhoneMetadataCollection) -> Self {
        let mut instance = Self {
            matcher_api: Box::new(RegexBasedMatcher::new()),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            country_calling_code_to_region_code_map: Default::default(),
            nanpa_regions: Default::default(),
            region_to_metadata_map: Default::default(),
            country_code_to_non_geographical_metadata_map: Default::default(),
        };
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for metadata in metadata_collection.metadata {
            let region_code = metadata.id().to_string();
            let main_country_for_code = metadata.main_country_for_code();
            if i18n::RegionCode::get_unknown() == region_code {
                continue;
            }

            let country_calling_code = metadata.country_code();
            if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
                instance
                    .country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata);
            } else {
                instance
                    .region_to_metadata_map
                    .insert(region_code.clone(), metadata);
            }

            if let Some(regions_for_code) =
                country_calling_code_to_region_map.get_mut(&country_calling_code)
            {
                if main_country_for_code {
                    regions_for_code.push_front(region_code.clone());
                } else {
                    regions_for_code.push_back(region_code.clone());
                }
            } else {
                // For most country calling codes, there will be only one region code.
                let mut list_with_region_code = VecDeque::new();
                list_with_region_code.push_back(region_code.clone());
                country_calling_code_to_region_map
                    .insert(country_calling_code, list_with_region_code);
            }
            if country_calling_code == NANPA_COUNTRY_CODE {
                instance.nanpa_regions.insert(region_code);
            }
        }

        instance.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        );
        // Sort all the pairs in ascending order according to country calling code.
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(code, _)| *code);
        instance
    }

    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.region_to_metadata_map
            .keys()
            .map(|region| region.as_str())
            .collect()
    }

    pub fn get_supported_global_network_calling_codes(&self) -> HashSet<i32> {
        self.country_code_to_non_geographical_metadata_map
            .keys()
            .copied()
            .collect()
    }

    pub fn get_supported_calling_codes(&self) -> HashSet<i32> {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
            .collect()
    }

    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            warn!("Invalid or unknown region code provided: {}", region_code);
            return None;
        };
        let mut types = HashSet::new();
        get_supported_types_for_metadata(metadata, &mut types);
        Some(types)
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self
            .country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
        else {
            warn!(
                "Unknown country calling code for a non-geographical entity provided: {}",
                country_calling_code
            );
            return None;
        };
        let mut types = HashSet::new();
        get_supported_types_for_metadata(metadata, &mut types);
        Some(types)
    }

    /// Compiles a pattern coming out of the metadata through the shared cache.
    fn regex_for(&self, pattern: &str) -> Arc<Regex> {
        valid_metadata_regex(self.reg_exps.regexp_cache.get_regex(pattern))
    }

    pub(crate) fn starts_with_plus_chars_pattern(&self, phone_number: &str) -> bool {
        self.reg_exps.plus_chars_pattern.matches_start(phone_number)
    }

    fn trim_unwanted_end_chars(&self, phone_number: &mut String) {
        let mut bytes_to_trim = 0;

        for char in phone_number.chars().rev() {
            if !self
                .reg_exps
                .unwanted_end_char_pattern
                .full_match(&char.to_string())
            {
                break;
            }
            bytes_to_trim += char.len_utf8();
        }

        if bytes_to_trim > 0 {
            let new_len = phone_number.len() - bytes_to_trim;
            phone_number.truncate(new_len);
        }
    }

    /// We require that the first group is present in the output pattern to
    /// ensure no data is lost while formatting; when we format as you type,
    /// this should always be the case.
    pub(crate) fn is_format_eligible_for_as_you_type_formatter(&self, format: &str) -> bool {
        self.reg_exps
            .is_format_eligible_as_you_type_formatting_regex
            .full_match(format)
    }

    pub(crate) fn formatting_rule_has_first_group_only(
        &self,
        national_prefix_formatting_rule: &str,
    ) -> bool {
        national_prefix_formatting_rule.is_empty()
            || self
                .reg_exps
                .formatting_rule_has_first_group_only_regex
                .full_match(national_prefix_formatting_rule)
    }

    /// Returns the national dialling prefix for a region, for example `0` for
    /// the UK. A `~` in the prefix marks waiting for a dialling tone and can
    /// be stripped with `strip_non_digits`.
    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return None;
        };
        let mut prefix = metadata.national_prefix().to_owned();
        if strip_non_digits {
            prefix = prefix.replace("~", "");
        }
        Some(prefix)
    }

    fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    /// Returns the mobile token for the provided country calling code if it
    /// has one, for example Argentinian numbers carry a `9` between the
    /// country code and the area code.
    pub fn get_country_mobile_token(&self, country_calling_code: i32) -> String {
        self.reg_exps
            .mobile_token_mappings
            .get(&country_calling_code)
            .map(|token| token.to_string())
            .unwrap_or_default()
    }

    pub fn is_mobile_number_portable_region(&self, region_code: &str) -> bool {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return false;
        };
        metadata.mobile_number_portable_region()
    }

    pub(crate) fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    pub(crate) fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
    }

    fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.country_code_to_non_geographical_metadata_map
                .get(&country_calling_code)
        } else {
            self.region_to_metadata_map.get(region_code)
        }
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .copied()
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    /// Returns the region codes that match the specific country calling code, the
    /// main country for the code first. In the case of no region code being
    /// found, the list is empty.
    pub fn get_region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Vec<&str> {
        let mut acc = Vec::new();
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| {
                self.country_calling_code_to_region_code_map[index]
                    .1
                    .iter()
                    .for_each(|region| {
                        acc.push(region.as_str());
                    });
            }) /* suppress Result ignoring */
            .ok();
        acc
    }

    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return 0;
        };
        metadata.country_code()
    }

    /// Returns the region where a phone number is from. This could be used for
    /// geocoding at the region level. Only guarantees correct results for valid,
    /// full numbers (not short-codes, or invalid numbers).
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        if region_codes.is_empty() {
            trace!(
                "Missing/invalid country calling code ({})",
                country_calling_code
            );
            return i18n::RegionCode::get_unknown();
        }
        if region_codes.len() == 1 {
            region_codes[0]
        } else {
            self.get_region_code_for_number_from_region_list(phone_number, &region_codes)
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &[&'b str],
    ) -> &'b str {
        let national_number = Self::get_national_significant_number(phone_number);
        for code in region_codes {
            // Metadata cannot be empty because the region codes come from the country
            // calling code map.
            let metadata = &self.region_to_metadata_map[*code];
            if metadata.has_leading_digits() {
                if self
                    .regex_for(metadata.leading_digits())
                    .matches_start(&national_number)
                {
                    return code;
                }
            } else if self.get_number_type_helper(&national_number, metadata)
                != PhoneNumberType::Unknown
            {
                return code;
            }
        }
        i18n::RegionCode::get_unknown()
    }

    /// Gets the national significant number of a phone number. Note a national
    /// significant number doesn't contain a national prefix or any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. Ensure the number of leading zeros is at least 0 so we
        // don't crash in the case of malicious input.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(max(phone_number.number_of_leading_zeros(), 0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());

        fast_cat::concat_str!(&zeros_start, national_number)
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    /// Formats a phone number in the specified format using default rules. Note
    /// that this does not promote starred numbers, which can't be dialled.
    pub fn format<'b>(
        &self,
        phone_number: &'b PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        if phone_number.national_number() == 0 {
            let raw_input = phone_number.raw_input();
            if !raw_input.is_empty() {
                // Unparseable numbers that kept their raw input just use that.
                // This is the only case where a number can be formatted as E164 without a
                // leading '+' symbol (but the original number wasn't parseable anyway).
                return Cow::Borrowed(raw_input);
            }
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = Self::get_national_significant_number(phone_number);

        if matches!(number_format, PhoneNumberFormat::E164) {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            // Extensions are not formatted.
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Cow::Owned(formatted_number);
        }
        // Note here that all NANPA formatting rules are contained by US, so we use
        // that to format NANPA numbers. The same applies to Russian Fed regions -
        // rules are contained by Russia. French Indian Ocean country rules are
        // contained by Réunion.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let metadata =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code);

        if let Some(metadata) = metadata {
            if let Cow::Owned(s) = self.format_nsn(&formatted_number, metadata, number_format) {
                formatted_number = s;
            }
            if let Some(formatted_extension) =
                Self::get_formatted_extension(phone_number, metadata, number_format)
            {
                formatted_number.push_str(&formatted_extension);
            }
            prefix_number_with_country_calling_code(
                country_calling_code,
                number_format,
                &mut formatted_number,
            );
        }
        Cow::Owned(formatted_number)
    }

    fn format_nsn<'b>(
        &self,
        phone_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        self.format_nsn_with_carrier(phone_number, metadata, number_format, "")
    }

    fn format_nsn_with_carrier<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Cow<'b, str> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        let formatting_pattern =
            self.choose_formatting_pattern_for_number(available_formats, number);
        if let Some(formatting_pattern) = formatting_pattern {
            self.format_nsn_using_pattern_with_carrier(
                number,
                formatting_pattern,
                number_format,
                carrier_code,
            )
        } else {
            Cow::Borrowed(number)
        }
    }

    fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Option<&'b NumberFormat> {
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(last) = format.leading_digits_pattern.last() {
                if !self.regex_for(last).matches_start(national_number) {
                    continue;
                }
            }
            if self.regex_for(format.pattern()).full_match(national_number) {
                return Some(format);
            }
        }
        None
    }

    // Note that carrier_code is optional - if an empty string, no carrier code
    // replacement will take place.
    fn format_nsn_using_pattern_with_carrier<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Cow<'b, str> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        if matches!(number_format, PhoneNumberFormat::National)
            && !carrier_code.is_empty()
            && !formatting_pattern
                .domestic_carrier_code_formatting_rule()
                .is_empty()
        {
            // Replace the $CC in the formatting rule with the desired carrier code.
            let mut carrier_code_formatting_rule =
                Cow::Borrowed(formatting_pattern.domestic_carrier_code_formatting_rule());

            if let Cow::Owned(s) = self
                .reg_exps
                .carrier_code_pattern
                .replace(&carrier_code_formatting_rule, carrier_code)
            {
                carrier_code_formatting_rule = Cow::Owned(s);
            }
            if let Cow::Owned(s) = self
                .reg_exps
                .first_group_capturing_pattern
                .replace(&number_format_rule, carrier_code_formatting_rule.as_ref())
            {
                number_format_rule = Cow::Owned(s);
            }
        } else {
            // Use the national prefix formatting rule instead.
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();

            if matches!(number_format, PhoneNumberFormat::National)
                && !national_prefix_formatting_rule.is_empty()
            {
                // Apply the national_prefix_formatting_rule as the formatting_pattern
                // contains only information on how the national significant number
                // should be formatted at this point.
                if let Cow::Owned(s) = self
                    .reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, national_prefix_formatting_rule)
                {
                    number_format_rule = Cow::Owned(s);
                }
            }
        }

        let pattern_to_match = self.regex_for(formatting_pattern.pattern());

        let mut formatted_number =
            pattern_to_match.replace_all(national_number, number_format_rule.as_ref());

        if matches!(number_format, PhoneNumberFormat::RFC3966) {
            // First consume any leading punctuation, if any was present.
            if let Some(matched) = self.reg_exps.separator_pattern.find_start(&formatted_number) {
                let rest = formatted_number[matched.end()..].to_string();
                formatted_number = Cow::Owned(rest);
            }
            // Then replace all separators with a "-".
            if let Cow::Owned(s) = self
                .reg_exps
                .separator_pattern
                .replace_all(&formatted_number, "-")
            {
                formatted_number = Cow::Owned(s)
            }
        }
        formatted_number
    }

    /// Simple wrapper of format_nsn_using_pattern_with_carrier for the common
    /// case of no carrier code.
    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        self.format_nsn_using_pattern_with_carrier(
            national_number,
            formatting_pattern,
            number_format,
            "",
        )
    }

    // Returns the formatted extension of a phone number, if the phone number had an
    // extension specified else None.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return None;
        }

        let prefix = if matches!(number_format, PhoneNumberFormat::RFC3966) {
            RFC3966_EXTN_PREFIX
        } else if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }

    /// Formats a phone number using client-defined formatting rules. The
    /// supplied rules still carry the raw `$NP`/`$FG` macros; they are
    /// substituted here before formatting.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> String {
        let country_calling_code = phone_number.country_code();
        // Note get_region_code_for_country_code() is used because formatting
        // information for regions which share a country calling code is contained by
        // only one region for performance reasons. For example, for NANPA regions it
        // will be contained in the metadata for US.
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };

        let formatting_pattern = self.choose_formatting_pattern_for_number(
            user_defined_formats,
            &national_significant_number,
        );

        let mut formatted_number = if let Some(formatting_pattern) = formatting_pattern {
            // Before we do a replacement of the national prefix pattern $NP with the
            // national prefix, we need to copy the rule so that subsequent replacements
            // for different numbers have the appropriate national prefix.
            let mut num_format_copy = formatting_pattern.clone();

            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if !national_prefix_formatting_rule.is_empty() {
                let national_prefix = metadata.national_prefix();
                if !national_prefix.is_empty() {
                    // Replace $NP with national prefix and $FG with the first group ($1).
                    let rule = national_prefix_formatting_rule
                        .replace("$NP", national_prefix)
                        .replace("$FG", "$1");
                    num_format_copy.set_national_prefix_formatting_rule(rule);
                } else {
                    // We don't want to have a rule for how to format the national prefix if
                    // there isn't one.
                    num_format_copy.clear_national_prefix_formatting_rule();
                }
            }
            self.format_nsn_using_pattern(
                &national_significant_number,
                &num_format_copy,
                number_format,
            )
            .into_owned()
        } else {
            national_significant_number
        };
        if let Some(extension) =
            Self::get_formatted_extension(phone_number, metadata, PhoneNumberFormat::National)
        {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        formatted_number
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// as specified in the carrier_code. The carrier_code will always be used
    /// regardless of whether the phone number already has a preferred domestic
    /// carrier code stored.
    pub fn format_national_number_with_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let region_code = self.get_region_code_for_country_code(country_calling_code);

        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };

        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn_with_carrier(
                &national_significant_number,
                metadata,
                PhoneNumberFormat::National,
                carrier_code,
            ),
            national_significant_number
        );
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, PhoneNumberFormat::National)
        {
            formatted_number.push_str(&formatted_extension);
        }

        prefix_number_with_country_calling_code(
            country_calling_code,
            PhoneNumberFormat::National,
            &mut formatted_number,
        );

        formatted_number
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// stored on the number, falling back to the given default when none is
    /// stored.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        let carrier_code = if !phone_number.preferred_domestic_carrier_code().is_empty() {
            phone_number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Returns a number formatted in such a way that it can be dialed from a
    /// mobile phone in a specific region. If the number cannot be reached from
    /// the region (e.g. some countries block toll-free numbers from being
    /// called outside of the country), returns an empty string.
    pub fn format_number_for_mobile_dialing<'b>(
        &self,
        phone_number: &'b PhoneNumber,
        calling_from: &str,
        with_formatting: bool,
    ) -> Cow<'b, str> {
        let country_calling_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_calling_code) {
            return if phone_number.has_raw_input() {
                Cow::Borrowed(phone_number.raw_input())
            } else {
                Cow::Borrowed("")
            };
        }

        let mut formatted_number = String::new();
        // Clear the extension, as that part cannot normally be dialed together with
        // the main number.
        let mut number_no_extension = phone_number.clone();
        number_no_extension.clear_extension();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let number_type = self.get_number_type(&number_no_extension);
        let is_valid_number = number_type != PhoneNumberType::Unknown;
        if calling_from == region_code {
            match self
                .reg_exps
                .mobile_dialing_overrides
                .get(&country_calling_code)
            {
                Some(MobileDialingOverride::InternationalUnlessShort) => {
                    // Output international format for numbers that can be dialed
                    // internationally, since that always works, except for numbers
                    // which might potentially be short numbers, which are always
                    // dialled in national format.
                    let national_number =
                        Self::get_national_significant_number(&number_no_extension);
                    let dial_international = self
                        .get_metadata_for_region(calling_from)
                        .map(|region_metadata| {
                            self.can_be_internationally_dialled(&number_no_extension)
                                && !matches!(
                                    test_number_length_with_unknown_type(
                                        &national_number,
                                        region_metadata
                                    ),
                                    Err(ValidationError::TooShort)
                                )
                        })
                        .unwrap_or(false);
                    let format = if dial_international {
                        PhoneNumberFormat::International
                    } else {
                        PhoneNumberFormat::National
                    };
                    formatted_number = self.format(&number_no_extension, format).into_owned();
                }
                Some(MobileDialingOverride::PrependNationalPrefix) => {
                    // The national format written down for these numbers doesn't
                    // contain the national prefix, but it is obligatory when
                    // dialing from a mobile phone, so we add it back.
                    formatted_number = self
                        .format(&number_no_extension, PhoneNumberFormat::National)
                        .into_owned();
                    if is_valid_number {
                        let ndd_prefix = self
                            .get_ndd_prefix_for_region(region_code, true)
                            .unwrap_or_default();
                        formatted_number =
                            fast_cat::concat_str!(&ndd_prefix, " ", &formatted_number);
                    }
                }
                Some(MobileDialingOverride::UanDialsNationally)
                    if number_type == PhoneNumberType::UAN =>
                {
                    // These short codes cannot be dialled with the country code
                    // prefixed; dial the significant number as-is.
                    formatted_number =
                        Self::get_national_significant_number(&number_no_extension);
                }
                _ => {
                    // Non-geographical numbers get the international format when
                    // they can be dialled internationally as that always works.
                    let format = if region_code == REGION_CODE_FOR_NON_GEO_ENTITY
                        && self.can_be_internationally_dialled(&number_no_extension)
                    {
                        PhoneNumberFormat::International
                    } else {
                        PhoneNumberFormat::National
                    };
                    formatted_number = self.format(&number_no_extension, format).into_owned();
                }
            }
        } else if is_valid_number && self.can_be_internationally_dialled(&number_no_extension) {
            // We assume that short numbers are not diallable from outside their
            // region, so if a number is not a valid regular length phone number, we
            // treat it as if it cannot be internationally dialled.
            let format = if with_formatting {
                PhoneNumberFormat::International
            } else {
                PhoneNumberFormat::E164
            };
            return Cow::Owned(self.format(&number_no_extension, format).into_owned());
        }
        if !with_formatting {
            Cow::Owned(self.normalize_diallable_chars_only(&formatted_number))
        } else {
            Cow::Owned(formatted_number)
        }
    }

    /// Formats a phone number for out-of-country dialing purposes. Does not
    /// take region-specific dialling quirks into account; for that use
    /// `format_number_for_mobile_dialing` instead.
    pub fn format_out_of_country_calling_number(
        &self,
        phone_number: &PhoneNumber,
        calling_from: &str,
    ) -> String {
        if !self.is_valid_region_code(calling_from) {
            trace!(
                "Trying to format number from invalid region {}. International formatting applied.",
                calling_from
            );
            return self.format(phone_number, PhoneNumberFormat::International).into_owned();
        }
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(calling_from) {
                // For NANPA regions, return the national format for these regions but
                // prefix it with the country calling code.
                let mut buf = itoa::Buffer::new();
                return fast_cat::concat_str!(
                    buf.format(country_calling_code),
                    " ",
                    &self.format(phone_number, PhoneNumberFormat::National)
                );
            }
        } else if country_calling_code == self.get_country_code_for_region(calling_from) {
            // If regions share a country calling code, the country calling code need
            // not be dialled. This also applies when dialling within a region, so this
            // if clause covers both these cases. Technically this is the case for
            // dialling from La Réunion to other overseas departments of France (French
            // Guiana, Martinique, Guadeloupe), but not vice versa - so we don't cover
            // this edge case for now and for those cases return the version including
            // country calling code.
            return self.format(phone_number, PhoneNumberFormat::National).into_owned();
        }
        // Metadata cannot be empty because we checked the validity of the region
        // code above.
        let metadata_calling_from = &self.region_to_metadata_map[calling_from];
        let international_prefix = metadata_calling_from.international_prefix();

        // In general, if there is a preferred international prefix, use that.
        // Otherwise, for regions that have multiple international prefixes, the
        // international format of the number is returned since we would not know
        // which one to use.
        let international_prefix_for_formatting = if self
            .reg_exps
            .single_international_prefix
            .full_match(international_prefix)
        {
            international_prefix
        } else {
            metadata_calling_from.preferred_international_prefix()
        };

        let region_code = self.get_region_code_for_country_code(country_calling_code);
        // Metadata cannot be empty because the country_calling_code is valid.
        let metadata_for_region = self
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code);
        let Some(metadata_for_region) = metadata_for_region else {
            return national_significant_number;
        };
        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn(
                &national_significant_number,
                metadata_for_region,
                PhoneNumberFormat::International
            ),
            national_significant_number
        );
        if let Some(extension) = Self::get_formatted_extension(
            phone_number,
            metadata_for_region,
            PhoneNumberFormat::International,
        ) {
            formatted_number.push_str(&extension);
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_calling_code),
                " ",
                &formatted_number
            );
        } else {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        formatted_number
    }

    /// Formats a phone number using the original phone number format (e.g.
    /// national or international) that the number is parsed from, provided
    /// that the number has been parsed with `parse_and_keep_raw_input`.
    /// Otherwise the number is formatted in national format.
    pub fn format_in_original_format(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> String {
        if phone_number.has_raw_input()
            && (self.has_unexpected_italian_leading_zero(phone_number)
                || !self.has_formatting_pattern_for_number(phone_number))
        {
            // We check if we have the formatting pattern because without that, we might
            // format the number as a group without national prefix.
            return phone_number.raw_input().to_string();
        }
        if !phone_number.has_country_code_source() {
            return self
                .format(phone_number, PhoneNumberFormat::National)
                .into_owned();
        }
        let formatted_number = match phone_number.country_code_source() {
            CountryCodeSource::FromNumberWithPlusSign => self
                .format(phone_number, PhoneNumberFormat::International)
                .into_owned(),
            CountryCodeSource::FromNumberWithIdd => {
                self.format_out_of_country_calling_number(phone_number, region_calling_from)
            }
            CountryCodeSource::FromNumberWithoutPlusSign => {
                let international = self.format(phone_number, PhoneNumberFormat::International);
                string_util::strip_cow_prefix(international, PLUS_SIGN)
                    .map(Cow::into_owned)
                    .unwrap_or_default()
            }
            CountryCodeSource::FromDefaultCountry | CountryCodeSource::Unspecified => {
                self.format_in_national_format_preserving_raw_input(phone_number)
            }
        };
        // If no digit is inserted/removed/modified as a result of our formatting, we
        // return the formatted phone number; otherwise we return the raw input the
        // user entered.
        let raw_input = phone_number.raw_input();
        if !formatted_number.is_empty() && !raw_input.is_empty() {
            let normalized_formatted_number =
                self.normalize_diallable_chars_only(&formatted_number);
            let normalized_raw_input = self.normalize_diallable_chars_only(raw_input);
            if normalized_formatted_number != normalized_raw_input {
                return raw_input.to_string();
            }
        }
        formatted_number
    }

    fn format_in_national_format_preserving_raw_input(
        &self,
        phone_number: &PhoneNumber,
    ) -> String {
        let region_code = self.get_region_code_for_country_code(phone_number.country_code());
        // We strip non-digits from the NDD here, and from the raw input later, so
        // that we can compare them easily.
        let national_prefix = self.get_ndd_prefix_for_region(region_code, true);
        let national_format = self
            .format(phone_number, PhoneNumberFormat::National)
            .into_owned();
        let Some(national_prefix) = national_prefix.filter(|prefix| !prefix.is_empty()) else {
            // If the region doesn't have a national prefix at all, we can safely
            // return the national format without worrying about a national prefix
            // being added.
            return national_format;
        };
        // Otherwise, we check if the original number was entered with a national
        // prefix.
        if self.raw_input_contains_national_prefix(
            phone_number.raw_input(),
            &national_prefix,
            region_code,
        ) {
            // If so, we can safely return the national format.
            return national_format;
        }
        // Metadata cannot be empty here because get_ndd_prefix_for_region() (above)
        // leaves the prefix empty if there is no metadata for the region.
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return national_format;
        };
        let national_number = Self::get_national_significant_number(phone_number);
        let format_rule =
            self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number);
        // The format rule could still be empty here if the national number was 0 and
        // there was no raw input (this should not be possible for numbers generated
        // by the phonenumber library as they would also not have a country calling
        // code and we would have exited earlier).
        let Some(format_rule) = format_rule else {
            return national_format;
        };
        // When the format we apply to this number doesn't contain national prefix,
        // we can just return the national format.
        let candidate_national_prefix_rule = format_rule.national_prefix_formatting_rule();
        // We assume that the first-group symbol will never be _before_ the national
        // prefix.
        let Some(index_of_first_group) = candidate_national_prefix_rule.find("$1") else {
            return national_format;
        };
        if index_of_first_group == 0 {
            return national_format;
        }
        let candidate_national_prefix_rule =
            self.normalize_digits_only(&candidate_national_prefix_rule[..index_of_first_group]);
        if candidate_national_prefix_rule.is_empty() {
            // National prefix not used when formatting this number.
            return national_format;
        }
        // Otherwise, we need to remove the national prefix from our output.
        let mut num_format_copy = format_rule.clone();
        num_format_copy.clear_national_prefix_formatting_rule();
        self.format_by_pattern(
            phone_number,
            PhoneNumberFormat::National,
            std::slice::from_ref(&num_format_copy),
        )
    }

    /// Checks whether the raw input carried the region's national prefix. Some
    /// national prefixes are a substring of others: if the stripped rest is
    /// not a valid number, the prefix was really part of the number.
    fn raw_input_contains_national_prefix(
        &self,
        raw_input: &str,
        national_prefix: &str,
        region_code: &str,
    ) -> bool {
        let normalized_national_number = self.normalize_digits_only(raw_input);
        if let Some(rest) = normalized_national_number.strip_prefix(national_prefix) {
            return self
                .parse(rest, region_code)
                .map(|parsed| self.is_valid_number(&parsed))
                .unwrap_or(false);
        }
        false
    }

    fn has_unexpected_italian_leading_zero(&self, phone_number: &PhoneNumber) -> bool {
        phone_number.italian_leading_zero()
            && !self.is_leading_zero_possible(phone_number.country_code())
    }

    fn is_leading_zero_possible(&self, country_calling_code: i32) -> bool {
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
            .map(|metadata| metadata.leading_zero_possible())
            .unwrap_or(false)
    }

    fn has_formatting_pattern_for_number(&self, phone_number: &PhoneNumber) -> bool {
        let country_calling_code = phone_number.country_code();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return false;
        };
        let national_number = Self::get_national_significant_number(phone_number);
        self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)
            .is_some()
    }

    /// Formats a phone number for out-of-country dialing purposes, attempting
    /// to keep the alpha chars and grouping symbols the user entered.
    pub fn format_out_of_country_keeping_alpha_chars(
        &self,
        phone_number: &PhoneNumber,
        calling_from: &str,
    ) -> String {
        let raw_input = phone_number.raw_input();
        // If there is no raw input, then we can't keep alpha characters because there
        // aren't any. In this case, we return format_out_of_country_calling_number.
        if raw_input.is_empty() {
            return self.format_out_of_country_calling_number(phone_number, calling_from);
        }
        let country_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_code) {
            return raw_input.to_string();
        }
        // Strip any prefix such as country calling code, IDD, that was present. We do
        // this by comparing the number in raw_input with the parsed number. To do
        // this, first we normalize punctuation. We retain number grouping symbols
        // such as " " only.
        let mut raw_input = raw_input.to_string();
        normalize_helper(
            &self.reg_exps.all_plus_number_grouping_symbols,
            true,
            &mut raw_input,
        );
        // Now we trim everything before the first three digits of the parsed number.
        // We choose three because all valid alpha numbers have 3 digits at the start
        // - if it does not, then we don't trim anything at all. Similarly, if the
        // national number was less than three digits, we don't trim anything at all.
        let national_number = Self::get_national_significant_number(phone_number);
        if national_number.len() > 3 {
            if let Some(first_national_number_digit) = raw_input.find(&national_number[..3]) {
                raw_input = raw_input[first_national_number_digit..].to_string();
            }
        }
        let metadata_calling_from = self.get_metadata_for_region(calling_from);
        if country_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(calling_from) {
                let mut buf = itoa::Buffer::new();
                return fast_cat::concat_str!(buf.format(country_code), " ", &raw_input);
            }
        } else if metadata_calling_from.is_some()
            && country_code == self.get_country_code_for_region(calling_from)
        {
            let Some(formatting_pattern) = self.choose_formatting_pattern_for_number(
                &self.region_to_metadata_map[calling_from].number_format,
                &national_number,
            ) else {
                // If no pattern above is matched, we format the original input.
                return raw_input;
            };
            let mut new_format = formatting_pattern.clone();
            // The first group is the first group of digits that the user wrote
            // together.
            new_format.set_pattern("(\\d+)(.*)");
            // Here we just concatenate them back together after the national prefix
            // has been fixed.
            new_format.set_format("$1$2");
            // Now we format using this pattern instead of the default pattern, but
            // with the national prefix prefixed if necessary. This will not work in
            // the cases where the pattern (and not the leading-digits) decide whether
            // a national prefix needs to be used, since we have overridden the
            // pattern to match anything, but that is not the case in the metadata to
            // date.
            return self
                .format_nsn_using_pattern(&raw_input, &new_format, PhoneNumberFormat::National)
                .into_owned();
        }
        // If an unsupported region-calling-from is entered, or a country with
        // multiple international prefixes, the international format of the number is
        // returned, unless there is a preferred international prefix.
        let international_prefix_for_formatting = metadata_calling_from
            .map(|metadata| {
                let international_prefix = metadata.international_prefix();
                if self
                    .reg_exps
                    .single_international_prefix
                    .full_match(international_prefix)
                {
                    international_prefix
                } else {
                    metadata.preferred_international_prefix()
                }
            })
            .unwrap_or("");
        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be empty because the country calling code is valid.
        let metadata_for_region =
            self.get_metadata_for_region_or_calling_code(country_code, region_code);
        let mut formatted_number = raw_input;
        if let Some(metadata_for_region) = metadata_for_region {
            if let Some(extension) = Self::get_formatted_extension(
                phone_number,
                metadata_for_region,
                PhoneNumberFormat::International,
            ) {
                formatted_number.push_str(&extension);
            }
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_code),
                " ",
                &formatted_number
            );
        } else {
            // Invalid region entered as country-calling-from (so no metadata was
            // found for it) or the region chosen has multiple international dialling
            // prefixes.
            if !self.is_valid_region_code(calling_from) {
                warn!(
                    "Trying to format number from invalid region {}. International formatting applied.",
                    calling_from
                );
            }
            prefix_number_with_country_calling_code(
                country_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        formatted_number
    }

    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    /// Gets the type of a valid phone number, or `Unknown` if it is invalid.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
    }

    fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, metadata.general_desc()) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general national number pattern"
            );
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, metadata.premium_rate()) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, metadata.toll_free()) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, metadata.shared_cost()) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, metadata.voip()) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, metadata.personal_number()) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, metadata.pager()) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, metadata.uan()) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, metadata.voicemail()) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, metadata.fixed_line());
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns equal,\
                 number is fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, metadata.mobile()) {
                trace!(
                    "Number '{national_number}': Fixed-line and mobile patterns differ, but number is \
                        still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, metadata.mobile())
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!(
            "Number'{national_number}' type unknown - doesn't match any specific number type pattern."
        );
        PhoneNumberType::Unknown
    }

    fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc,
    ) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        // very common name, so specify mod
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    /// Tests whether a phone number matches a valid pattern. Note this doesn't
    /// verify the number is actually in use, which is impossible to tell by
    /// just looking at a number itself.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. Note this
    /// doesn't verify the number is actually in use, which is impossible to
    /// tell by just looking at a number itself. If the country calling code is
    /// not the same as the country calling code for the region, this
    /// immediately exits with false.
    pub fn is_valid_number_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_code: &str,
    ) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code
            && country_code != self.get_country_code_for_region(region_code)
        {
            // Either the region code was invalid, or the country calling code for a
            // geographical region doesn't match the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
            != PhoneNumberType::Unknown
    }

    /// Tests whether a phone number has a geographical association: whether
    /// the number is associated with a certain region.
    pub fn is_number_geographical(&self, phone_number: &PhoneNumber) -> bool {
        self.is_number_type_geographical(
            self.get_number_type(phone_number),
            phone_number.country_code(),
        )
    }

    /// Overload of is_number_geographical, since the number type is expensive
    /// to compute and may already be known by the caller.
    pub fn is_number_type_geographical(
        &self,
        phone_number_type: PhoneNumberType,
        country_calling_code: i32,
    ) -> bool {
        matches!(
            phone_number_type,
            PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile
        ) || (self
            .reg_exps
            .geo_mobile_countries
            .contains(&country_calling_code)
            && phone_number_type == PhoneNumberType::Mobile)
    }

    /// Gets the length of the geographical area code from the national number
    /// field of the PhoneNumber object, or 0 when the number has none.
    pub fn get_length_of_geographical_area_code(&self, phone_number: &PhoneNumber) -> usize {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return 0;
        };
        let country_calling_code = phone_number.country_code();

        // If a country doesn't use a national prefix, and this number doesn't have
        // an Italian leading zero, we assume it is a closed dialling plan with no
        // area codes.
        if !metadata.has_national_prefix()
            && !phone_number.italian_leading_zero()
            && !self
                .reg_exps
                .countries_without_national_prefix_with_area_codes
                .contains(&country_calling_code)
        {
            return 0;
        }

        let number_type = self.get_number_type(phone_number);
        if number_type == PhoneNumberType::Mobile
            && self
                .reg_exps
                .geo_mobile_countries_without_mobile_area_codes
                .contains(&country_calling_code)
        {
            return 0;
        }

        if !self.is_number_type_geographical(number_type, country_calling_code) {
            return 0;
        }

        self.get_length_of_national_destination_code(phone_number)
    }

    /// Gets the length of the national destination code (NDC) from the
    /// PhoneNumber object passed in, so that clients could use it to split a
    /// national significant number into NDC and subscriber number.
    pub fn get_length_of_national_destination_code(&self, phone_number: &PhoneNumber) -> usize {
        let copied_proto = if phone_number.has_extension() {
            // We don't want to alter the object given to us, but we don't want to
            // include the extension when we format it, so we copy it and clear the
            // extension here.
            let mut copy = phone_number.clone();
            copy.clear_extension();
            Cow::Owned(copy)
        } else {
            Cow::Borrowed(phone_number)
        };
        let formatted_number = self.format(&copied_proto, PhoneNumberFormat::International);
        let number_groups: Vec<&str> = self
            .reg_exps
            .non_digits_pattern
            .split(&formatted_number)
            .collect();
        // The pattern will start with "+COUNTRY_CODE " so the first group will
        // always be the empty string (before the + symbol) and the second group
        // will be the country calling code. The third group will be area code if
        // it is not the last group.
        if number_groups.len() <= 3 {
            return 0;
        }
        if self.get_number_type(phone_number) == PhoneNumberType::Mobile {
            // For example Argentinian mobile numbers, when formatted in the
            // international format, are in the form of +54 9 NDC XXXX.... As a result,
            // we take the length of the third group (NDC) and add the length of the
            // mobile token, which also forms part of the national significant number.
            let mobile_token = self.get_country_mobile_token(phone_number.country_code());
            if !mobile_token.is_empty() {
                return number_groups[2].len() + number_groups[3].len();
            }
        }
        number_groups[2].len()
    }

    /// Returns true if the number can be dialled from outside the region, or
    /// unknown. If the number can only be dialled from within the region,
    /// returns false. Does not check the number is a valid number.
    pub fn can_be_internationally_dialled(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            // Note numbers belonging to non-geographical entities (e.g. +800 numbers)
            // are always internationally diallable, and will be caught here.
            return true;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        !self.is_number_matching_desc(
            &national_significant_number,
            metadata.no_international_dialling(),
        )
    }

    /// Checks whether a phone number is possible, i.e. the length matches some
    /// number type of the region, without matching the full pattern.
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Like `is_possible_number`, but restricted to a particular type of number.
    pub fn is_possible_number_for_type(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> bool {
        self.is_possible_number_for_type_with_reason(phone_number, phone_number_type)
            .is_ok()
    }

    /// Checks whether a phone number is possible and, when it is not, why:
    /// too short, too long, a length that does not occur, or an unknown
    /// country calling code. `Ok(IsPossibleLocalOnly)` marks lengths only
    /// diallable within the area.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.is_possible_number_for_type_with_reason(phone_number, PhoneNumberType::Unknown)
    }

    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: for regions that share a country calling code, like NANPA numbers,
        // we just use the rules from the default region (US in this case) since the
        // get_region_code_for_number will not work if the number is possible but not
        // valid. There is in fact one country calling code (290) where the possible
        // number pattern differs between various regions (Saint Helena and Tristan
        // da Cuñha), but this is handled by putting all possible lengths for any
        // country with this country calling code in the metadata for the default
        // region in this case.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be empty because the country calling code is valid.
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length(&national_number, metadata, phone_number_type)
    }

    /// Checks whether a string is a possible phone number when dialled from
    /// the given region. Returns false when it cannot even be parsed.
    pub fn is_possible_number_for_string(
        &self,
        number: &str,
        region_dialing_from: &str,
    ) -> bool {
        match self.parse(number, region_dialing_from) {
            Ok(parsed) => self.is_possible_number(&parsed),
            Err(_) => false,
        }
    }

    /// Attempts to extract a valid number from a phone number that is too long
    /// to be valid, keeping the leading digits. Returns true if a valid number
    /// was extracted.
    pub fn truncate_too_long_number(&self, phone_number: &mut PhoneNumber) -> bool {
        if self.is_valid_number(phone_number) {
            return true;
        }
        let mut number_copy = phone_number.clone();
        let mut national_number = phone_number.national_number();
        loop {
            national_number /= 10;
            number_copy.set_national_number(national_number);
            if national_number == 0
                || matches!(
                    self.is_possible_number_with_reason(&number_copy),
                    Err(ValidationError::TooShort)
                )
            {
                return false;
            }
            if self.is_valid_number(&number_copy) {
                break;
            }
        }
        phone_number.set_national_number(national_number);
        true
    }

    // ------------------------------------------------------------------
    // Example numbers
    // ------------------------------------------------------------------

    /// Gets a valid fixed-line number for the region. Returns `None` when the
    /// region is unknown or no example number of that type is recorded.
    pub fn get_example_number(&self, region_code: &str) -> Option<PhoneNumber> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    /// Gets a valid number of the specified type for the region.
    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        phone_number_type: PhoneNumberType,
    ) -> Option<PhoneNumber> {
        let metadata = self.get_metadata_for_region(region_code)?;
        let desc = get_number_desc_by_type(metadata, phone_number_type);
        if !desc.has_example_number() {
            return None;
        }
        self.parse(desc.example_number(), region_code).ok()
    }

    /// Gets a valid number for a non-geographical entity such as the
    /// international toll-free service (country calling code 800).
    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<PhoneNumber> {
        let Some(metadata) = self
            .country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
        else {
            warn!(
                "Invalid or unknown country calling code provided: {}",
                country_calling_code
            );
            return None;
        };
        // For geographical entities, fixed-line data is always present. However,
        // for non-geographical entities, this is not the case, so we have to go
        // through different types to find the example number.
        let descs = [
            metadata.mobile(),
            metadata.toll_free(),
            metadata.shared_cost(),
            metadata.voip(),
            metadata.voicemail(),
            metadata.uan(),
            metadata.premium_rate(),
        ];
        for desc in descs {
            if desc.has_example_number() {
                let mut buf = itoa::Buffer::new();
                let international = fast_cat::concat_str!(
                    PLUS_SIGN,
                    buf.format(country_calling_code),
                    desc.example_number()
                );
                if let Ok(parsed) = self.parse(&international, i18n::RegionCode::get_unknown()) {
                    return Some(parsed);
                }
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Number matching
    // ------------------------------------------------------------------

    /// Takes two phone numbers and compares them for equality. Only the core
    /// fields (country code, national number, extension, leading zeros) take
    /// part in the comparison.
    ///
    /// Returns `ExactMatch` if the country calling code, NSN, presence of a
    /// leading zero for Italian numbers and any extension present are the same.
    /// `NsnMatch` if either or both has no country calling code specified, and
    /// the NSNs and extensions are the same. `ShortNsnMatch` if either or both
    /// has no country calling code specified, or the country codes are the
    /// same, and one NSN could be a shorter version of the other number.
    pub fn is_number_match(
        &self,
        first_number_in: &PhoneNumber,
        second_number_in: &PhoneNumber,
    ) -> MatchType {
        // We only care about the fields that uniquely define a number, so we copy
        // these across explicitly.
        let mut first_number = PhoneNumber::new();
        copy_core_fields_only(first_number_in, &mut first_number);
        let mut second_number = PhoneNumber::new();
        copy_core_fields_only(second_number_in, &mut second_number);
        // Early exit if both had extensions and these are different.
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }

        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        // Both had country calling code specified.
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number == second_number {
                return MatchType::ExactMatch;
            } else if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                // A SHORT_NSN_MATCH occurs if there is a difference because of the
                // presence or absence of an 'Italian leading zero', the presence or
                // absence of an extension, or one NSN being a shorter variant of the
                // other.
                return MatchType::ShortNsnMatch;
            }
            // This is not a match.
            return MatchType::NoMatch;
        }
        // Checks cases where one or both country calling codes were not specified.
        // To make equality checks easier, we first set the country codes to be equal.
        first_number.set_country_code(second_number_country_code);
        // If all else was the same, then this is an NSN_MATCH.
        if first_number == second_number {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Takes two phone numbers as strings and compares them for equality. This
    /// is a convenience wrapper for `is_number_match` which does not throw: a
    /// string that cannot be interpreted reports `NotANumber`.
    pub fn is_number_match_with_two_strings(
        &self,
        first_number: &str,
        second_number: &str,
    ) -> MatchType {
        match self.parse(first_number, i18n::RegionCode::get_unknown()) {
            Ok(first_number_as_proto) => {
                self.is_number_match_with_one_string(&first_number_as_proto, second_number)
            }
            Err(ParseError::InvalidCountryCode) => {
                match self.parse(second_number, i18n::RegionCode::get_unknown()) {
                    Ok(second_number_as_proto) => {
                        self.is_number_match_with_one_string(&second_number_as_proto, first_number)
                    }
                    Err(ParseError::InvalidCountryCode) => {
                        let first_parsed =
                            self.parse_helper(first_number, None, false, false);
                        let second_parsed =
                            self.parse_helper(second_number, None, false, false);
                        match (first_parsed, second_parsed) {
                            (Ok(first), Ok(second)) => self.is_number_match(&first, &second),
                            _ => MatchType::NotANumber,
                        }
                    }
                    Err(_) => MatchType::NotANumber,
                }
            }
            Err(_) => MatchType::NotANumber,
        }
    }

    /// Takes a phone number and a string and compares them for equality.
    pub fn is_number_match_with_one_string(
        &self,
        first_number: &PhoneNumber,
        second_number: &str,
    ) -> MatchType {
        // First see if the second number has an implicit country calling code, by
        // attempting to parse it.
        match self.parse(second_number, i18n::RegionCode::get_unknown()) {
            Ok(second_number_as_proto) => {
                self.is_number_match(first_number, &second_number_as_proto)
            }
            Err(ParseError::InvalidCountryCode) => {
                // The second number has no country calling code. EXACT_MATCH is no
                // longer possible. We parse it as if the region was the same as that
                // for the first number, and if EXACT_MATCH is returned, we replace
                // this with NSN_MATCH.
                let first_number_region =
                    self.get_region_code_for_country_code(first_number.country_code());
                if first_number_region != i18n::RegionCode::get_unknown() {
                    match self.parse(second_number, first_number_region) {
                        Ok(second_number_with_first_number_region) => {
                            let match_type = self
                                .is_number_match(first_number, &second_number_with_first_number_region);
                            if match_type == MatchType::ExactMatch {
                                MatchType::NsnMatch
                            } else {
                                match_type
                            }
                        }
                        Err(_) => MatchType::NotANumber,
                    }
                } else {
                    // If the first number didn't have a valid country calling code,
                    // then we parse the second number without one as well.
                    match self.parse_helper(second_number, None, false, false) {
                        Ok(second_number_as_proto) => {
                            self.is_number_match(first_number, &second_number_as_proto)
                        }
                        Err(_) => MatchType::NotANumber,
                    }
                }
            }
            Err(_) => MatchType::NotANumber,
        }
    }

    // ------------------------------------------------------------------
    // Normalization
    // ------------------------------------------------------------------

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips punctuation and alpha characters; a number with at least 3 alpha
    /// characters is instead converted through the keypad mapping.
    pub fn normalize(&self, number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.full_match(number) {
            let mut normalized = number.to_string();
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, &mut normalized);
            normalized
        } else {
            self.normalize_digits_only(number)
        }
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips all other characters.
    pub fn normalize_digits_only(&self, number: &str) -> String {
        Self::normalize_digits(number, false)
    }

    fn normalize_digits(number: &str, keep_non_digits: bool) -> String {
        // Fold every Unicode decimal digit to its ASCII value first.
        let folded = dec_from_char::normalize_decimals(number);
        let folded: &str = folded.as_ref();
        let mut normalized = String::with_capacity(folded.len());
        for number_char in folded.chars() {
            if number_char.is_ascii_digit() || keep_non_digits {
                normalized.push(number_char);
            }
        }
        normalized
    }

    /// Normalizes a string of characters representing a phone number, retaining
    /// only the characters meaningful when dialling: digits, `+`, `*` and `#`.
    pub fn normalize_diallable_chars_only(&self, number: &str) -> String {
        let mut normalized = number.to_string();
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, &mut normalized);
        normalized
    }

    /// Converts all alpha characters in a number to their respective digits on
    /// a keypad, but retains existing formatting.
    pub fn convert_alpha_characters_in_number(&self, number: &str) -> String {
        let mut converted = number.to_string();
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, &mut converted);
        converted
    }

    /// Returns true if the number is a valid vanity (alpha) number such as
    /// `800 MICROSOFT`. A valid vanity number will start with at least 3 digits
    /// and will have three or more alpha characters. This does not do
    /// region-specific checks.
    pub fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            // Number is too short, or doesn't match the basic phone number pattern.
            return false;
        }
        let mut number_copy = number.to_string();
        self.maybe_strip_extension(&mut number_copy);
        self.reg_exps
            .valid_alpha_phone_pattern
            .full_match(&number_copy)
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Checks to see if a string could possibly be a phone number. At the
    /// moment, checks to see that the string begins with at least 2 digits,
    /// ignoring any punctuation commonly found in phone numbers. This method
    /// does not require the number to be normalized in advance.
    pub fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.len() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.full_match(number)
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// currently strips all leading characters that cannot be used to start a
    /// phone number, and trailing characters that cannot be used in a phone
    /// number.
    pub fn extract_possible_number(
        &self,
        number: &str,
    ) -> Result<String, ExtractNumberError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(number) else {
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let mut possible_number = number[start.start()..].to_string();
        // Remove trailing non-alpha non-numerical characters.
        self.trim_unwanted_end_chars(&mut possible_number);
        if possible_number.is_empty() {
            return Err(ExtractNumberError::NotANumber);
        }
        // Check for extra numbers at the end.
        if let Some(captures) = self
            .reg_exps
            .capture_up_to_second_number_start_pattern
            .captures(&possible_number)
        {
            if let Some(first_number) = captures.get(1) {
                possible_number.truncate(first_number.end());
            }
        }
        Ok(possible_number)
    }

    /// Parses a string and returns it as a phone number in proto buffer
    /// format. The method is quite lenient and looks for a number in the input
    /// text (raw input) and does not check whether the string is definitely
    /// only a phone number.
    pub fn parse(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, Some(default_region), false, true)
    }

    /// Parses a string and returns it in proto buffer format. This method
    /// differs from `parse` in that it always populates the raw_input field of
    /// the protocol buffer with number_to_parse as well as the
    /// country_code_source field.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, Some(default_region), true, true)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseError> {
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLongNsn);
        }

        let mut national_number = self.build_national_number_for_parsing(number_to_parse)?;

        if !self.is_viable_phone_number(&national_number) {
            trace!("The string supplied did not seem to be a phone number.");
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse);
        }
        // Attempt to parse extension first, since it doesn't require
        // country-specific data and we need to have the extension in the normalized
        // version of the number.
        if let Some(extension) = self.maybe_strip_extension(&mut national_number) {
            phone_number.set_extension(extension);
        }

        let mut region_metadata = default_region.and_then(|region| {
            self.get_metadata_for_region(region)
        });
        // Check to see if the number is given in international format so we know
        // whether this number is from the default region or not.
        let (mut country_code, mut normalized_national_number) = match self
            .maybe_extract_country_code(
                &national_number,
                region_metadata,
                keep_raw_input,
                &mut phone_number,
            ) {
            Ok(extracted) => extracted,
            Err(ParseError::InvalidCountryCode) => {
                // Strip the plus-char, and try again.
                let Some(matched) = self.reg_exps.plus_chars_pattern.find_start(&national_number)
                else {
                    return Err(ParseError::InvalidCountryCode);
                };
                let (country_code, normalized) = self.maybe_extract_country_code(
                    &national_number[matched.end()..],
                    region_metadata,
                    keep_raw_input,
                    &mut phone_number,
                )?;
                if country_code == 0 {
                    return Err(ParseError::InvalidCountryCode);
                }
                (country_code, normalized)
            }
            Err(err) => return Err(err),
        };

        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if default_region != Some(phone_number_region) {
                region_metadata =
                    self.get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
        } else {
            // If no extracted country calling code, use the region supplied instead.
            if let Some(metadata) = region_metadata {
                country_code = metadata.country_code();
                phone_number.set_country_code(country_code);
            } else if keep_raw_input {
                phone_number.clear_country_code_source();
            }
        }

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }

        if let Some(metadata) = region_metadata {
            let mut carrier_code = String::new();
            let mut potential_national_number = normalized_national_number.clone();
            self.maybe_strip_national_prefix_and_carrier_code(
                &mut potential_national_number,
                metadata,
                Some(&mut carrier_code),
            );
            // We require that the NSN remaining after stripping must be long enough
            // to be a possible length for the region. Otherwise, we don't do the
            // stripping, since the original number could be a valid short number.
            let validation_result =
                test_number_length_with_unknown_type(&potential_national_number, metadata);
            if !matches!(
                validation_result,
                Err(ValidationError::TooShort)
                    | Err(ValidationError::InvalidLength)
                    | Ok(NumberLengthType::IsPossibleLocalOnly)
            ) {
                normalized_national_number = potential_national_number;
                if keep_raw_input && !carrier_code.is_empty() {
                    phone_number.set_preferred_domestic_carrier_code(carrier_code);
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLongNsn);
        }

        Self::set_italian_leading_zeros_for_phone_number(
            &normalized_national_number,
            &mut phone_number,
        );
        let parsed_national_number = normalized_national_number.parse::<u64>().map_err(|err| {
            ParseError::NotANumber(NotANumberError::FailedToParseNumberAsInt(err))
        })?;
        phone_number.set_national_number(parsed_national_number);
        Ok(phone_number)
    }

    /// Converts number_to_parse to a form that we can parse and write it to
    /// national_number if it is written in RFC3966; otherwise extract a
    /// possible number out of it and write to national_number.
    fn build_national_number_for_parsing(
        &self,
        number_to_parse: &str,
    ) -> Result<String, ParseError> {
        let mut national_number = String::with_capacity(number_to_parse.len());
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context =
                Self::extract_phone_context(number_to_parse, index_of_phone_context);
            if !self.is_phone_context_valid(phone_context) {
                trace!("The phone-context value is invalid.");
                return Err(NotANumberError::InvalidPhoneContext.into());
            }
            // If the phone context contains a phone number prefix, we need to capture
            // it, whereas domains will be ignored.
            if phone_context.starts_with(PLUS_SIGN) {
                national_number.push_str(phone_context);
            }
            // Now append everything between the "tel:" prefix and the phone-context.
            // This should include the national number, an optional extension or
            // isdn-subaddress component. Note we also handle the case when "tel:" is
            // missing, as we have seen in some of the phone number inputs. In that
            // case, we append everything from the beginning.
            let index_of_national_number = number_to_parse
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .unwrap_or(0);
            national_number
                .push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
        } else {
            // Extract a possible number from the string passed in (this strips leading
            // characters that could not be the start of a phone number.)
            national_number.push_str(
                &self
                    .extract_possible_number(number_to_parse)
                    .map_err(ParseError::from)?,
            );
        }

        // Delete the isdn-subaddress and everything after it if it is present. Note
        // extension won't appear at the same time with isdn-subaddress according to
        // paragraph 5.3 of the RFC3966 spec.
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(index_of_isdn);
        }
        // If both phone context and isdn-subaddress are absent but other parameters
        // are present, the parameters are left in nationalNumber. This is ok because
        // we are concerned about deleting content from a potential number string
        // when there is no strong evidence that the number is actually written in
        // RFC3966.
        Ok(national_number)
    }

    /// Extracts the value of the phone-context parameter, following the
    /// `;phone-context=` marker at the given index.
    fn extract_phone_context(number_to_extract_from: &str, index_of_phone_context: usize) -> &str {
        let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        if phone_context_start >= number_to_extract_from.len() {
            return "";
        }
        // If RFC3966 phone-context is present, phone-context value will be between
        // the index and the next ';' (or the end of the string).
        match number_to_extract_from[phone_context_start..].find(';') {
            Some(relative_end) => {
                &number_to_extract_from[phone_context_start..phone_context_start + relative_end]
            }
            None => &number_to_extract_from[phone_context_start..],
        }
    }

    // The RFC 3966 phone-context is either a global number or a domain name.
    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        self.reg_exps
            .rfc3966_global_number_digits_pattern
            .full_match(phone_context)
            || self
                .reg_exps
                .rfc3966_domainname_pattern
                .full_match(phone_context)
    }

    /// Checks to see that the region code used is valid, or if it is not
    /// valid, that the number to parse starts with a + symbol so that we can
    /// attempt to infer the region from the number.
    fn check_region_for_parsing(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> bool {
        let default_region_is_valid = default_region
            .map(|region| self.is_valid_region_code(region))
            .unwrap_or(false);
        if !default_region_is_valid
            && (number_to_parse.is_empty()
                || !self.starts_with_plus_chars_pattern(number_to_parse))
        {
            return false;
        }
        true
    }

    /// Strips any extension from the end of the number, returning it. The
    /// number is expected to be in a near-dialable form. The extension is only
    /// stripped when what precedes it is still a viable phone number.
    pub fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let captures = self.reg_exps.extn_pattern.captures(number)?;
        let match_start = captures.get(0)?.start();
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(&number[..match_start]) {
            return None;
        }
        // The numbers are captured into groups in the regular expression.
        for group_index in 1..captures.len() {
            if let Some(group) = captures.get(group_index) {
                let extension = group.as_str().to_string();
                number.truncate(match_start);
                return Some(extension);
            }
        }
        None
    }

    /// Tries to extract a country calling code from a number. Deals with plus
    /// signs, the IDD of the default region, and numbers that start with the
    /// country calling code of the default region written in national format.
    ///
    /// Returns the extracted country calling code (0 when the number is taken
    /// to be in national format) together with the national number.
    pub(crate) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<(i32, String), ParseError> {
        if number.is_empty() {
            return Ok((0, String::new()));
        }
        // Set the default prefix to be something that will never match if there is
        // no default region.
        let possible_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or("NonMatch");
        let stripped =
            self.maybe_strip_international_prefix_and_normalize(number, possible_idd_prefix);
        let country_code_source = stripped.country_code_source;
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        let full_number = stripped.phone_number;
        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.chars().count() <= MIN_LENGTH_FOR_NSN {
                trace!(
                    "Phone number had an IDD, but after this was not long enough to be a viable phone number."
                );
                return Err(ParseError::TooShortAfterIdd);
            }
            if let Some((potential_country_code, national_number)) =
                self.extract_country_code(&full_number)
            {
                phone_number.set_country_code(potential_country_code);
                return Ok((potential_country_code, national_number.to_string()));
            }
            // If this fails, they must be using a strange country calling code that we
            // don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode);
        }
        if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for the
            // default region. If so, we remove the country calling code, and do some
            // checks on the validity of the number before and after.
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) =
                full_number.strip_prefix(default_country_code_str)
            {
                let general_desc = metadata.general_desc();
                let mut potential_national_number = potential_national_number.to_string();
                self.maybe_strip_national_prefix_and_carrier_code(
                    &mut potential_national_number,
                    metadata,
                    None,
                );
                // If the number was not valid before but is valid now, or if it was too
                // long before, we consider the number with the country calling code
                // stripped to be a better result and keep that instead.
                let full_number_matches = helper_functions::is_match(
                    self.matcher_api.as_ref(),
                    &full_number,
                    general_desc,
                );
                let potential_number_matches = helper_functions::is_match(
                    self.matcher_api.as_ref(),
                    &potential_national_number,
                    general_desc,
                );
                if (!full_number_matches && potential_number_matches)
                    || matches!(
                        test_number_length_with_unknown_type(&full_number, metadata),
                        Err(ValidationError::TooLong)
                    )
                {
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok((default_country_code, potential_national_number));
                }
            }
        }
        // No country calling code present.
        phone_number.set_country_code(0);
        Ok((0, full_number.into_owned()))
    }

    /// Extracts country calling code from full_number, returning it and the
    /// remaining national number. Returns `None` when a valid country calling
    /// code can't be extracted.
    pub(crate) fn extract_country_code<'b>(
        &self,
        full_number: &'b str,
    ) -> Option<(i32, &'b str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let Some(prefix) = full_number.get(..length) else {
                continue;
            };
            let Ok(potential_country_code) = prefix.parse::<i32>() else {
                continue;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number, normalizes the resulting number, and reports how the original
    /// number was written down.
    pub(crate) fn maybe_strip_international_prefix_and_normalize<'b>(
        &self,
        number: &'b str,
        possible_idd_prefix: &str,
    ) -> PhoneNumberWithCountryCodeSource<'b> {
        if number.is_empty() {
            return PhoneNumberWithCountryCodeSource::new(
                Cow::Borrowed(number),
                CountryCodeSource::FromDefaultCountry,
            );
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(matched) = self.reg_exps.plus_chars_pattern.find_start(number) {
            // We can now normalize the rest of the number since we've consumed the
            // "+" sign at the start.
            return PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(self.normalize(&number[matched.end()..])),
                CountryCodeSource::FromNumberWithPlusSign,
            );
        }
        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.regex_for(possible_idd_prefix);
        let normalized = self.normalize(number);
        match Self::parse_prefix_as_idd(&self.reg_exps, &idd_pattern, &normalized) {
            Some(stripped_start) => PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(normalized[stripped_start..].to_string()),
                CountryCodeSource::FromNumberWithIdd,
            ),
            None => PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(normalized),
                CountryCodeSource::FromDefaultCountry,
            ),
        }
    }

    /// Returns the offset after the IDD when the number begins with the given
    /// IDD prefix and may be stripped. A `0` as the first digit after the IDD
    /// blocks the strip, since country calling codes cannot begin with 0.
    fn parse_prefix_as_idd(
        reg_exps: &PhoneNumberRegExpsAndMappings,
        idd_pattern: &Regex,
        number: &str,
    ) -> Option<usize> {
        let matched = idd_pattern.find_start(number)?;
        let match_end = matched.end();
        if let Some(digit_captures) = reg_exps
            .capturing_digit_pattern
            .captures(&number[match_end..])
        {
            if let Some(first_digit) = digit_captures.get(1) {
                let normalized_group = Self::normalize_digits(first_digit.as_str(), false);
                if normalized_group == "0" {
                    return None;
                }
            }
        }
        Some(match_end)
    }

    /// Strips any national prefix (such as 0, 1) present in the number,
    /// applying the region's transform rule when it has one. The strip is
    /// abandoned if it would turn a viable number into a non-viable one.
    /// Returns true when a prefix was removed; any captured carrier code goes
    /// into `carrier_code`.
    pub(crate) fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &mut String,
        metadata: &PhoneMetadata,
        carrier_code: Option<&mut String>,
    ) -> bool {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length or with no national prefix.
            return false;
        }
        // Attempt to parse the first digits as a national prefix.
        let prefix_pattern = self.regex_for(possible_national_prefix);
        let Some(prefix_captures) = prefix_pattern.captures_start(number) else {
            return false;
        };
        let general_desc = metadata.general_desc();
        // Check if the original number is viable.
        let is_viable_original_number =
            helper_functions::is_match(self.matcher_api.as_ref(), number, general_desc);
        // prefix_captures.len() == 1 implies nothing was captured by the capturing
        // groups in possible_national_prefix; therefore, no transformation is
        // necessary, and we just remove the national prefix.
        let number_of_groups = prefix_captures.len() - 1;
        let transform_rule = metadata.national_prefix_transform_rule();
        let last_group_present = number_of_groups > 0
            && prefix_captures.get(number_of_groups).is_some();
        if transform_rule.is_empty() || !last_group_present {
            let match_end = prefix_captures
                .get(0)
                .map(|full| full.end())
                .unwrap_or(0);
            let transformed_number = number[match_end..].to_string();
            // If the original number was viable, and the resultant number is not,
            // we return.
            if is_viable_original_number
                && !helper_functions::is_match(
                    self.matcher_api.as_ref(),
                    &transformed_number,
                    general_desc,
                )
            {
                return false;
            }
            if let Some(carrier_code) = carrier_code {
                if last_group_present {
                    if let Some(first_group) = prefix_captures.get(1) {
                        carrier_code.push_str(first_group.as_str());
                    }
                }
            }
            *number = transformed_number;
            true
        } else {
            // Check that the resultant number is still viable. If not, return. Check
            // this by copying the number and making the transformation on the copy
            // first.
            let transformed_number = prefix_pattern.replace(number, transform_rule).into_owned();
            if is_viable_original_number
                && !helper_functions::is_match(
                    self.matcher_api.as_ref(),
                    &transformed_number,
                    general_desc,
                )
            {
                return false;
            }
            if let Some(carrier_code) = carrier_code {
                if number_of_groups > 1 {
                    if let Some(first_group) = prefix_captures.get(1) {
                        carrier_code.push_str(first_group.as_str());
                    }
                }
            }
            *number = transformed_number;
            true
        }
    }

    fn set_italian_leading_zeros_for_phone_number(
        national_number: &str,
        phone_number: &mut PhoneNumber,
    ) {
        if national_number.len() > 1 && national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            let digits = national_number.as_bytes();
            let mut number_of_leading_zeros = 1;
            // Note that if the national number is all "0"s, the last "0" is not
            // counted as a leading zero.
            while number_of_leading_zeros < digits.len() - 1
                && digits[number_of_leading_zeros] == b'0'
            {
                number_of_leading_zeros += 1;
            }
            if number_of_leading_zeros != 1 {
                phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }
    }

    /// Gets an `AsYouTypeFormatter` for the specific region. The formatter
    /// borrows this engine for metadata lookups.
    pub fn get_as_you_type_formatter<'a>(&'a self, region_code: &str) -> AsYouTypeFormatter<'a> {
        AsYouTypeFormatter::new(self, region_code)
    }
}
