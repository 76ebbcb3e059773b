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

use std::sync::Arc;

use regex::Regex;

use crate::{
    i18n,
    metadata::{NumberFormat, PhoneMetadata},
    phonenumberutil::{errors::valid_metadata_regex, phonenumberutil::PhoneNumberUtil},
    regex_util::{RegexConsume, RegexFullMatch},
    regexp_cache::RegexCache,
};

/// Character used when appropriate to separate a prefix, such as a long NDD or
/// a country calling code, from the national number.
const SEPARATOR_BEFORE_NATIONAL_NUMBER: char = ' ';

/// A punctuation space that takes the place of each digit yet to be entered in
/// the formatting template.
const DIGIT_PLACEHOLDER: char = '\u{2008}';
const DIGIT_PLACEHOLDER_STR: &str = "\u{2008}";

/// A pattern that is used to match a long enough phone number when building a
/// formatting template. The longest phone number in the world is 15 digits.
const LONGEST_PHONE_NUMBER: &str = "999999999999999";

const MIN_LEADING_DIGITS_LENGTH: usize = 3;

fn empty_metadata() -> PhoneMetadata {
    let mut metadata = PhoneMetadata::new();
    metadata.set_id(i18n::RegionCode::zz());
    metadata.set_international_prefix("NA");
    metadata
}

/// Formats phone numbers on-the-fly as each digit is entered.
///
/// An instance is obtained from [`PhoneNumberUtil::get_as_you_type_formatter`]
/// for a specific region, holds state across `input_digit` calls, and can be
/// reused for a new number after a call to `clear`.
pub struct AsYouTypeFormatter<'a> {
    util: &'a PhoneNumberUtil,
    regex_cache: RegexCache,
    national_prefix_separators_pattern: Regex,

    current_output: String,
    formatting_template: String,
    /// The pattern from the number format that the template is built on.
    current_formatting_pattern: String,
    accrued_input: String,
    accrued_input_without_formatting: String,
    /// Set to false when formatting fails or the user enters their own
    /// formatting characters.
    able_to_format: bool,
    input_has_formatting: bool,
    /// Set to true when the user has entered a complete number with a prefix
    /// such as an IDD or a national prefix, so international formatting rules
    /// apply.
    is_complete_number: bool,
    is_expecting_country_calling_code: bool,
    /// Position in the template of the last filled-in placeholder.
    last_match_position: usize,
    /// The position of a digit upon which input_digit_and_remember_position
    /// was most recently invoked, as found in the original sequence of
    /// characters the user entered.
    original_position: usize,
    /// The position of a digit upon which input_digit_and_remember_position
    /// was most recently invoked, as found in accrued_input_without_formatting.
    position_to_remember: usize,
    /// Contains anything that has been entered so far preceding the national
    /// significant number, and it is formatted (e.g. with space inserted). For
    /// example, this can contain IDD, country code, and/or NDD, etc.
    prefix_before_national_number: String,
    should_add_space_after_national_prefix: bool,
    /// Contains the national prefix that has been extracted. It contains only
    /// digits without formatting.
    extracted_national_prefix: String,
    national_number: String,
    possible_formats: Vec<NumberFormat>,

    default_country: String,
    default_metadata: PhoneMetadata,
    current_metadata: PhoneMetadata,
}

impl<'a> AsYouTypeFormatter<'a> {
    pub(crate) fn new(util: &'a PhoneNumberUtil, region_code: &str) -> Self {
        let mut formatter = Self {
            util,
            regex_cache: RegexCache::with_capacity(64),
            national_prefix_separators_pattern: Regex::new("[- ]").unwrap(),
            current_output: String::new(),
            formatting_template: String::new(),
            current_formatting_pattern: String::new(),
            accrued_input: String::new(),
            accrued_input_without_formatting: String::new(),
            able_to_format: true,
            input_has_formatting: false,
            is_complete_number: false,
            is_expecting_country_calling_code: false,
            last_match_position: 0,
            original_position: 0,
            position_to_remember: 0,
            prefix_before_national_number: String::new(),
            should_add_space_after_national_prefix: false,
            extracted_national_prefix: String::new(),
            national_number: String::new(),
            possible_formats: Vec::new(),
            default_country: region_code.to_string(),
            default_metadata: PhoneMetadata::new(),
            current_metadata: PhoneMetadata::new(),
        };
        formatter.default_metadata = formatter.metadata_for_region(region_code);
        formatter.current_metadata = formatter.default_metadata.clone();
        formatter
    }

    /// The metadata needed by this class is the same for all regions sharing a
    /// country calling code. Therefore, we return the metadata for the "main"
    /// region for this country calling code.
    fn metadata_for_region(&self, region_code: &str) -> PhoneMetadata {
        let country_calling_code = self.util.get_country_code_for_region(region_code);
        let main_country = self
            .util
            .get_region_code_for_country_code(country_calling_code);
        match self.util.get_metadata_for_region(main_country) {
            Some(metadata) => metadata.clone(),
            // Set to a default instance of the metadata. This allows us to
            // function with an incorrect region code, even if formatting only
            // works for numbers specified with "+".
            None => empty_metadata(),
        }
    }

    fn regex_for(&self, pattern: &str) -> Arc<Regex> {
        valid_metadata_regex(self.regex_cache.get_regex(pattern))
    }

    /// Clears the internal state of the formatter, so it can be reused.
    pub fn clear(&mut self) {
        self.current_output.clear();
        self.accrued_input.clear();
        self.accrued_input_without_formatting.clear();
        self.formatting_template.clear();
        self.last_match_position = 0;
        self.current_formatting_pattern.clear();
        self.prefix_before_national_number.clear();
        self.extracted_national_prefix.clear();
        self.national_number.clear();
        self.able_to_format = true;
        self.input_has_formatting = false;
        self.position_to_remember = 0;
        self.original_position = 0;
        self.is_complete_number = false;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.should_add_space_after_national_prefix = false;
        if self.current_metadata != self.default_metadata {
            self.current_metadata = self.metadata_for_region(&self.default_country);
        }
    }

    /// Formats a phone number on-the-fly as each digit is entered. Returns the
    /// partially formatted number so far, or the raw accrued input if the
    /// number can no longer be formatted.
    pub fn input_digit(&mut self, next_char: char) -> &str {
        self.current_output =
            self.input_digit_with_option_to_remember_position(next_char, false);
        &self.current_output
    }

    /// Same as `input_digit`, but remembers the position where next_char is
    /// inserted, so that it can be retrieved later by using
    /// `get_remembered_position`. The remembered position will be automatically
    /// adjusted if additional formatting characters are later inserted or
    /// removed in front of next_char.
    pub fn input_digit_and_remember_position(&mut self, next_char: char) -> &str {
        self.current_output = self.input_digit_with_option_to_remember_position(next_char, true);
        &self.current_output
    }

    /// Returns the national prefix extracted from the input so far, or an
    /// empty string if none was seen.
    pub fn get_extracted_national_prefix(&self) -> &str {
        &self.extracted_national_prefix
    }

    /// Returns the current position in the partially formatted phone number of
    /// the character which was previously passed in as the parameter of
    /// `input_digit_and_remember_position`, counted in characters.
    pub fn get_remembered_position(&self) -> usize {
        if !self.able_to_format {
            return self.original_position;
        }
        let without_formatting: Vec<char> =
            self.accrued_input_without_formatting.chars().collect();
        let output: Vec<char> = self.current_output.chars().collect();
        let mut accrued_input_index = 0;
        let mut current_output_index = 0;
        while accrued_input_index < self.position_to_remember
            && current_output_index < output.len()
        {
            if without_formatting[accrued_input_index] == output[current_output_index] {
                accrued_input_index += 1;
            }
            current_output_index += 1;
        }
        current_output_index
    }

    fn input_digit_with_option_to_remember_position(
        &mut self,
        next_char: char,
        remember_position: bool,
    ) -> String {
        self.accrued_input.push(next_char);
        if remember_position {
            self.original_position = self.accrued_input.chars().count();
        }
        // We do formatting on-the-fly only when each character entered is
        // either a digit, or a plus sign (accepted at the start of the number
        // only).
        let next_char = if !self.is_digit_or_leading_plus_sign(next_char) {
            self.able_to_format = false;
            self.input_has_formatting = true;
            next_char
        } else {
            self.normalize_and_accrue_digits_and_plus_sign(next_char, remember_position)
        };
        if !self.able_to_format {
            // When we are unable to format because of reasons other than that
            // formatting chars have been entered, it can be due to really long
            // IDDs or NDDs. If that is the case, we might be able to do
            // formatting again after extracting them.
            if self.input_has_formatting {
                return self.accrued_input.clone();
            } else if self.attempt_to_extract_idd() {
                if self.attempt_to_extract_country_calling_code() {
                    return self.attempt_to_choose_pattern_with_prefix_extracted();
                }
            } else if self.able_to_extract_longer_ndd() {
                // Add an additional space to separate long NDD and national
                // significant number for readability. We don't set
                // should_add_space_after_national_prefix to true, since we
                // don't want this to change later when we choose formatting
                // templates.
                self.prefix_before_national_number
                    .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
                return self.attempt_to_choose_pattern_with_prefix_extracted();
            }
            return self.accrued_input.clone();
        }
        // We start to attempt to format only when at least
        // MIN_LEADING_DIGITS_LENGTH digits (the plus sign is counted as a
        // digit as well for this purpose) have been entered.
        match self.accrued_input_without_formatting.chars().count() {
            0..=2 => self.accrued_input.clone(),
            len => {
                if len == MIN_LEADING_DIGITS_LENGTH {
                    if self.attempt_to_extract_idd() {
                        self.is_expecting_country_calling_code = true;
                    } else {
                        // No IDD or plus sign is found, might be entering in
                        // national format.
                        self.extracted_national_prefix =
                            self.remove_national_prefix_from_national_number();
                        return self.attempt_to_choose_formatting_pattern();
                    }
                }
                if self.is_expecting_country_calling_code {
                    if self.attempt_to_extract_country_calling_code() {
                        self.is_expecting_country_calling_code = false;
                    }
                    return fast_cat::concat_str!(
                        &self.prefix_before_national_number,
                        &self.national_number
                    );
                }
                if !self.possible_formats.is_empty() {
                    // The formatting patterns are already chosen.
                    let temp_national_number = self.input_digit_helper(next_char);
                    // See if the accrued digits can be formatted properly
                    // already. If not, use the results from input_digit_helper,
                    // which does formatting based on the formatting pattern
                    // chosen.
                    let formatted_number = self.attempt_to_format_accrued_digits();
                    if !formatted_number.is_empty() {
                        return formatted_number;
                    }
                    let leading_digits = self.national_number.clone();
                    self.narrow_down_possible_formats(&leading_digits);
                    if self.maybe_create_new_template() {
                        return self.input_accrued_national_number();
                    }
                    if self.able_to_format {
                        self.append_national_number(&temp_national_number)
                    } else {
                        self.accrued_input.clone()
                    }
                } else {
                    self.attempt_to_choose_formatting_pattern()
                }
            }
        }
    }

    fn attempt_to_choose_pattern_with_prefix_extracted(&mut self) -> String {
        self.able_to_format = true;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.last_match_position = 0;
        self.formatting_template.clear();
        self.current_formatting_pattern.clear();
        self.attempt_to_choose_formatting_pattern()
    }

    /// Some national prefixes are a substring of others. If extracting the
    /// shorter NDD doesn't produce a number we can format, we try to see if we
    /// can extract a longer version here.
    fn able_to_extract_longer_ndd(&mut self) -> bool {
        if !self.extracted_national_prefix.is_empty() {
            // Put the extracted NDD back to the national number before
            // attempting to extract a new NDD.
            self.national_number
                .insert_str(0, &self.extracted_national_prefix);
            // Remove the previously extracted NDD from
            // prefix_before_national_number. We cannot simply set it to empty
            // string because people sometimes incorrectly enter national
            // prefix after the country code, e.g. +44 (0)20-1234-5678.
            if let Some(index_of_previous_ndd) = self
                .prefix_before_national_number
                .rfind(&self.extracted_national_prefix)
            {
                self.prefix_before_national_number
                    .truncate(index_of_previous_ndd);
            }
        }
        let new_national_prefix = self.remove_national_prefix_from_national_number();
        self.extracted_national_prefix != new_national_prefix
    }

    fn is_digit_or_leading_plus_sign(&self, next_char: char) -> bool {
        normalized_digit(next_char).is_some()
            || (self.accrued_input.chars().count() == 1
                && self
                    .util
                    .starts_with_plus_chars_pattern(next_char.encode_utf8(&mut [0u8; 4])))
    }

    /// Checks to see if there is an exact pattern match for these digits. If
    /// so, we should use this instead of any other formatting template whose
    /// leadingDigitsPattern also matches the input.
    fn attempt_to_format_accrued_digits(&mut self) -> String {
        for index in 0..self.possible_formats.len() {
            let number_format = self.possible_formats[index].clone();
            let pattern = self.regex_for(number_format.pattern());
            if !pattern.full_match(&self.national_number) {
                continue;
            }
            self.should_add_space_after_national_prefix = self
                .national_prefix_separators_pattern
                .is_match(number_format.national_prefix_formatting_rule());
            let formatted_number = pattern
                .replace_all(&self.national_number, number_format.format())
                .into_owned();
            // Check that we did not remove nor add any extra digits when we
            // matched this formatting pattern. This usually happens after we
            // entered the last digit during AYTF. For example just before the
            // last digit is entered, "909/777" and "90977/7" could both be
            // candidate outputs, but only the one preserving the input
            // digit-for-digit is safe to return.
            let full_output = self.append_national_number(&formatted_number);
            let formatted_number_digits_only =
                self.util.normalize_diallable_chars_only(&full_output);
            if formatted_number_digits_only == self.accrued_input_without_formatting {
                return full_output;
            }
        }
        String::new()
    }

    /// Combines the national number with any prefix (IDD/+ and country code or
    /// national prefix) that was collected.
    fn append_national_number(&self, national_number: &str) -> String {
        let needs_separator = self.should_add_space_after_national_prefix
            && !self.prefix_before_national_number.is_empty()
            && !self
                .prefix_before_national_number
                .ends_with(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        if needs_separator {
            // We want to add a space after the national prefix if the national
            // prefix formatting rule indicates that this would normally be
            // done, with the exception of the case where we already appended a
            // space because the NDD was surprisingly long.
            fast_cat::concat_str!(
                &self.prefix_before_national_number,
                " ",
                national_number
            )
        } else {
            fast_cat::concat_str!(&self.prefix_before_national_number, national_number)
        }
    }

    /// Attempts to set the formatting template and assigns the passed-in
    /// string as the formatted version of the digits entered so far.
    fn attempt_to_choose_formatting_pattern(&mut self) -> String {
        // We start to attempt to format only when at least
        // MIN_LEADING_DIGITS_LENGTH digits of national number (excluding
        // national prefix) have been entered.
        if self.national_number.len() >= MIN_LEADING_DIGITS_LENGTH {
            let leading_digits = self.national_number.clone();
            self.get_available_formats(&leading_digits);
            // See if the accrued digits can be formatted properly already.
            let formatted_number = self.attempt_to_format_accrued_digits();
            if !formatted_number.is_empty() {
                return formatted_number;
            }
            if self.maybe_create_new_template() {
                self.input_accrued_national_number()
            } else {
                self.accrued_input.clone()
            }
        } else {
            self.append_national_number(&self.national_number)
        }
    }

    /// Invokes input_digit_helper on each digit of the national number
    /// accrued, and returns a formatted string in the end.
    fn input_accrued_national_number(&mut self) -> String {
        let national_number: Vec<char> = self.national_number.chars().collect();
        if national_number.is_empty() {
            return self.prefix_before_national_number.clone();
        }
        let mut temp_national_number = String::new();
        for digit in national_number {
            temp_national_number = self.input_digit_helper(digit);
        }
        if self.able_to_format {
            self.append_national_number(&temp_national_number)
        } else {
            self.accrued_input.clone()
        }
    }

    /// Returns true if the current country is a NANPA country and the national
    /// number begins with the national prefix. National significant numbers in
    /// NANPA always start with [2-9] after the national prefix; numbers
    /// beginning with 1[01] can only be short or emergency numbers, which
    /// don't need the national prefix.
    fn is_nanpa_number_with_national_prefix(&self) -> bool {
        if self.current_metadata.country_code() != 1 {
            return false;
        }
        let mut chars = self.national_number.chars();
        chars.next() == Some('1') && !matches!(chars.next(), Some('0') | Some('1') | None)
    }

    /// Returns the national prefix extracted, or an empty string if it is not
    /// present.
    fn remove_national_prefix_from_national_number(&mut self) -> String {
        let mut start_of_national_number = 0;
        if self.is_nanpa_number_with_national_prefix() {
            start_of_national_number = 1;
            self.prefix_before_national_number.push('1');
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
            self.is_complete_number = true;
        } else if self.current_metadata.has_national_prefix_for_parsing() {
            let pattern = self.regex_for(self.current_metadata.national_prefix_for_parsing());
            // Since some national prefix patterns are entirely optional, check
            // that a national prefix could actually be extracted.
            let match_end = pattern
                .find_start(&self.national_number)
                .map(|matched| matched.end())
                .unwrap_or(0);
            if match_end > 0 {
                // When the national prefix is detected, we use international
                // formatting rules instead of national ones, because national
                // formatting rules could countain local formatting rules for
                // numbers entered without area code.
                self.is_complete_number = true;
                start_of_national_number = match_end;
                let extracted = self.national_number[..start_of_national_number].to_string();
                self.prefix_before_national_number.push_str(&extracted);
            }
        }
        let national_prefix = self.national_number[..start_of_national_number].to_string();
        self.national_number.drain(..start_of_national_number);
        national_prefix
    }

    /// Extracts the IDD from accrued_input_without_formatting when the number
    /// starts with a plus sign or the region's international prefix. Returns
    /// true if one was extracted.
    fn attempt_to_extract_idd(&mut self) -> bool {
        let idd_pattern_string = fast_cat::concat_str!(
            "\\+|",
            self.current_metadata.international_prefix()
        );
        let idd_pattern = self.regex_for(&idd_pattern_string);
        let Some(start_of_country_calling_code) = idd_pattern
            .find_start(&self.accrued_input_without_formatting)
            .map(|matched| matched.end())
        else {
            return false;
        };
        self.is_complete_number = true;
        self.national_number = self.accrued_input_without_formatting
            [start_of_country_calling_code..]
            .to_string();
        self.prefix_before_national_number = self.accrued_input_without_formatting
            [..start_of_country_calling_code]
            .to_string();
        if !self.accrued_input_without_formatting.starts_with('+') {
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        }
        true
    }

    /// Extracts the country calling code from the beginning of the national
    /// number, switching the metadata in use to that country. Returns true if
    /// a country calling code was extracted.
    fn attempt_to_extract_country_calling_code(&mut self) -> bool {
        if self.national_number.is_empty() {
            return false;
        }
        let full_number = std::mem::take(&mut self.national_number);
        let Some((country_code, number_without_country_calling_code)) =
            self.util.extract_country_code(&full_number)
        else {
            self.national_number = full_number;
            return false;
        };
        self.national_number = number_without_country_calling_code.to_string();
        let new_region_code = self.util.get_region_code_for_country_code(country_code);
        if new_region_code == i18n::RegionCode::un001() {
            if let Some(metadata) = self
                .util
                .get_metadata_for_non_geographical_region(country_code)
            {
                self.current_metadata = metadata.clone();
            }
        } else if new_region_code != self.default_country {
            self.current_metadata = self.metadata_for_region(new_region_code);
        }
        let mut buf = itoa::Buffer::new();
        self.prefix_before_national_number
            .push_str(buf.format(country_code));
        self.prefix_before_national_number
            .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        // When we have successfully extracted the IDD, the previously
        // extracted NDD should be cleared because it is no longer valid.
        self.extracted_national_prefix.clear();
        true
    }

    /// Accrues digits and the plus sign to accrued_input_without_formatting
    /// for later use. If next_char contains a digit in non-ASCII format (e.g.
    /// the full-width version of digits), it is first normalized to the ASCII
    /// version. The return value is next_char itself, or its normalized
    /// version.
    fn normalize_and_accrue_digits_and_plus_sign(
        &mut self,
        next_char: char,
        remember_position: bool,
    ) -> char {
        let normalized_char = if next_char == '+' {
            self.accrued_input_without_formatting.push(next_char);
            next_char
        } else {
            let digit = normalized_digit(next_char).unwrap_or(next_char);
            self.accrued_input_without_formatting.push(digit);
            self.national_number.push(digit);
            digit
        };
        if remember_position {
            self.position_to_remember = self.accrued_input_without_formatting.chars().count();
        }
        normalized_char
    }

    fn get_available_formats(&mut self, leading_digits: &str) {
        // The formatting patterns are typically number_format, but hold
        // intl_number_format instead when the number is entered in
        // international format (with a prefix such as IDD, and no national
        // prefix extracted).
        let is_international_number =
            self.is_complete_number && self.extracted_national_prefix.is_empty();
        let format_list =
            if is_international_number && !self.current_metadata.intl_number_format.is_empty() {
                self.current_metadata.intl_number_format.clone()
            } else {
                self.current_metadata.number_format.clone()
            };
        for format in format_list {
            let national_prefix_formatting_rule = format.national_prefix_formatting_rule();
            if !self.extracted_national_prefix.is_empty()
                && self
                    .util
                    .formatting_rule_has_first_group_only(national_prefix_formatting_rule)
                && !format.national_prefix_optional_when_formatting()
                && !format.has_domestic_carrier_code_formatting_rule()
            {
                // If it is a national number that had a national prefix, any
                // rules that aren't valid with a national prefix should be
                // excluded. A rule that has a carrier-code formatting rule is
                // kept since the national prefix might actually be an
                // extracted carrier code - we don't distinguish between these
                // when extracting.
                continue;
            }
            if self.extracted_national_prefix.is_empty()
                && !self.is_complete_number
                && !self
                    .util
                    .formatting_rule_has_first_group_only(national_prefix_formatting_rule)
                && !format.national_prefix_optional_when_formatting()
            {
                // This number was entered without a national prefix, and this
                // formatting rule requires one, so we discard it.
                continue;
            }
            if self
                .util
                .is_format_eligible_for_as_you_type_formatter(format.format())
            {
                self.possible_formats.push(format);
            }
        }
        self.narrow_down_possible_formats(leading_digits);
    }

    fn narrow_down_possible_formats(&mut self, leading_digits: &str) {
        let index_of_leading_digits_pattern =
            leading_digits.len().saturating_sub(MIN_LEADING_DIGITS_LENGTH);
        let regex_cache = &self.regex_cache;
        self.possible_formats.retain(|format| {
            if format.leading_digits_pattern.is_empty() {
                // Keep everything that isn't restricted by leading digits.
                return true;
            }
            let last_leading_digits_pattern = index_of_leading_digits_pattern
                .min(format.leading_digits_pattern.len() - 1);
            let pattern = valid_metadata_regex(
                regex_cache.get_regex(&format.leading_digits_pattern[last_leading_digits_pattern]),
            );
            pattern.matches_start(leading_digits)
        });
    }

    fn maybe_create_new_template(&mut self) -> bool {
        // When there are multiple available formats, the formatter uses the
        // first format where a formatting template could be created.
        let mut index = 0;
        while index < self.possible_formats.len() {
            let number_format = self.possible_formats[index].clone();
            let pattern = number_format.pattern();
            if self.current_formatting_pattern == pattern {
                return false;
            }
            if self.create_formatting_template(&number_format) {
                self.current_formatting_pattern = pattern.to_string();
                self.should_add_space_after_national_prefix = self
                    .national_prefix_separators_pattern
                    .is_match(number_format.national_prefix_formatting_rule());
                // With a new formatting template, the matched position using
                // the old template needs to be reset.
                self.last_match_position = 0;
                return true;
            }
            self.possible_formats.remove(index);
        }
        self.able_to_format = false;
        false
    }

    fn create_formatting_template(&mut self, number_format: &NumberFormat) -> bool {
        let temp_template =
            self.get_formatting_template(number_format.pattern(), number_format.format());
        self.formatting_template.clear();
        if temp_template.is_empty() {
            return false;
        }
        self.formatting_template.push_str(&temp_template);
        true
    }

    /// Builds a placeholder string out of the pattern and number format, or
    /// returns an empty string when the digits entered so far exceed what the
    /// rule can accommodate.
    fn get_formatting_template(&self, number_pattern: &str, number_format: &str) -> String {
        let pattern = self.regex_for(number_pattern);
        let Some(matched) = pattern.find(LONGEST_PHONE_NUMBER) else {
            return String::new();
        };
        let a_phone_number = matched.as_str();
        // No formatting template can be created if the number of digits
        // entered so far is longer than the maximum the current formatting
        // rule can accommodate.
        if a_phone_number.len() < self.national_number.len() {
            return String::new();
        }
        // Format the number according to number_format, then replace each
        // digit with the placeholder.
        let template = pattern.replace(a_phone_number, number_format);
        template.replace('9', DIGIT_PLACEHOLDER_STR)
    }

    /// Fills the next placeholder of the template with next_char and returns
    /// the formatted prefix of the template up to that position.
    fn input_digit_helper(&mut self, next_char: char) -> String {
        let chars: Vec<char> = self.formatting_template.chars().collect();
        let placeholder_position = chars
            .iter()
            .enumerate()
            .skip(self.last_match_position)
            .find(|(_, template_char)| **template_char == DIGIT_PLACEHOLDER)
            .map(|(position, _)| position);
        match placeholder_position {
            Some(position) => {
                let mut chars = chars;
                chars[position] = next_char;
                self.formatting_template = chars.iter().collect();
                self.last_match_position = position;
                chars[..=position].iter().collect()
            }
            None => {
                if self.possible_formats.len() == 1 {
                    // More digits are entered than we could handle, and there
                    // are no other valid patterns to try.
                    self.able_to_format = false;
                }
                // Just reset the formatting pattern: another one may still fit.
                self.current_formatting_pattern.clear();
                self.accrued_input.clone()
            }
        }
    }
}

/// Folds any Unicode decimal digit to its ASCII value; `None` for non-digits.
fn normalized_digit(character: char) -> Option<char> {
    let mut buf = [0u8; 4];
    let folded = dec_from_char::normalize_decimals(character.encode_utf8(&mut buf));
    let folded: &str = folded.as_ref();
    folded.chars().next().filter(char::is_ascii_digit)
}
