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

/// How the country code of a parsed number was found in the input, recorded
/// only by `parse_and_keep_raw_input`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CountryCodeSource {
    #[default]
    Unspecified,
    FromNumberWithPlusSign,
    FromNumberWithIdd,
    FromNumberWithoutPlusSign,
    FromDefaultCountry,
}

/// A parsed phone number.
///
/// Fields follow protobuf presence semantics: `Option` distinguishes "never
/// set" from "set to the default", the accessors return the proto default for
/// unset fields, and the derived equality/hash treat presence as significant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    pub country_code: Option<i32>,
    pub national_number: Option<u64>,
    pub extension: Option<String>,
    /// An Italian-style number keeps its leading zero as part of the national
    /// significant number; the zero cannot be stored in `national_number`.
    pub italian_leading_zero: Option<bool>,
    pub number_of_leading_zeros: Option<i32>,
    pub raw_input: Option<String>,
    pub country_code_source: Option<CountryCodeSource>,
    pub preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    pub fn set_country_code(&mut self, value: i32) {
        self.country_code = Some(value);
    }

    pub fn clear_country_code(&mut self) {
        self.country_code = None;
    }

    pub fn national_number(&self) -> u64 {
        self.national_number.unwrap_or(0)
    }

    pub fn has_national_number(&self) -> bool {
        self.national_number.is_some()
    }

    pub fn set_national_number(&mut self, value: u64) {
        self.national_number = Some(value);
    }

    pub fn clear_national_number(&mut self) {
        self.national_number = None;
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or_default()
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, value: impl Into<String>) {
        self.extension = Some(value.into());
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn has_italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.is_some()
    }

    pub fn set_italian_leading_zero(&mut self, value: bool) {
        self.italian_leading_zero = Some(value);
    }

    pub fn clear_italian_leading_zero(&mut self) {
        self.italian_leading_zero = None;
    }

    /// Unlike the other fields this one defaults to 1: a number flagged with
    /// `italian_leading_zero` has one zero unless stated otherwise.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_number_of_leading_zeros(&self) -> bool {
        self.number_of_leading_zeros.is_some()
    }

    pub fn set_number_of_leading_zeros(&mut self, value: i32) {
        self.number_of_leading_zeros = Some(value);
    }

    pub fn clear_number_of_leading_zeros(&mut self) {
        self.number_of_leading_zeros = None;
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or_default()
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, value: impl Into<String>) {
        self.raw_input = Some(value.into());
    }

    pub fn clear_raw_input(&mut self) {
        self.raw_input = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn set_country_code_source(&mut self, value: CountryCodeSource) {
        self.country_code_source = Some(value);
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = None;
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or_default()
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, value: impl Into<String>) {
        self.preferred_domestic_carrier_code = Some(value.into());
    }

    pub fn clear_preferred_domestic_carrier_code(&mut self) {
        self.preferred_domestic_carrier_code = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
