//! Brazilian individual taxpayer number (CPF), used as the student's national ID.
//!
//! A national ID is exactly 11 ASCII digits. The last two are check digits
//! computed from the preceding ones with a mod-11 weighted sum, and numbers
//! made of a single repeated digit are rejected even though their check
//! digits happen to match.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationError;

pub const NATIONAL_ID_LENGTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NationalIdError {
    /// Not exactly 11 digits.
    InvalidFormat,
    /// Well formed, but the check digits do not match.
    InvalidChecksum,
}

impl std::error::Error for NationalIdError {}

impl fmt::Display for NationalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => f.write_str("national ID must have exactly 11 digits"),
            Self::InvalidChecksum => f.write_str("national ID check digits do not match"),
        }
    }
}

/// A national ID whose format and check digits have been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "52998224725")]
pub struct NationalId(String);

impl NationalId {
    /// Parses a raw value, trimming surrounding whitespace first.
    pub fn parse(raw: &str) -> Result<Self, NationalIdError> {
        let digits = raw.trim();
        if !has_valid_format(digits) {
            return Err(NationalIdError::InvalidFormat);
        }
        if !has_valid_check_digits(digits) {
            return Err(NationalIdError::InvalidChecksum);
        }
        Ok(Self(digits.to_string()))
    }

    /// Completes nine base digits with their two check digits.
    ///
    /// Returns `None` when every base digit is the same.
    pub fn from_base(base: [u8; 9]) -> Option<Self> {
        if base.iter().any(|d| *d > 9) || base.iter().all(|d| *d == base[0]) {
            return None;
        }

        let mut digits = base.to_vec();
        digits.push(check_digit(&digits));
        digits.push(check_digit(&digits));

        Some(Self(digits.iter().map(|d| char::from(b'0' + d)).collect()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NationalId {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn has_valid_format(value: &str) -> bool {
    value.len() == NATIONAL_ID_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// Weighted mod-11 check digit. Weights run from `digits.len() + 1` down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (weight_start - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        r => r as u8,
    }
}

fn has_valid_check_digits(value: &str) -> bool {
    let digits: Vec<u8> = value.bytes().map(|b| b - b'0').collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// `validator` rule: the trimmed value must be exactly 11 digits.
///
/// Check digits are verified separately so that a checksum mismatch can be
/// reported with its own error kind.
pub fn validate_national_id_format(value: &str) -> Result<(), ValidationError> {
    if has_valid_format(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("national_id_format")
            .with_message(Cow::Borrowed("national_id must have exactly 11 digits")))
    }
}
