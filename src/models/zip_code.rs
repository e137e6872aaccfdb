use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A five digit US zip code.
///
/// Validation happens before anything reaches the description resolver; the
/// resolver itself never rejects input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZipCodeError {
    #[error("Zip code cannot be null or empty.")]
    Empty,
    #[error("Invalid zip code format. Must be 5 digits.")]
    InvalidFormat,
}

impl ZipCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ZipCodeError::Empty);
        }
        if s.len() != 5 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipCodeError::InvalidFormat);
        }
        Ok(ZipCode(s.to_string()))
    }
}

impl TryFrom<String> for ZipCode {
    type Error = ZipCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZipCode> for String {
    fn from(zip_code: ZipCode) -> Self {
        zip_code.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
