use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A base62 token identifying a shortened URL.
///
/// Codes coming from trusted generators are built with
/// [`ShortCode::new_unchecked`]; anything read from a request goes through
/// [`ShortCode::parse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

/// Longest code a `u64` draw can encode to in base62.
pub const MAX_LENGTH: usize = 11;

impl ShortCode {
    /// Parses a short code, accepting only `[0-9a-zA-Z]` and at most
    /// [`MAX_LENGTH`] characters.
    ///
    /// The empty string is accepted: it is what the generator produces for
    /// the number zero.
    pub fn parse(code: impl Into<String>) -> std::result::Result<Self, ShortenerError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Extracts the code from a full short URL.
    ///
    /// The base URL prefix is stripped when present; otherwise the input is
    /// treated as a bare code.
    pub fn from_url(input: &str, base_url: &str) -> std::result::Result<Self, ShortenerError> {
        let base = base_url.trim_end_matches('/');
        let code = input
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(input);
        Self::parse(code)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), ShortenerError> {
        if code.len() > MAX_LENGTH {
            return Err(ShortenerError::InvalidShortCode(format!(
                "length must be at most {}, got {}",
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ShortenerError::InvalidShortCode(format!(
                "must contain only base62 characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}
