//! Guest access codes.
//!
//! Codes have the shape `WED-XXXXX-YYYY` where every `X`/`Y` is drawn from
//! `[A-Z0-9]`. Uniqueness is not a property of the value itself; see
//! [`crate::domain::AccessCodeIssuer`] and the store-level constraint.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Alphabet every generated character is drawn from.
pub const ACCESS_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const PREFIX: &str = "WED";
const FIRST_GROUP_LEN: usize = 5;
const SECOND_GROUP_LEN: usize = 4;

static ACCESS_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn access_code_regex() -> &'static Regex {
    ACCESS_CODE_RE.get_or_init(|| {
        Regex::new(r"^WED-[A-Z0-9]{5}-[A-Z0-9]{4}$")
            .unwrap_or_else(|error| panic!("access code regex failed to compile: {error}"))
    })
}

/// Validation errors returned by [`AccessCode::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessCodeValidationError {
    #[error("access code must match WED-XXXXX-YYYY using A-Z and 0-9")]
    Malformed,
}

/// Validated guest access code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessCode(String);

impl AccessCode {
    /// Validate and wrap an access code.
    ///
    /// # Examples
    /// ```
    /// use wedding_backend::domain::AccessCode;
    ///
    /// assert!(AccessCode::new("WED-AB12C-9XYZ").is_ok());
    /// assert!(AccessCode::new("wed-ab12c-9xyz").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, AccessCodeValidationError> {
        let value = value.into();
        if access_code_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(AccessCodeValidationError::Malformed)
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AccessCode> for String {
    fn from(value: AccessCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccessCode {
    type Error = AccessCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Source of access code candidates.
///
/// Implementations produce one candidate per call and make no uniqueness
/// promise.
#[cfg_attr(test, mockall::automock)]
pub trait AccessCodeGenerator: Send + Sync {
    fn generate(&self) -> AccessCode;
}

/// Generator drawing every character uniformly from [`ACCESS_CODE_ALPHABET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAccessCodeGenerator;

impl RandomAccessCodeGenerator {
    fn random_group<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
        (0..len)
            .map(|_| {
                let index = rng.gen_range(0..ACCESS_CODE_ALPHABET.len());
                char::from(ACCESS_CODE_ALPHABET.get(index).copied().unwrap_or(b'0'))
            })
            .collect()
    }

    /// Build a code from an explicit RNG; used by tests for determinism.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> AccessCode {
        let first = Self::random_group(rng, FIRST_GROUP_LEN);
        let second = Self::random_group(rng, SECOND_GROUP_LEN);
        AccessCode(format!("{PREFIX}-{first}-{second}"))
    }
}

impl AccessCodeGenerator for RandomAccessCodeGenerator {
    fn generate(&self) -> AccessCode {
        Self::generate_with(&mut rand::thread_rng())
    }
}
