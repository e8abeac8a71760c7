//! RSVP records and submission validation.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::AccessCode;

/// Maximum goodwill message length in Unicode scalar values.
pub const GOODWILL_MESSAGE_MAX: usize = 250;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validation failures for [`RsvpSubmission::try_from_parts`].
///
/// The display strings are returned to guests verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RsvpValidationError {
    #[error("name and email required")]
    MissingRequiredField { field: &'static str },
    #[error("invalid email format")]
    InvalidEmail,
    #[error("message too long")]
    MessageTooLong { max: usize, length: usize },
}

impl RsvpValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field } => field,
            Self::InvalidEmail => "email",
            Self::MessageTooLong { .. } => "goodwillMessage",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::MessageTooLong { .. } => "message_too_long",
        }
    }
}

/// A validated guest submission, trimmed and ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpSubmission {
    name: String,
    email: String,
    goodwill_message: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl RsvpSubmission {
    /// Validate raw form input, stopping at the first failure.
    ///
    /// # Examples
    /// ```
    /// use wedding_backend::domain::{RsvpSubmission, RsvpValidationError};
    ///
    /// let ok = RsvpSubmission::try_from_parts(Some(" Ada "), Some("ada@example.com"), Some("  "))
    ///     .expect("valid submission");
    /// assert_eq!(ok.name(), "Ada");
    /// assert!(ok.goodwill_message().is_none());
    ///
    /// let err = RsvpSubmission::try_from_parts(Some("Ada"), Some("nope"), None).unwrap_err();
    /// assert_eq!(err, RsvpValidationError::InvalidEmail);
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        goodwill_message: Option<&str>,
    ) -> Result<Self, RsvpValidationError> {
        let name = non_blank(name).ok_or(RsvpValidationError::MissingRequiredField { field: "name" })?;
        let email =
            non_blank(email).ok_or(RsvpValidationError::MissingRequiredField { field: "email" })?;
        if !email_regex().is_match(email) {
            return Err(RsvpValidationError::InvalidEmail);
        }

        let goodwill_message = non_blank(goodwill_message);
        if let Some(message) = goodwill_message {
            let length = message.chars().count();
            if length > GOODWILL_MESSAGE_MAX {
                return Err(RsvpValidationError::MessageTooLong {
                    max: GOODWILL_MESSAGE_MAX,
                    length,
                });
            }
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            goodwill_message: goodwill_message.map(str::to_owned),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn goodwill_message(&self) -> Option<&str> {
        self.goodwill_message.as_deref()
    }
}

/// A submission paired with the access code it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub submission: RsvpSubmission,
    pub access_code: AccessCode,
}

/// Stored RSVP record.
///
/// `id` and `created_at` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goodwill_message: Option<String>,
    pub access_code: AccessCode,
    pub created_at: DateTime<Utc>,
}

/// What a guest gets back after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpReceipt {
    pub name: String,
    pub email: String,
    pub access_code: AccessCode,
}

impl From<&Rsvp> for RsvpReceipt {
    fn from(value: &Rsvp) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            access_code: value.access_code.clone(),
        }
    }
}
