//! Shared validation helpers for inbound HTTP adapters.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{BulkDeletionRequestError, Error};

/// Largest JSON body accepted by any endpoint.
const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Longest folder name accepted by the gallery listing.
const FOLDER_MAX_LEN: usize = 128;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidJson,
    InvalidValue,
    EmptyList,
    BlankIdentifier,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::EmptyList => "empty_list",
            ErrorCode::BlankIdentifier => "blank_identifier",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ErrorCode::MissingField,
    )
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, expected: &str) -> Error {
    Error::invalid_request(format!("{} must be {expected}", field.as_str())).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

/// Map a rejected deletion batch onto a field-level validation error.
pub(crate) fn bulk_deletion_error(field: FieldName, err: BulkDeletionRequestError) -> Error {
    match err {
        BulkDeletionRequestError::Empty => field_error(
            field,
            format!("{} must contain at least one identifier", field.as_str()),
            ErrorCode::EmptyList,
        ),
        BulkDeletionRequestError::BlankIdentifier { index } => {
            Error::invalid_request(format!("{} must not contain blank entries", field.as_str()))
                .with_details(json!({
                    "field": field.as_str(),
                    "index": index,
                    "code": ErrorCode::BlankIdentifier.as_str(),
                }))
        }
    }
}

/// Normalise an optional gallery folder, falling back to `default`.
///
/// Folders are slash-separated segments of ASCII letters, digits, `-` and
/// `_`. Empty and `..` segments are rejected.
pub(crate) fn parse_folder(
    value: Option<&str>,
    default: &str,
    field: FieldName,
) -> Result<String, Error> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(default.to_owned());
    };
    let trimmed = raw.trim_matches('/');
    let valid = !trimmed.is_empty()
        && trimmed.len() <= FOLDER_MAX_LEN
        && trimmed.split('/').all(|segment| {
            !segment.is_empty()
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        });
    if valid {
        Ok(trimmed.to_owned())
    } else {
        Err(invalid_value_error(
            field,
            raw,
            "a folder path of letters, digits, '-' or '_'",
        ))
    }
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected JSON body");
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body too large".to_owned()
        }
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid JSON body: {inner}"),
        _ => "invalid JSON body".to_owned(),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
        .into()
}

/// JSON extractor configuration shared by every endpoint.
///
/// Malformed bodies produce the standard error envelope instead of Actix's
/// plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const FOLDER: FieldName = FieldName::new("folder");

    #[rstest]
    #[case(None, "wedding")]
    #[case(Some("   "), "wedding")]
    #[case(Some("reception"), "reception")]
    #[case(Some("/wedding/day-1/"), "wedding/day-1")]
    #[case(Some("guests_2026"), "guests_2026")]
    fn folder_accepts_safe_paths(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(
            parse_folder(raw, "wedding", FOLDER).expect("valid folder"),
            expected
        );
    }

    #[rstest]
    #[case("../secrets")]
    #[case("a//b")]
    #[case("photos?max=1")]
    #[case("/")]
    fn folder_rejects_unsafe_paths(#[case] raw: &str) {
        let err = parse_folder(Some(raw), "wedding", FOLDER).expect_err("rejected");

        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "folder");
        assert_eq!(details["code"], "invalid_value");
    }

    #[rstest]
    fn empty_batch_names_the_field() {
        let err = bulk_deletion_error(
            FieldName::new("publicIds"),
            BulkDeletionRequestError::Empty,
        );

        assert_eq!(err.message(), "publicIds must contain at least one identifier");
        assert_eq!(err.details().expect("details")["code"], "empty_list");
    }

    #[rstest]
    fn blank_entry_reports_its_index() {
        let err = bulk_deletion_error(
            FieldName::new("publicIds"),
            BulkDeletionRequestError::BlankIdentifier { index: 2 },
        );

        assert_eq!(err.details().expect("details")["index"], 2);
    }

    #[rstest]
    fn missing_field_message_names_field() {
        let err = missing_field_error(FieldName::new("action"));

        assert_eq!(err.message(), "missing required field: action");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }
}
