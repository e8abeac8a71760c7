//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic; this module turns it into the
//! `{success:false, error, code, traceId?, details?}` envelope and a status
//! code. Internal errors keep their domain message, which services phrase
//! for callers, but their details are withheld unless diagnostic mode was
//! switched on at startup.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

static DIAGNOSTIC_ERRORS: AtomicBool = AtomicBool::new(false);

/// Expose internal error messages and details to clients.
///
/// Meant for staging; set once during startup.
pub fn set_diagnostic_errors(enabled: bool) {
    DIAGNOSTIC_ERRORS.store(enabled, Ordering::Relaxed);
}

fn diagnostic_errors() -> bool {
    DIAGNOSTIC_ERRORS.load(Ordering::Relaxed)
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub error: &'a str,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the envelope, hiding internal details unless `diagnostic` is set.
pub(crate) fn error_body(error: &Error, diagnostic: bool) -> ErrorBody<'_> {
    let redact = error.code() == ErrorCode::InternalError && !diagnostic;
    ErrorBody {
        success: false,
        error: error.message(),
        code: error.code(),
        trace_id: error.trace_id(),
        details: if redact { None } else { error.details() },
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(
                message = self.message(),
                details = ?self.details(),
                trace_id = ?self.trace_id(),
                "internal error returned to client"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(error_body(self, diagnostic_errors()))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
