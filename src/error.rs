// src/error.rs
//! Error types for the Notion client.
//!
//! There are four, non-overlapping ways a call can fail:
//! the request could not be formed locally, the network round trip did not
//! complete, the server answered with an error, or the server answered with
//! a success body we could not decode. The last two carry the raw response
//! bytes so a caller can diagnose them without re-issuing the call.

use crate::types::ValidationError;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// The request body could not be decoded as JSON
    InvalidJson,
    /// The request URL is not valid
    InvalidRequestUrl,
    /// This request is not supported
    InvalidRequest,
    /// Request body does not match the schema for the expected parameters
    ValidationFailed,
    /// Bearer token is not valid
    Unauthorized,
    /// The integration lacks permission for this resource
    RestrictedResource,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// Transaction could not be completed, potentially due to a data collision
    Conflict,
    /// Request rate limit exceeded
    RateLimited,
    /// Unexpected server-side error
    InternalServerError,
    /// Notion is unavailable or the request timed out server-side
    ServiceUnavailable,
    /// The error body was not the structured error JSON
    HttpStatus(u16),
    /// A code this client does not know yet
    Unknown(String),
}

impl ApiErrorCode {
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationFailed,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "object_not_found" => Self::ObjectNotFound,
            "conflict_error" => Self::Conflict,
            "rate_limited" => Self::RateLimited,
            "internal_server_error" => Self::InternalServerError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether a caller could reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited
            | Self::Conflict
            | Self::InternalServerError
            | Self::ServiceUnavailable => true,
            Self::HttpStatus(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::InvalidRequestUrl => write!(f, "invalid_request_url"),
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InternalServerError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(status) => write!(f, "http_{}", status),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Boxed transport failure, so any HTTP stack can be plugged in.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure an endpoint operation can report.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameters failed local validation; nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The round trip did not complete (DNS, connect, TLS, timeout, cancellation).
    #[error("Network failure: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status.
    #[error("Notion API returned an error ({code}, HTTP {status}): {message}")]
    Api {
        status: u16,
        code: ApiErrorCode,
        message: String,
        raw: Vec<u8>,
    },

    /// The server answered with success but the body did not decode.
    #[error("Malformed response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: Vec<u8>,
    },
}

impl Error {
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// The verbatim response body, when a response was received.
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            Self::Api { raw, .. } | Self::Decode { raw, .. } => Some(raw),
            Self::InvalidRequest(_) | Self::Transport { .. } => None,
        }
    }

    pub fn api_code(&self) -> Option<&ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failures and transient API codes are retryable; the client
    /// itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { code, .. } => code.is_retryable(),
            Self::InvalidRequest(_) | Self::Decode { .. } => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_vocabulary_round_trips_through_display() {
        for code in [
            "invalid_json",
            "invalid_request_url",
            "invalid_request",
            "validation_error",
            "unauthorized",
            "restricted_resource",
            "object_not_found",
            "conflict_error",
            "rate_limited",
            "internal_server_error",
            "service_unavailable",
        ] {
            assert_eq!(ApiErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            ApiErrorCode::from_api_response("brand_new_code"),
            ApiErrorCode::Unknown("brand_new_code".to_string())
        );
    }

    #[test]
    fn test_retry_classification() {
        assert!(ApiErrorCode::RateLimited.is_retryable());
        assert!(ApiErrorCode::HttpStatus(503).is_retryable());
        assert!(!ApiErrorCode::ObjectNotFound.is_retryable());
        assert!(!ApiErrorCode::HttpStatus(400).is_retryable());

        let err = Error::InvalidRequest(ValidationError::MissingParent);
        assert!(!err.is_retryable());
        assert!(err.raw_body().is_none());
    }

    #[test]
    fn test_api_error_display_and_raw_body() {
        let err = Error::Api {
            status: 404,
            code: ApiErrorCode::ObjectNotFound,
            message: "Could not find page".to_string(),
            raw: b"{}".to_vec(),
        };
        assert_eq!(
            err.to_string(),
            "Notion API returned an error (object_not_found, HTTP 404): Could not find page"
        );
        assert_eq!(err.raw_body(), Some(&b"{}"[..]));
        assert_eq!(err.status(), Some(404));
        assert!(err.api_code().unwrap().is_not_found());
    }
}
