use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::{PrimeError, PrimeResult};

/// Code attached to a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An HTTP status, either passed through or translated (404 for devices
    /// that do not exist).
    Http(u16),
    /// The request was rejected locally and never sent.
    Validation,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The connection failed before a response arrived.
    Transport,
    /// An IP address lookup matched several devices.
    Ambiguous,
}

impl ErrorCode {
    /// The HTTP status carried by this code, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ErrorCode::Http(status) => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Http(status) => write!(f, "{status}"),
            ErrorCode::Validation => f.write_str("validation"),
            ErrorCode::Timeout => f.write_str("timeout"),
            ErrorCode::Transport => f.write_str("transport"),
            ErrorCode::Ambiguous => f.write_str("ambiguous"),
        }
    }
}

/// Why an operation failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error_code}: {message}")]
pub struct Failure {
    pub error_code: ErrorCode,
    /// Human-readable description, or the raw response body.
    pub message: String,
    /// The response body parsed as JSON, when the server sent JSON.
    pub details: Option<Value>,
}

impl Failure {
    pub fn new(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
            details: None,
        }
    }
}

fn parse_details(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

impl From<PrimeError> for Failure {
    fn from(err: PrimeError) -> Self {
        match err {
            PrimeError::ValidationError(message) => Failure::new(ErrorCode::Validation, message),
            PrimeError::NotFound(message) => Failure::new(ErrorCode::Http(404), message),
            PrimeError::RemoteError { status, body } => Failure {
                error_code: ErrorCode::Http(status.as_u16()),
                details: parse_details(&body),
                message: body,
            },
            PrimeError::UnexpectedResponse {
                status,
                reason,
                body,
            } => Failure {
                error_code: ErrorCode::Http(status.as_u16()),
                details: parse_details(&body),
                message: reason,
            },
            err @ PrimeError::AmbiguousMatch { .. } => {
                Failure::new(ErrorCode::Ambiguous, err.to_string())
            }
            PrimeError::Timeout(message) => Failure::new(ErrorCode::Timeout, message),
            err @ PrimeError::HttpError(_) => Failure::new(ErrorCode::Transport, err.to_string()),
            err @ (PrimeError::UrlParseError(_)
            | PrimeError::SerializationError(_)
            | PrimeError::ConfigurationError(_)) => {
                Failure::new(ErrorCode::Validation, err.to_string())
            }
        }
    }
}

/// The uniform result of every inventory operation.
///
/// Operations never return `Err`; inspect the variant (or [`Outcome::is_success`])
/// instead. `Failure` details are meant for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success { data: T, message: Option<String> },
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Outcome::Success {
            data,
            message: None,
        }
    }

    /// Attaches a confirmation message to a successful outcome. Failures are
    /// returned unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Outcome::Success { data, .. } => Outcome::Success {
                data,
                message: Some(message.into()),
            },
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success { data, .. } => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Success { data, .. } => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(failure) => Some(failure.error_code),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { message, .. } => message.as_deref(),
            Outcome::Failure(failure) => Some(&failure.message),
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(failure) => failure.details.as_ref(),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success { data, .. } => Ok(data),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<PrimeResult<T>> for Outcome<T> {
    fn from(result: PrimeResult<T>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(err) => Outcome::Failure(err.into()),
        }
    }
}
