use http::StatusCode;
use thiserror::Error;
pub use url::ParseError as UrlParseError;

/// Error types for the Prime Infrastructure API client.
#[derive(Error, Debug)]
pub enum PrimeError {
    /// A local precondition failed before any request was sent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The device or identifier does not exist on the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("Remote error ({status}): {body}")]
    RemoteError { status: StatusCode, body: String },

    /// The server answered, but the body did not have the expected shape.
    #[error("Unexpected response ({status}): {reason}")]
    UnexpectedResponse {
        status: StatusCode,
        reason: String,
        body: String,
    },

    /// An IP address lookup matched more than one device.
    #[error("{ip_address} matched {count} devices")]
    AmbiguousMatch { ip_address: String, count: u64 },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// HTTP request failed without a response.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error parsing URL.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] UrlParseError),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

impl PrimeError {
    /// Classifies a transport failure, keeping timeouts apart from other
    /// connection errors.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PrimeError::Timeout(err.to_string())
        } else {
            PrimeError::HttpError(err)
        }
    }
}

/// Result type for Prime Infrastructure API operations.
pub type PrimeResult<T> = Result<T, PrimeError>;
