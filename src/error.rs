use std::sync::Arc;

use reqwest::StatusCode;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or sending a submission.
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// A required environment variable is unset or empty.
    #[error("{0} is not set")]
    MissingVariable(&'static str),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// The signing secret cannot be used as an HMAC key.
    #[error("signing secret cannot be used as an HMAC key")]
    InvalidSigningSecret,

    /// The payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialization(#[source] Arc<serde_json::Error>),

    /// Network error.
    #[error(transparent)]
    Network(Arc<reqwest::Error>),

    /// The endpoint answered with something other than 200 OK.
    #[error("expected status code 200, got {status}, body: {body}")]
    UnexpectedStatus {
        /// Status code returned by the endpoint.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The response body is not the expected JSON object.
    #[error("unexpected response body: {body}")]
    InvalidResponse {
        /// Parse failure.
        #[source]
        source: Arc<serde_json::Error>,
        /// Raw response body.
        body: String,
    },

    /// The endpoint answered with `success: false`.
    #[error("submission was not accepted (success: false), body: {body}")]
    Rejected {
        /// Raw response body.
        body: String,
    },

    /// The endpoint accepted the submission but returned no receipt.
    #[error("submission was accepted but the response has no receipt")]
    MissingReceipt,
}

impl Error {
    /// Returns `true` if the error was detected before anything was sent.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingVariable(_) | Error::InvalidEndpoint(_) | Error::InvalidSigningSecret
        )
    }

    /// Process exit code for this error: `2` for configuration problems, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Network(Arc::new(value))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(Arc::new(value))
    }
}
