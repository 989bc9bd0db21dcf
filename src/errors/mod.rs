//! Error types for rate fetching and conversion.

use thiserror::Error;

/// Errors surfaced by rate providers.
///
/// Transport failures are classified at the point of catch via
/// [`from_reqwest`](Self::from_reqwest); there is no retry or fallback
/// anywhere, every failure propagates to the caller.
#[derive(Error, Debug)]
pub enum RateError {
    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error: {provider} returned status {status}")]
    Http {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The connection to the provider could not be established.
    #[error("Connection error: {provider}")]
    Connection {
        /// The provider that could not be reached
        provider: String,
    },

    /// Any other transport-level failure.
    #[error("Request error: {provider} - {message}")]
    Request {
        /// The provider the request was sent to
        provider: String,
        /// The error message from the transport layer
        message: String,
    },

    /// The provider's payload could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the malformed data
        message: String,
    },

    /// A conversion was requested for a code absent from the fetched set.
    #[error("Invalid currency code or no rate found: {code}")]
    InvalidCurrency {
        /// The missing currency code
        code: String,
    },

    /// Unclassified fallback.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RateError {
    /// Classify a reqwest failure into the error taxonomy.
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_connect() {
            Self::Connection {
                provider: provider.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Http {
                provider: provider.to_string(),
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::Parse {
                message: err.to_string(),
            }
        } else {
            Self::Request {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }
}
