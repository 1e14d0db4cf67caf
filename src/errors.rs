/*!
 * Error types for the td-translate library.
 *
 * Errors are defined with the thiserror crate. Provider errors describe
 * transport-level failures of the upstream translation API; translation
 * errors wrap them for the orchestrator.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when the API response body cannot be decoded
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Non-success HTTP status returned by the API
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that abort a translation request
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The upstream request gate was closed while waiting for a permit
    #[error("Upstream request gate closed")]
    GateClosed,
}
