use thiserror::Error;

/// Result type alias for array API operations
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Errors that can occur when talking to the array management API
#[derive(Debug, Error)]
pub enum ArrayError {
    /// The array name or an endpoint did not form a valid URL
    #[error("Invalid array URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Failed to read the response body
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The array rejected the API token
    #[error("Login failed: HTTP {status} - {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Response body returned by the array
        message: String,
    },

    /// A query was attempted on a session whose login failed
    #[error("Session is not authenticated")]
    NotAuthenticated,

    /// The array returned a non-200 response to a query
    #[error("Array API error: HTTP {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body returned by the array
        message: String,
    },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ArrayError {
    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    ///
    /// The client never retries on its own; this is for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::ReadBody(err) => err.is_timeout(),
            Self::Authentication { status, .. } | Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status code for errors caused by a non-200 response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
