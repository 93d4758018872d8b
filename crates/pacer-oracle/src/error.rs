//! Oracle error types.

use thiserror::Error;

/// Errors from the ranking oracle and task parser.
///
/// The coordinator treats every variant the same way: keep the input order
/// and leave the cache alone.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No usable configuration (missing API key or endpoint).
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The LLM API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The reply could not be turned into a ranking or draft.
    #[error("parse error: {0}")]
    Parse(String),
}
