use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in this crate.
///
/// `Clone` so that a deduplicated in-flight call can hand the same failure
/// to every waiting caller; non-clonable causes are `Arc`-wrapped.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The request did not complete within its timeout budget.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// The URL being fetched.
        url: String,

        /// The configured timeout.
        timeout: Duration,
    },

    /// Transport-level failure (connect, TLS, body read).
    #[error(transparent)]
    Http(Arc<reqwest::Error>),

    /// A 5xx response that survived every retry attempt.
    #[error("server error {status} from {url}")]
    Status {
        /// The URL being fetched.
        url: String,

        /// The HTTP status code.
        status: u16,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Arc::new(err))
    }
}
