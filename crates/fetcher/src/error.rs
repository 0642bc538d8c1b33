use statuswatch_catalog::Entry;
use thiserror::Error;
use url::Url;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, FetchError>;

/// A failed status fetch, with enough context to log actionable
/// diagnostics regardless of which provider failed: the URL being
/// fetched, the strategy that raised it, and the catalog entry being
/// processed. The original cause is chained, never discarded.
#[derive(Debug, Error)]
#[error("{fetcher} fetch for entry {entry_id} ({url}) failed: {kind}")]
pub struct FetchError {
    /// The URL being fetched when the error occurred.
    pub url: String,

    /// Name of the fetcher strategy that raised the error.
    pub fetcher: &'static str,

    /// Identifier of the catalog entry being processed.
    pub entry_id: String,

    /// The underlying cause.
    #[source]
    pub kind: FetchErrorKind,
}

impl FetchError {
    /// Wrap a cause with fetch context.
    #[must_use]
    pub fn new(fetcher: &'static str, entry: &Entry, url: &Url, kind: FetchErrorKind) -> Self {
        Self {
            url: url.to_string(),
            fetcher,
            entry_id: entry.id.clone(),
            kind,
        }
    }
}

/// Causes of a failed fetch.
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    /// Transport-level failure: timeout, connection error, or a 5xx that
    /// survived every retry.
    #[error(transparent)]
    Transport(#[from] statuswatch_transport::Error),

    /// Terminal non-2xx response (4xx range; never retried).
    #[error("unexpected HTTP status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// Response body did not match the provider's expected shape.
    /// Terminal; retrying will not fix a format mismatch.
    #[error("response did not match the expected schema: {0}")]
    Schema(String),

    /// The provider default endpoint could not be derived from the
    /// entry's status page URL.
    #[error("could not build endpoint: {0}")]
    InvalidEndpoint(String),

    /// A custom API entry without an explicit endpoint; custom APIs have
    /// no implicit discovery.
    #[error("custom API entry has no endpoint configured")]
    MissingEndpoint,

    /// A deliberately stubbed-out sub-parser. Surfaced verbatim so
    /// operators see the feature gap instead of a silently wrong status.
    #[error("{0} parser is not implemented")]
    NotImplemented(&'static str),
}
