//! Shared fetch dependencies, built once by the composition root.

use reqwest::Client;
use statuswatch_transport::{Deduplicator, FetchOptions};

static USER_AGENT: &str = concat!("statuswatch/", env!("CARGO_PKG_VERSION"));

/// Everything a fetcher strategy needs to perform a resilient fetch: the
/// shared HTTP client, the request deduplicator, and the transport
/// tunables. Constructed once and passed to whoever fetches, so the
/// deduplication map's lifetime is explicit rather than hidden module
/// state.
#[derive(Clone, Debug)]
pub struct FetchContext {
    client: Client,
    dedup: Deduplicator,
    options: FetchOptions,
}

impl FetchContext {
    /// Build a context with the given transport options. The HTTP client
    /// identifies the caller via a `User-Agent` header on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS
    /// backend initialization failure).
    pub fn new(options: FetchOptions) -> Result<Self, statuswatch_transport::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            dedup: Deduplicator::new(),
            options,
        })
    }

    /// The shared HTTP client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// The shared request deduplicator.
    #[must_use]
    pub const fn dedup(&self) -> &Deduplicator {
        &self.dedup
    }

    /// The transport tunables.
    #[must_use]
    pub const fn options(&self) -> &FetchOptions {
        &self.options
    }
}
