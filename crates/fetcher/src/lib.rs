//! Provider-specific status fetcher strategies and their registry.
//!
//! Each strategy implements [`Fetcher`]: a capability predicate over a
//! catalog entry plus a fetch operation that queries the provider's
//! status API through the resilient transport and maps the provider's
//! native vocabulary into the canonical [`StatusResult`]. Strategies are
//! held in an insertion-ordered [`FetcherRegistry`]; when several claim
//! the same entry, registry order decides.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod context;
mod error;
pub mod fetchers;
mod registry;

pub use context::FetchContext;
pub use error::{FetchError, FetchErrorKind, Result};
pub use registry::FetcherRegistry;

use async_trait::async_trait;
use statuswatch_catalog::Entry;
use statuswatch_model::StatusResult;

/// A provider-specific fetch strategy.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Stable strategy name, used in error context and logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy can claim `entry`. A pure predicate over the
    /// entry's explicit API config kind, its provider tag, and/or a
    /// substring heuristic on the status page URL. Several strategies may
    /// claim the same entry; the registry's insertion order decides.
    fn can_handle(&self, entry: &Entry) -> bool;

    /// Fetch and normalize the entry's current status.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] wrapping the underlying cause (transport,
    /// HTTP, schema, or configuration) with the URL, strategy name, and
    /// entry id.
    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult>;
}
