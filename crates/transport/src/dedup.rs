//! Deduplication of concurrent identical in-flight requests.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::Client;
use tracing::debug;

use crate::error::Result;
use crate::{FetchOptions, FetchRequest, FetchResponse, fetch_with_retry};

type InFlight = Shared<BoxFuture<'static, Result<FetchResponse>>>;

/// Collapses concurrent identical requests onto one network call.
///
/// Keyed by URL, method, and header set. While a call for a key is in
/// flight, further calls for the same key await the same shared future
/// instead of hitting the network. The entry is removed when the call
/// settles, so a later call for the same key fetches fresh.
///
/// Constructed once by the composition root and cloned into whoever
/// fetches; clones share the same in-flight map.
#[derive(Clone, Debug, Default)]
pub struct Deduplicator {
    inflight: Arc<DashMap<String, InFlight>>,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Fetch `request`, sharing the result with any concurrent caller
    /// holding an identical request. The underlying call goes through
    /// [`fetch_with_retry`], so all callers share one retry sequence.
    ///
    /// # Errors
    ///
    /// Propagates the shared call's transport error; every waiting caller
    /// receives a clone of the same failure.
    pub async fn fetch(
        &self,
        client: &Client,
        request: FetchRequest,
        options: FetchOptions,
    ) -> Result<FetchResponse> {
        let key = request.dedup_key();

        let shared = match self.inflight.entry(key.clone()) {
            Entry::Occupied(occupied) => {
                debug!(%key, "joining in-flight request");
                occupied.get().clone()
            }
            Entry::Vacant(vacant) => {
                let client = client.clone();
                let inflight = Arc::clone(&self.inflight);
                let shared = async move {
                    let result = fetch_with_retry(&client, &request, &options).await;
                    inflight.remove(&key);
                    result
                }
                .boxed()
                .shared();
                vacant.insert(shared.clone());
                shared
            }
        };

        shared.await
    }
}
