//! Ordered strategy registry.

use statuswatch_catalog::Entry;

use crate::Fetcher;
use crate::fetchers::{
    CustomFetcher, HtmlFetcher, IncidentIoFetcher, InstatusFetcher, StatusPageFetcher,
    UptimeFetcher,
};

/// Insertion-ordered list of fetcher strategies.
///
/// Selection is "first strategy whose capability check succeeds";
/// overlapping `can_handle` results are resolved by registry order, not
/// by specificity. The canonical order puts the JSON API strategies
/// before the generic custom strategy, with the HTML fallback last.
pub struct FetcherRegistry {
    fetchers: Vec<Box<dyn Fetcher>>,
}

impl FetcherRegistry {
    /// The canonical registry: statuspage, uptime, incidentio, instatus,
    /// custom, html.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            fetchers: vec![
                Box::new(StatusPageFetcher),
                Box::new(UptimeFetcher),
                Box::new(IncidentIoFetcher),
                Box::new(InstatusFetcher),
                Box::new(CustomFetcher),
                Box::new(HtmlFetcher),
            ],
        }
    }

    /// A registry with an explicit strategy list, in selection order.
    #[must_use]
    pub const fn new(fetchers: Vec<Box<dyn Fetcher>>) -> Self {
        Self { fetchers }
    }

    /// The first strategy that claims `entry`, if any.
    #[must_use]
    pub fn find_for(&self, entry: &Entry) -> Option<&dyn Fetcher> {
        self.fetchers
            .iter()
            .map(|fetcher| &**fetcher)
            .find(|fetcher| fetcher.can_handle(entry))
    }

    /// All strategies, in selection order.
    pub fn fetchers(&self) -> impl Iterator<Item = &dyn Fetcher> {
        self.fetchers.iter().map(|fetcher| &**fetcher)
    }

    /// Strategy names, in selection order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.fetchers.iter().map(|fetcher| fetcher.name()).collect()
    }
}
