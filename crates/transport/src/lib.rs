//! Resilient HTTP layer for status fetching: timeout-bounded fetch,
//! retry with exponential backoff and jitter, and deduplication of
//! concurrent identical in-flight requests.
//!
//! The three capabilities compose as layers around one raw HTTP call:
//! [`fetch_with_timeout`] bounds a single attempt, [`fetch_with_retry`]
//! loops timeout-bounded attempts with backoff, and [`Deduplicator`]
//! collapses concurrent callers of the same request onto one retrying
//! fetch.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod dedup;
mod error;
mod retry;

pub use dedup::Deduplicator;
pub use error::{Error, Result};
pub use retry::{RetryPredicate, default_retry_predicate, fetch_with_retry, fetch_with_retry_using};

use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

pub use reqwest::Method;

/// Tunables for the resilient transport.
#[derive(Clone, Copy, Debug)]
pub struct FetchOptions {
    /// Budget for one attempt, including reading the body.
    pub timeout: Duration,

    /// Additional attempts after the first.
    pub max_retries: u32,

    /// Delay before the first retry; doubles each retry after that.
    pub initial_delay: Duration,

    /// Upper bound on any retry delay, jitter included.
    pub max_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(5000),
        }
    }
}

impl FetchOptions {
    /// Set the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial backoff delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Set the backoff delay cap.
    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }
}

/// One outbound request, described independently of the HTTP client so it
/// can double as the deduplication key.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// A GET request to `url` with no extra headers.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
        }
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Composite deduplication key: URL, method, and the serialized
    /// (sorted) header set. Requests differing in any component are
    /// never deduplicated together.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        let mut headers = self.headers.clone();
        headers.sort();
        let headers = headers
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{} {} [{headers}]", self.method, self.url)
    }

    fn build(&self, client: &Client) -> reqwest::RequestBuilder {
        let mut builder = client.request(self.method.clone(), self.url.clone());
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        builder
    }
}

/// A fully read response. Owned and clonable so deduplicated callers can
/// all receive it.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    /// The response status code.
    pub status: StatusCode,

    /// The response body, decoded as text.
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Perform one attempt, bounded by `timeout`. The budget covers the whole
/// attempt including reading the body; when it elapses the in-flight call
/// is dropped (aborting the connection) and a descriptive
/// [`Error::Timeout`] naming the URL and duration is returned.
///
/// # Errors
///
/// Returns [`Error::Timeout`] when the budget elapses, or [`Error::Http`]
/// on a transport-level failure. Non-2xx statuses are not errors at this
/// layer.
pub async fn fetch_with_timeout(
    client: &Client,
    request: &FetchRequest,
    timeout: Duration,
) -> Result<FetchResponse> {
    let attempt = async {
        let response = request.build(client).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            url: request.url.to_string(),
            timeout,
        }),
    }
}
