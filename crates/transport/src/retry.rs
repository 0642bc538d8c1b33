//! Retry loop with exponential backoff and jitter.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::{FetchOptions, FetchRequest, FetchResponse, fetch_with_timeout};

/// Decides whether an attempt's failure is worth retrying. Receives the
/// error and the 0-based index of the attempt that just failed.
pub type RetryPredicate = fn(&Error, u32) -> bool;

/// The default retry policy: network failures and 5xx responses are
/// retried; a timeout is retried only when the very first attempt timed
/// out, since repeated timeouts usually mean the endpoint is unreachable
/// rather than transiently slow.
#[must_use]
pub fn default_retry_predicate(error: &Error, attempt: u32) -> bool {
    match error {
        Error::Timeout { .. } => attempt == 0,
        Error::Http(_) | Error::Status { .. } => true,
    }
}

/// Fetch with the default retry policy. See [`fetch_with_retry_using`].
///
/// # Errors
///
/// Propagates the last observed error once retries are exhausted.
pub async fn fetch_with_retry(
    client: &Client,
    request: &FetchRequest,
    options: &FetchOptions,
) -> Result<FetchResponse> {
    fetch_with_retry_using(client, request, options, default_retry_predicate).await
}

/// Fetch with retries. Responses in the 2xx-4xx range are returned
/// immediately (4xx is a terminal client error, not worth repeating);
/// 5xx responses and transport errors are retried up to
/// `options.max_retries` additional attempts, subject to `predicate`.
/// Attempts are strictly sequential, separated by an exponential backoff
/// delay with ±25% jitter.
///
/// # Errors
///
/// Returns the last observed error once retries are exhausted or the
/// predicate declines a retry. A persistent 5xx surfaces as
/// [`Error::Status`].
pub async fn fetch_with_retry_using(
    client: &Client,
    request: &FetchRequest,
    options: &FetchOptions,
    predicate: RetryPredicate,
) -> Result<FetchResponse> {
    let mut attempt = 0;

    loop {
        debug!(url = %request.url(), attempt, "fetching");

        let error = match fetch_with_timeout(client, request, options.timeout).await {
            Ok(response) if response.status.is_server_error() => Error::Status {
                url: request.url().to_string(),
                status: response.status.as_u16(),
            },
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        if attempt >= options.max_retries || !predicate(&error, attempt) {
            return Err(error);
        }

        let delay = backoff_delay(options, attempt);
        warn!(url = %request.url(), attempt, ?delay, %error, "retrying after error");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Backoff before retry `retry_index` (0-based): the initial delay doubled
/// per retry, jittered by ±25%, and clamped to `max_delay`.
fn backoff_delay(options: &FetchOptions, retry_index: u32) -> Duration {
    let base = base_delay(options, retry_index);
    let jitter = 0.75 + fastrand::f64() * 0.5;
    base.mul_f64(jitter).min(options.max_delay)
}

fn base_delay(options: &FetchOptions, retry_index: u32) -> Duration {
    options
        .initial_delay
        .saturating_mul(2u32.saturating_pow(retry_index))
        .min(options.max_delay)
}
