//! The provider strategy implementations.

mod custom;
mod html;
mod incidentio;
mod instatus;
mod statuspage;
mod uptime;

pub use custom::CustomFetcher;
pub use html::HtmlFetcher;
pub use incidentio::IncidentIoFetcher;
pub use instatus::InstatusFetcher;
pub use statuspage::StatusPageFetcher;
pub use uptime::UptimeFetcher;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use statuswatch_catalog::Entry;
use statuswatch_model::Severity;
use statuswatch_transport::FetchRequest;
use tracing::debug;
use url::Url;

use crate::context::FetchContext;
use crate::error::{FetchError, FetchErrorKind};

/// GET a JSON endpoint through the deduplicating resilient transport.
/// Non-2xx responses (the terminal 4xx range; 5xx already exhausted its
/// retries inside the transport) become [`FetchErrorKind::Http`].
pub(crate) async fn get_json(
    ctx: &FetchContext,
    fetcher: &'static str,
    entry: &Entry,
    url: &Url,
) -> Result<String, FetchError> {
    let request = FetchRequest::get(url.clone()).with_header("accept", "application/json");
    get_body(ctx, fetcher, entry, url, request).await
}

/// GET an endpoint as text, without the JSON accept header.
pub(crate) async fn get_text(
    ctx: &FetchContext,
    fetcher: &'static str,
    entry: &Entry,
    url: &Url,
) -> Result<String, FetchError> {
    let request = FetchRequest::get(url.clone());
    get_body(ctx, fetcher, entry, url, request).await
}

async fn get_body(
    ctx: &FetchContext,
    fetcher: &'static str,
    entry: &Entry,
    url: &Url,
    request: FetchRequest,
) -> Result<String, FetchError> {
    debug!(fetcher, entry = %entry.id, %url, "fetching provider endpoint");
    let response = ctx
        .dedup()
        .fetch(ctx.client(), request, *ctx.options())
        .await
        .map_err(|err| FetchError::new(fetcher, entry, url, err.into()))?;

    if response.is_success() {
        Ok(response.body)
    } else {
        Err(FetchError::new(
            fetcher,
            entry,
            url,
            FetchErrorKind::Http {
                status: response.status.as_u16(),
            },
        ))
    }
}

/// Strictly decode a provider response body. Extra fields are ignored;
/// missing required fields are a hard schema error.
pub(crate) fn decode<T: DeserializeOwned>(
    fetcher: &'static str,
    entry: &Entry,
    url: &Url,
    body: &str,
) -> Result<T, FetchError> {
    serde_json::from_str(body)
        .map_err(|err| FetchError::new(fetcher, entry, url, FetchErrorKind::Schema(err.to_string())))
}

/// Derive a default endpoint by appending a provider-specific path to the
/// entry's status page URL.
pub(crate) fn endpoint_from_page(
    fetcher: &'static str,
    entry: &Entry,
    path: &str,
) -> Result<Url, FetchError> {
    let base = entry.status_page_url.as_str().trim_end_matches('/');
    let candidate = format!("{base}/{path}");
    Url::parse(&candidate).map_err(|err| {
        FetchError::new(
            fetcher,
            entry,
            &entry.status_page_url,
            FetchErrorKind::InvalidEndpoint(format!("{candidate}: {err}")),
        )
    })
}

/// Timestamp as providers actually send them: ISO-8601 text or Unix
/// seconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireTimestamp {
    /// Unix seconds.
    Seconds(i64),

    /// ISO-8601 / RFC 3339 text.
    Text(String),
}

impl WireTimestamp {
    /// Convert to epoch milliseconds.
    pub(crate) fn into_epoch_ms(self) -> Result<i64, String> {
        match self {
            Self::Seconds(seconds) => seconds
                .checked_mul(1000)
                .ok_or_else(|| format!("timestamp {seconds} out of range")),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.timestamp_millis())
                .map_err(|err| format!("invalid timestamp {text:?}: {err}")),
        }
    }
}

/// Decode a wire timestamp field, attributing failures to the schema.
pub(crate) fn epoch_ms(
    fetcher: &'static str,
    entry: &Entry,
    url: &Url,
    timestamp: WireTimestamp,
) -> Result<i64, FetchError> {
    timestamp
        .into_epoch_ms()
        .map_err(|msg| FetchError::new(fetcher, entry, url, FetchErrorKind::Schema(msg)))
}

/// Current time in epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Coarse severity inferred from status keywords. Shared by the custom
/// keyword sniffer and the HTML fallback.
pub(crate) fn severity_from_keywords(text: &str) -> Severity {
    let text = text.to_lowercase();

    if text.contains("operational") || text.contains("all systems") {
        return Severity::None;
    }
    if text.contains("degraded") || text.contains("partial") {
        return Severity::Minor;
    }
    if text.contains("outage") || text.contains("down") {
        return Severity::Major;
    }

    Severity::None
}
