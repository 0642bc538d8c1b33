//! Generic custom JSON API strategy.
//!
//! Only active when an entry carries an explicit custom API config, and
//! only with an explicit endpoint; there is no implicit discovery for
//! ad-hoc APIs. A named sub-parser handles one vendor's community-style
//! incident feed; without one, the strategy keyword-sniffs common status
//! fields.

use async_trait::async_trait;
use serde::Deserialize;
use statuswatch_catalog::{ApiConfig, CustomParser, Entry, Provider};
use statuswatch_model::{Severity, StatusResult, infer_status};
use url::Url;

use super::{WireTimestamp, decode, get_json, now_ms, severity_from_keywords};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::{FetchError, FetchErrorKind, Result};

const NAME: &str = "custom";

/// Fetches an explicitly configured JSON endpoint and interprets it via
/// a named sub-parser or keyword sniffing.
pub struct CustomFetcher;

/// Community-style status feed: a status string plus an incident list
/// where `outage`-typed incidents drive major severity.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct CommunityFeed {
    status: String,
    date_created: WireTimestamp,
    date_updated: WireTimestamp,
    active_incidents: Vec<CommunityIncident>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct CommunityIncident {
    id: serde_json::Value,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    status: String,
    services: serde_json::Value,
}

fn map_community_feed(feed: &CommunityFeed, updated_at: i64) -> StatusResult {
    feed.active_incidents.first().map_or_else(
        || StatusResult {
            severity: Severity::None,
            status: infer_status(&feed.status, Severity::None),
            description: feed.status.clone(),
            updated_at,
            timezone: None,
        },
        |first| {
            let severity = if feed
                .active_incidents
                .iter()
                .any(|incident| incident.kind.eq_ignore_ascii_case("outage"))
            {
                Severity::Major
            } else {
                Severity::Minor
            };
            StatusResult {
                severity,
                status: infer_status(&first.title, severity),
                description: first.title.clone(),
                updated_at,
                timezone: None,
            }
        },
    )
}

/// Fields the sniffer inspects, in order.
const SNIFF_FIELDS: &[&str] = &["status", "state", "health", "description", "message"];

fn sniff_status_text(value: &serde_json::Value) -> Option<String> {
    let object = value.as_object()?;
    SNIFF_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(|v| v.as_str()))
        .map(ToString::to_string)
}

fn map_sniffed(text: &str) -> StatusResult {
    let severity = severity_from_keywords(text);
    StatusResult {
        severity,
        status: infer_status(text, severity),
        description: text.to_string(),
        updated_at: now_ms(),
        timezone: None,
    }
}

fn config(entry: &Entry) -> Option<(Option<&Url>, Option<CustomParser>)> {
    match &entry.api_config {
        Some(ApiConfig::Custom { endpoint, parser }) => Some((endpoint.as_ref(), *parser)),
        _ => None,
    }
}

#[async_trait]
impl Fetcher for CustomFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        entry
            .api_config
            .as_ref()
            .is_some_and(|config| config.kind() == Provider::Custom)
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let Some((endpoint, parser)) = config(entry) else {
            return Err(FetchError::new(
                NAME,
                entry,
                &entry.status_page_url,
                FetchErrorKind::MissingEndpoint,
            ));
        };
        let Some(url) = endpoint.cloned() else {
            return Err(FetchError::new(
                NAME,
                entry,
                &entry.status_page_url,
                FetchErrorKind::MissingEndpoint,
            ));
        };

        match parser {
            Some(CustomParser::Rss) => Err(FetchError::new(
                NAME,
                entry,
                &url,
                FetchErrorKind::NotImplemented("rss"),
            )),
            Some(CustomParser::CommunityFeed) => {
                let body = get_json(ctx, NAME, entry, &url).await?;
                let feed: CommunityFeed = decode(NAME, entry, &url, &body)?;
                let updated_at = feed.date_updated.clone().into_epoch_ms().map_err(|msg| {
                    FetchError::new(NAME, entry, &url, FetchErrorKind::Schema(msg))
                })?;
                Ok(map_community_feed(&feed, updated_at))
            }
            None => {
                let body = get_json(ctx, NAME, entry, &url).await?;
                let value: serde_json::Value = decode(NAME, entry, &url, &body)?;
                sniff_status_text(&value).map_or_else(
                    || {
                        Err(FetchError::new(
                            NAME,
                            entry,
                            &url,
                            FetchErrorKind::Schema(
                                "no status/state/health/description/message field".to_string(),
                            ),
                        ))
                    },
                    |text| Ok(map_sniffed(&text)),
                )
            }
        }
    }
}
