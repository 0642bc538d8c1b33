//! Hosted status page strategy (Atlassian Statuspage-style summary API).

use async_trait::async_trait;
use serde::Deserialize;
use statuswatch_catalog::{Entry, Provider};
use statuswatch_model::{Severity, StatusResult, infer_status};
use url::Url;

use super::{WireTimestamp, decode, endpoint_from_page, epoch_ms, get_json};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::Result;

const NAME: &str = "statuspage";

/// Fetches the `/api/v2/summary.json` endpoint of a hosted status page
/// and passes the indicator straight through as severity, deriving the
/// canonical status from the indicator plus the free-text description.
pub struct StatusPageFetcher;

#[derive(Debug, Deserialize)]
struct Summary {
    page: Page,
    status: PageStatus,
}

// `id`, `name` and `url` are required by the summary schema; decoding
// them is what makes their absence a hard failure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Page {
    id: String,
    name: String,
    url: String,
    timezone: Option<String>,
    updated_at: WireTimestamp,
}

#[derive(Debug, Deserialize)]
struct PageStatus {
    indicator: Indicator,
    description: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Indicator {
    None,
    Minor,
    Major,
    Critical,
}

impl From<Indicator> for Severity {
    fn from(indicator: Indicator) -> Self {
        match indicator {
            Indicator::None => Self::None,
            Indicator::Minor => Self::Minor,
            Indicator::Major => Self::Major,
            Indicator::Critical => Self::Critical,
        }
    }
}

fn map_summary(summary: Summary, updated_at: i64) -> StatusResult {
    let severity = Severity::from(summary.status.indicator);
    StatusResult {
        severity,
        status: infer_status(&summary.status.description, severity),
        description: summary.status.description,
        updated_at,
        timezone: summary.page.timezone,
    }
}

fn endpoint(entry: &Entry) -> Result<Url> {
    match entry.api_config.as_ref().and_then(|config| config.endpoint()) {
        Some(url) => Ok(url.clone()),
        None => endpoint_from_page(NAME, entry, "api/v2/summary.json"),
    }
}

#[async_trait]
impl Fetcher for StatusPageFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        if let Some(config) = &entry.api_config {
            return config.kind() == Provider::StatusPage;
        }
        entry.provider == Provider::StatusPage
            || entry.status_page_url.as_str().contains("statuspage.io")
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let url = endpoint(entry)?;
        let body = get_json(ctx, NAME, entry, &url).await?;
        let summary: Summary = decode(NAME, entry, &url, &body)?;
        let updated_at = epoch_ms(NAME, entry, &url, summary.page.updated_at.clone())?;
        Ok(map_summary(summary, updated_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuswatch_model::Status;

    fn summary(indicator: &str, description: &str) -> Summary {
        serde_json::from_str(&format!(
            r#"{{
                "page": {{
                    "id": "abcd1234",
                    "name": "Example",
                    "url": "https://status.example.com",
                    "timezone": "Etc/UTC",
                    "updated_at": "2024-05-01T12:00:00Z"
                }},
                "status": {{ "indicator": "{indicator}", "description": "{description}" }}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_indicator_passes_through_and_status_is_inferred() {
        let result = map_summary(summary("major", "Partial System Outage"), 1);
        assert_eq!(result.severity, Severity::Major);
        // Derived by the normalizer from the description, not hardcoded
        assert_eq!(result.status, Status::PartialOutage);
        assert_eq!(result.timezone.as_deref(), Some("Etc/UTC"));
    }

    #[test]
    fn test_operational_summary() {
        let result = map_summary(summary("none", "All Systems Operational"), 1);
        assert_eq!(result.severity, Severity::None);
        assert_eq!(result.status, Status::Operational);
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let body = r#"{ "status": { "indicator": "none", "description": "ok" } }"#;
        assert!(serde_json::from_str::<Summary>(body).is_err());
    }

    #[test]
    fn test_unknown_indicator_rejected() {
        let body = r#"{
            "page": { "id": "x", "name": "X", "url": "https://x", "updated_at": "2024-05-01T12:00:00Z" },
            "status": { "indicator": "catastrophic", "description": "?" }
        }"#;
        assert!(serde_json::from_str::<Summary>(body).is_err());
    }

    #[test]
    fn test_can_handle_by_url_heuristic() {
        let catalog = statuswatch_catalog::Catalog::from_raw(&[statuswatch_catalog::RawEntry {
            id: "x",
            name: "X",
            url: "https://x.example.com",
            status_page_url: "https://x.statuspage.io",
            provider: Provider::Custom,
            industries: &["cloud"],
            description: None,
            api_config: None,
        }])
        .unwrap();
        assert!(StatusPageFetcher.can_handle(&catalog.entries()[0]));
    }
}
