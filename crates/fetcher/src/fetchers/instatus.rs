//! Simple tri-state widget strategy (Instatus-style `summary.json`).

use async_trait::async_trait;
use serde::Deserialize;
use statuswatch_catalog::{Entry, Provider};
use statuswatch_model::{Severity, Status, StatusResult};
use url::Url;

use super::{WireTimestamp, decode, endpoint_from_page, epoch_ms, get_json};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::Result;

const NAME: &str = "instatus";

/// Fetches `{status_page_url}/summary.json` and maps the page's
/// tri-state status type directly.
pub struct InstatusFetcher;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Summary {
    #[serde(rename = "activeIncidents")]
    active_incidents: Vec<serde_json::Value>,
    #[serde(rename = "activeMaintenances")]
    active_maintenances: Vec<serde_json::Value>,
    status: PageStatus,
    page: Page,
}

#[derive(Debug, Deserialize)]
struct PageStatus {
    text: String,
    #[serde(rename = "type")]
    kind: StatusType,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Page {
    name: String,
    url: String,
    updated: WireTimestamp,
}

#[derive(Clone, Copy, Debug, Deserialize)]
enum StatusType {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "HASISSUES")]
    HasIssues,
    #[serde(rename = "UNDERMAINTENANCE")]
    UnderMaintenance,
}

const fn map_type(kind: StatusType) -> (Severity, Status) {
    match kind {
        StatusType::Up => (Severity::None, Status::Operational),
        StatusType::HasIssues => (Severity::Major, Status::Degraded),
        StatusType::UnderMaintenance => (Severity::None, Status::UnderMaintenance),
    }
}

fn endpoint(entry: &Entry) -> Result<Url> {
    match entry.api_config.as_ref().and_then(|config| config.endpoint()) {
        Some(url) => Ok(url.clone()),
        None => endpoint_from_page(NAME, entry, "summary.json"),
    }
}

#[async_trait]
impl Fetcher for InstatusFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        if let Some(config) = &entry.api_config {
            return config.kind() == Provider::Instatus;
        }
        entry.provider == Provider::Instatus
            || entry.status_page_url.as_str().contains("instatus.com")
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let url = endpoint(entry)?;
        let body = get_json(ctx, NAME, entry, &url).await?;
        let summary: Summary = decode(NAME, entry, &url, &body)?;

        let (severity, status) = map_type(summary.status.kind);
        let updated_at = epoch_ms(NAME, entry, &url, summary.page.updated)?;

        Ok(StatusResult {
            severity,
            status,
            description: summary.status.text,
            updated_at,
            timezone: None,
        })
    }
}
