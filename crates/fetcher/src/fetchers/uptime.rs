//! Uptime-aggregate strategy: a status page exposing one aggregate state
//! via `index.json`.

use async_trait::async_trait;
use serde::Deserialize;
use statuswatch_catalog::{Entry, Provider};
use statuswatch_model::{Severity, Status, StatusResult};
use url::Url;

use super::{WireTimestamp, decode, endpoint_from_page, epoch_ms, get_json};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::{FetchError, FetchErrorKind, Result};

const NAME: &str = "uptime";

/// Fetches `{status_page_url}/index.json` and maps the aggregate state
/// through a fixed lookup table. The free-text normalizer is not
/// involved for this provider family.
pub struct UptimeFetcher;

#[derive(Debug, Deserialize)]
struct Index {
    data: Data,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Data {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Attributes {
    company_name: String,
    timezone: Option<String>,
    aggregate_state: AggregateState,
    updated_at: WireTimestamp,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AggregateState {
    Operational,
    Degraded,
    Downtime,
    Maintenance,
}

const fn map_state(state: AggregateState) -> (Severity, Status, &'static str) {
    match state {
        AggregateState::Operational => (Severity::None, Status::Operational, "Operational"),
        AggregateState::Degraded => (Severity::Minor, Status::Degraded, "Degraded performance"),
        AggregateState::Downtime => (Severity::Major, Status::MajorOutage, "Downtime"),
        AggregateState::Maintenance => {
            (Severity::None, Status::UnderMaintenance, "Under maintenance")
        }
    }
}

fn endpoint(entry: &Entry) -> Result<Url> {
    match entry.api_config.as_ref().and_then(|config| config.endpoint()) {
        Some(url) => Ok(url.clone()),
        None => endpoint_from_page(NAME, entry, "index.json"),
    }
}

#[async_trait]
impl Fetcher for UptimeFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        if let Some(config) = &entry.api_config {
            return config.kind() == Provider::Uptime;
        }
        entry.provider == Provider::Uptime
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let url = endpoint(entry)?;
        let body = get_json(ctx, NAME, entry, &url).await?;
        let index: Index = decode(NAME, entry, &url, &body)?;

        if index.data.kind != "status_page" {
            return Err(FetchError::new(
                NAME,
                entry,
                &url,
                FetchErrorKind::Schema(format!(
                    "unexpected data type {:?}, wanted \"status_page\"",
                    index.data.kind
                )),
            ));
        }

        let (severity, status, description) = map_state(index.data.attributes.aggregate_state);
        let updated_at = epoch_ms(NAME, entry, &url, index.data.attributes.updated_at)?;

        Ok(StatusResult {
            severity,
            status,
            description: description.to_string(),
            updated_at,
            timezone: index.data.attributes.timezone,
        })
    }
}
