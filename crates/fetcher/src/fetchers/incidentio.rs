//! Incident-automation widget strategy (incident.io-style `/api/widget`).

use async_trait::async_trait;
use serde::Deserialize;
use statuswatch_catalog::{Entry, Provider};
use statuswatch_model::{Severity, Status, StatusResult};
use url::Url;

use super::{WireTimestamp, decode, get_json, now_ms};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::{FetchError, FetchErrorKind, Result};

const NAME: &str = "incidentio";

/// Fetches `{origin}/api/widget` and prioritizes: ongoing incidents over
/// in-progress maintenance over scheduled maintenance over all-clear.
pub struct IncidentIoFetcher;

#[derive(Debug, Deserialize)]
struct Widget {
    ongoing_incidents: Vec<Item>,
    in_progress_maintenances: Vec<Item>,
    scheduled_maintenances: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Item {
    id: String,
    name: String,
    status: String,
    last_update: Option<LastUpdate>,
}

#[derive(Debug, Deserialize)]
struct LastUpdate {
    message: String,
    updated_at: WireTimestamp,
}

fn incident_mapping(status: &str) -> (Severity, Status) {
    match status.to_lowercase().as_str() {
        "identified" => (Severity::Major, Status::Identified),
        "monitoring" => (Severity::Minor, Status::Monitoring),
        // "investigating" and anything unrecognized
        _ => (Severity::Major, Status::Investigating),
    }
}

fn item_description(item: &Item) -> String {
    item.last_update
        .as_ref()
        .map_or_else(|| item.name.clone(), |update| update.message.clone())
}

fn map_widget(widget: &Widget, latest_update: i64) -> StatusResult {
    let (severity, status, description) =
        if let Some(incident) = widget.ongoing_incidents.first() {
            let (severity, status) = incident_mapping(&incident.status);
            (severity, status, item_description(incident))
        } else if let Some(maintenance) = widget.in_progress_maintenances.first() {
            (
                Severity::None,
                Status::UnderMaintenance,
                item_description(maintenance),
            )
        } else if let Some(maintenance) = widget.scheduled_maintenances.first() {
            (
                Severity::None,
                Status::UnderMaintenance,
                item_description(maintenance),
            )
        } else {
            (
                Severity::None,
                Status::Operational,
                "All systems operational".to_string(),
            )
        };

    StatusResult {
        severity,
        status,
        description,
        updated_at: latest_update,
        timezone: None,
    }
}

/// Latest update across every listed item, or "now" when nothing carries
/// a timestamp.
fn latest_update(widget: &Widget) -> std::result::Result<i64, String> {
    let mut latest = None;

    for item in widget
        .ongoing_incidents
        .iter()
        .chain(&widget.in_progress_maintenances)
        .chain(&widget.scheduled_maintenances)
    {
        if let Some(update) = &item.last_update {
            let ms = update.updated_at.clone().into_epoch_ms()?;
            latest = Some(latest.map_or(ms, |current: i64| current.max(ms)));
        }
    }

    Ok(latest.unwrap_or_else(now_ms))
}

fn endpoint(entry: &Entry) -> Result<Url> {
    if let Some(url) = entry.api_config.as_ref().and_then(|config| config.endpoint()) {
        return Ok(url.clone());
    }

    let origin = entry.status_page_url.origin().ascii_serialization();
    let candidate = format!("{origin}/api/widget");
    Url::parse(&candidate).map_err(|err| {
        FetchError::new(
            NAME,
            entry,
            &entry.status_page_url,
            FetchErrorKind::InvalidEndpoint(format!("{candidate}: {err}")),
        )
    })
}

#[async_trait]
impl Fetcher for IncidentIoFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        if let Some(config) = &entry.api_config {
            return config.kind() == Provider::IncidentIo;
        }
        entry.provider == Provider::IncidentIo
            || entry.status_page_url.as_str().contains("incident.io")
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let url = endpoint(entry)?;
        let body = get_json(ctx, NAME, entry, &url).await?;
        let widget: Widget = decode(NAME, entry, &url, &body)?;

        let updated_at = latest_update(&widget)
            .map_err(|msg| FetchError::new(NAME, entry, &url, FetchErrorKind::Schema(msg)))?;

        Ok(map_widget(&widget, updated_at))
    }
}
