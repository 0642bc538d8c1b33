//! End-to-end strategy tests against a local HTTP server serving
//! provider fixtures.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use statuswatch_catalog::{Catalog, CustomParser, Entry, Provider, RawApiConfig, RawEntry};
use statuswatch_fetcher::{FetchContext, FetchErrorKind, FetcherRegistry};
use statuswatch_model::{Severity, Status};
use statuswatch_transport::FetchOptions;

const STATUSPAGE_SUMMARY: &str = r#"{
    "page": {
        "id": "abcd1234",
        "name": "Example",
        "url": "https://status.example.com",
        "timezone": "Etc/UTC",
        "updated_at": "2024-05-01T12:00:00Z"
    },
    "status": { "indicator": "major", "description": "Partial System Outage" }
}"#;

const UPTIME_INDEX: &str = r#"{
    "data": {
        "id": "pg_1",
        "type": "status_page",
        "attributes": {
            "company_name": "Example",
            "timezone": "Etc/UTC",
            "aggregate_state": "maintenance",
            "updated_at": "2024-05-01T12:00:00Z"
        }
    }
}"#;

const WIDGET: &str = r#"{
    "ongoing_incidents": [
        { "id": "inc_1", "name": "API errors", "status": "identified",
          "last_update": { "message": "Fix rolling out", "updated_at": "2024-05-01T12:00:00Z" } }
    ],
    "in_progress_maintenances": [
        { "id": "mnt_1", "name": "DB upgrade", "status": "in_progress" }
    ],
    "scheduled_maintenances": []
}"#;

const INSTATUS_SUMMARY: &str = r#"{
    "activeIncidents": [],
    "activeMaintenances": [],
    "status": { "text": "All systems operational", "type": "UP" },
    "page": { "name": "Example", "url": "https://status.example.com",
              "updated": "2024-05-01T12:00:00Z" }
}"#;

const COMMUNITY_FEED: &str = r#"{
    "status": "incident",
    "date_created": 1714564800,
    "date_updated": 1714564900,
    "active_incidents": [
        { "id": 1, "title": "Registry is down", "type": "outage",
          "status": "open", "services": ["registry"] }
    ]
}"#;

const STATUS_HTML: &str = r#"<html><body>
    <div class="site-status">Degraded performance</div>
</body></html>"#;

async fn statuspage_summary() -> &'static str {
    STATUSPAGE_SUMMARY
}

async fn uptime_index() -> &'static str {
    UPTIME_INDEX
}

async fn widget() -> &'static str {
    WIDGET
}

async fn instatus_summary() -> &'static str {
    INSTATUS_SUMMARY
}

async fn community_feed() -> &'static str {
    COMMUNITY_FEED
}

async fn status_page() -> axum::response::Html<&'static str> {
    axum::response::Html(STATUS_HTML)
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/v2/summary.json", get(statuspage_summary))
        .route("/index.json", get(uptime_index))
        .route("/api/widget", get(widget))
        .route("/summary.json", get(instatus_summary))
        .route("/community.json", get(community_feed))
        .route("/status-page", get(status_page));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn context() -> FetchContext {
    FetchContext::new(
        FetchOptions::default()
            .with_timeout(Duration::from_secs(5))
            .with_initial_delay(Duration::from_millis(5)),
    )
    .unwrap()
}

async fn fetch_one(raw: RawEntry) -> Result<statuswatch_model::StatusResult, String> {
    let catalog = Catalog::from_raw(&[raw]).unwrap();
    let entry: &Entry = &catalog.entries()[0];
    let registry = FetcherRegistry::standard();
    let fetcher = registry
        .find_for(entry)
        .ok_or_else(|| format!("no capable fetcher for {}", entry.id))?;
    fetcher
        .fetch(entry, &context())
        .await
        .map_err(|err| err.to_string())
}

fn base_entry(id: &'static str, provider: Provider, status_page: String) -> RawEntry {
    RawEntry {
        id,
        name: "Example",
        url: "https://example.com",
        status_page_url: Box::leak(status_page.into_boxed_str()),
        provider,
        industries: &["cloud"],
        description: None,
        api_config: None,
    }
}

#[tokio::test]
async fn test_statuspage_end_to_end() {
    let addr = spawn_server().await;
    let raw = base_entry("sp", Provider::StatusPage, format!("http://{addr}"));

    let result = fetch_one(raw).await.unwrap();
    assert_eq!(result.severity, Severity::Major);
    assert_eq!(result.status, Status::PartialOutage);
    assert_eq!(result.description, "Partial System Outage");
    assert_eq!(result.updated_at, 1_714_564_800_000);
    assert_eq!(result.timezone.as_deref(), Some("Etc/UTC"));
}

#[tokio::test]
async fn test_uptime_end_to_end() {
    let addr = spawn_server().await;
    let raw = base_entry("up", Provider::Uptime, format!("http://{addr}"));

    let result = fetch_one(raw).await.unwrap();
    assert_eq!(result.severity, Severity::None);
    assert_eq!(result.status, Status::UnderMaintenance);
}

#[tokio::test]
async fn test_incidentio_end_to_end() {
    let addr = spawn_server().await;
    let raw = base_entry("inc", Provider::IncidentIo, format!("http://{addr}"));

    let result = fetch_one(raw).await.unwrap();
    // The ongoing incident wins over the in-progress maintenance
    assert_eq!(result.severity, Severity::Major);
    assert_eq!(result.status, Status::Identified);
    assert_eq!(result.description, "Fix rolling out");
    assert_eq!(result.updated_at, 1_714_564_800_000);
}

#[tokio::test]
async fn test_instatus_end_to_end() {
    let addr = spawn_server().await;
    let raw = base_entry("ins", Provider::Instatus, format!("http://{addr}"));

    let result = fetch_one(raw).await.unwrap();
    assert_eq!(result.severity, Severity::None);
    assert_eq!(result.status, Status::Operational);
    assert_eq!(result.description, "All systems operational");
}

#[tokio::test]
async fn test_custom_community_feed_end_to_end() {
    let addr = spawn_server().await;
    let mut raw = base_entry("cust", Provider::Custom, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Custom,
        endpoint: Some(Box::leak(
            format!("http://{addr}/community.json").into_boxed_str(),
        )),
        parser: Some(CustomParser::CommunityFeed),
    });

    let result = fetch_one(raw).await.unwrap();
    assert_eq!(result.severity, Severity::Major);
    assert_eq!(result.status, Status::MajorOutage);
    assert_eq!(result.description, "Registry is down");
    assert_eq!(result.updated_at, 1_714_564_900_000);
}

#[tokio::test]
async fn test_custom_without_endpoint_fails_fast() {
    let addr = spawn_server().await;
    let mut raw = base_entry("cust-bare", Provider::Custom, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Custom,
        endpoint: None,
        parser: None,
    });

    let err = fetch_one(raw).await.unwrap_err();
    assert!(err.contains("no endpoint configured"), "got: {err}");
}

#[tokio::test]
async fn test_custom_rss_parser_is_not_implemented() {
    let addr = spawn_server().await;
    let mut raw = base_entry("rss", Provider::Custom, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Custom,
        endpoint: Some(Box::leak(
            format!("http://{addr}/community.json").into_boxed_str(),
        )),
        parser: Some(CustomParser::Rss),
    });

    let err = fetch_one(raw).await.unwrap_err();
    assert!(err.contains("rss parser is not implemented"), "got: {err}");
}

#[tokio::test]
async fn test_html_end_to_end() {
    let addr = spawn_server().await;
    let mut raw = base_entry("html", Provider::Html, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Html,
        endpoint: Some(Box::leak(
            format!("http://{addr}/status-page").into_boxed_str(),
        )),
        parser: None,
    });

    let result = fetch_one(raw).await.unwrap();
    assert_eq!(result.severity, Severity::Minor);
    assert_eq!(result.status, Status::Degraded);
    assert_eq!(result.description, "Degraded performance");
}

#[tokio::test]
async fn test_schema_violation_is_terminal_error() {
    let addr = spawn_server().await;
    // instatus strategy pointed at the statuspage fixture: wrong shape
    let mut raw = base_entry("mismatch", Provider::Instatus, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Instatus,
        endpoint: Some(Box::leak(
            format!("http://{addr}/api/v2/summary.json").into_boxed_str(),
        )),
        parser: None,
    });

    let err = fetch_one(raw).await.unwrap_err();
    assert!(err.contains("schema"), "got: {err}");
}

#[tokio::test]
async fn test_missing_page_is_http_error() {
    let addr = spawn_server().await;
    let mut raw = base_entry("gone", Provider::Html, format!("http://{addr}"));
    raw.api_config = Some(RawApiConfig {
        kind: Provider::Html,
        endpoint: Some(Box::leak(
            format!("http://{addr}/no-such-page").into_boxed_str(),
        )),
        parser: None,
    });

    let err = fetch_one(raw).await.unwrap_err();
    assert!(err.contains("HTTP status 404"), "got: {err}");
}

#[tokio::test]
async fn test_entry_without_capable_fetcher() {
    // Custom provider tag without an explicit config: nothing claims it
    let raw = base_entry("unclaimed", Provider::Custom, "https://status.example.com".to_string());
    let catalog = Catalog::from_raw(&[raw]).unwrap();
    let registry = FetcherRegistry::standard();
    assert!(registry.find_for(&catalog.entries()[0]).is_none());
}

#[test]
fn test_error_kind_names_feature_gap() {
    let kind = FetchErrorKind::NotImplemented("rss");
    assert_eq!(kind.to_string(), "rss parser is not implemented");
}
