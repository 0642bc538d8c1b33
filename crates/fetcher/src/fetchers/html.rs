//! HTML scraping fallback strategy.
//!
//! Last resort for services with no machine-readable status API; only
//! active when an entry explicitly configures it. Scraping is best
//! effort: the first matching element wins, and unrecognizable markup
//! yields an "Unknown" result rather than an error.

use async_trait::async_trait;
use scraper::{Html, Selector};
use statuswatch_catalog::{Entry, Provider};
use statuswatch_model::{StatusResult, infer_status};
use url::Url;

use super::{get_text, now_ms, severity_from_keywords};
use crate::Fetcher;
use crate::context::FetchContext;
use crate::error::Result;

const NAME: &str = "html";

/// Scrapes the status page markup for a status hint: an element whose
/// class contains "status", then a `data-status` attribute, then a
/// `<meta name="status">` tag.
pub struct HtmlFetcher;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Extract the page's status text. Returns `None` when no candidate
/// matches; never fails on malformed or empty markup.
fn scrape_status_text(body: &str) -> Option<String> {
    let document = Html::parse_document(body);

    if let Some(element) = document.select(&selector("[class*='status']")).next() {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    if let Some(element) = document.select(&selector("[data-status]")).next() {
        if let Some(value) = element.value().attr("data-status") {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    if let Some(element) = document.select(&selector("meta[name='status']")).next() {
        if let Some(content) = element.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    None
}

fn map_markup(body: &str) -> StatusResult {
    let (description, severity) = scrape_status_text(body).map_or_else(
        || ("Unknown".to_string(), statuswatch_model::Severity::None),
        |text| {
            let severity = severity_from_keywords(&text);
            (text, severity)
        },
    );

    StatusResult {
        severity,
        status: infer_status(&description, severity),
        description,
        updated_at: now_ms(),
        timezone: None,
    }
}

fn endpoint(entry: &Entry) -> Url {
    entry
        .api_config
        .as_ref()
        .and_then(|config| config.endpoint())
        .cloned()
        .unwrap_or_else(|| entry.status_page_url.clone())
}

#[async_trait]
impl Fetcher for HtmlFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_handle(&self, entry: &Entry) -> bool {
        // Never a heuristic fallback; scraping must be opted into.
        entry
            .api_config
            .as_ref()
            .is_some_and(|config| config.kind() == Provider::Html)
    }

    async fn fetch(&self, entry: &Entry, ctx: &FetchContext) -> Result<StatusResult> {
        let url = endpoint(entry);
        let body = get_text(ctx, NAME, entry, &url).await?;
        Ok(map_markup(&body))
    }
}
