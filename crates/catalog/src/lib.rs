//! Validated static catalog of trackable third-party services. Each entry
//! describes how to reach and interpret one service's public status page.
//!
//! The catalog is fixed at compile time and validated in bulk on load:
//! either every record is well-formed, or loading fails with an aggregate
//! error naming every malformed record. Callers never see a partially
//! valid catalog.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod entries;
mod error;

pub use error::{EntryViolation, Error, Result};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

/// Provider family a catalog entry belongs to. Doubles as the closed set
/// of API config kinds a fetcher strategy can claim.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Atlassian Statuspage-style hosted page (indicator-based summary API).
    StatusPage,

    /// Uptime-aggregate API (`index.json` with an aggregate state).
    Uptime,

    /// incident.io-style widget API.
    IncidentIo,

    /// Instatus-style tri-state summary API.
    Instatus,

    /// Ad-hoc JSON API, optionally with a named sub-parser.
    Custom,

    /// Raw HTML scraping fallback.
    Html,
}

/// Named sub-parser for the custom JSON strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomParser {
    /// Community-style status feed: incident list where `outage`-typed
    /// incidents drive major severity and everything else minor.
    CommunityFeed,

    /// RSS status feed. Deliberately unimplemented; configuring it
    /// surfaces a not-implemented error rather than a wrong answer.
    Rss,
}

/// How to query an entry's status API, when the operator configured one
/// explicitly. Strategies fall back to URL heuristics when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiConfig {
    /// Statuspage summary API.
    StatusPage {
        /// Endpoint override; defaults to `{status_page_url}/api/v2/summary.json`.
        endpoint: Option<Url>,
    },

    /// Uptime-aggregate API.
    Uptime {
        /// Endpoint override; defaults to `{status_page_url}/index.json`.
        endpoint: Option<Url>,
    },

    /// incident.io widget API.
    IncidentIo {
        /// Endpoint override; defaults to `{origin}/api/widget`.
        endpoint: Option<Url>,
    },

    /// Instatus summary API.
    Instatus {
        /// Endpoint override; defaults to `{status_page_url}/summary.json`.
        endpoint: Option<Url>,
    },

    /// Ad-hoc JSON API. The endpoint is required; there is no implicit
    /// discovery for custom APIs.
    Custom {
        /// Endpoint to query.
        endpoint: Option<Url>,

        /// Sub-parser hint; absent means keyword sniffing over common
        /// status fields.
        parser: Option<CustomParser>,
    },

    /// HTML scraping of the status page itself.
    Html {
        /// Page override; defaults to the entry's status page URL.
        endpoint: Option<Url>,
    },
}

impl ApiConfig {
    /// The provider family this config selects.
    #[must_use]
    pub const fn kind(&self) -> Provider {
        match self {
            Self::StatusPage { .. } => Provider::StatusPage,
            Self::Uptime { .. } => Provider::Uptime,
            Self::IncidentIo { .. } => Provider::IncidentIo,
            Self::Instatus { .. } => Provider::Instatus,
            Self::Custom { .. } => Provider::Custom,
            Self::Html { .. } => Provider::Html,
        }
    }

    /// The explicit endpoint override, if any.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Url> {
        match self {
            Self::StatusPage { endpoint }
            | Self::Uptime { endpoint }
            | Self::IncidentIo { endpoint }
            | Self::Instatus { endpoint }
            | Self::Custom { endpoint, .. }
            | Self::Html { endpoint } => endpoint.as_ref(),
        }
    }
}

/// One validated, immutable catalog record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique, non-empty identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Home page of the service.
    pub url: Url,

    /// Public status page of the service.
    pub status_page_url: Url,

    /// Provider family tag.
    pub provider: Provider,

    /// Industry tags; always non-empty.
    pub industries: Vec<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Explicit API configuration, when URL heuristics are not enough.
    pub api_config: Option<ApiConfig>,
}

/// Unvalidated catalog record as authored in the built-in list.
#[derive(Clone, Copy, Debug)]
pub struct RawEntry {
    /// Identifier.
    pub id: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Home page URL.
    pub url: &'static str,

    /// Status page URL.
    pub status_page_url: &'static str,

    /// Provider family tag.
    pub provider: Provider,

    /// Industry tags.
    pub industries: &'static [&'static str],

    /// Free-text description.
    pub description: Option<&'static str>,

    /// API configuration.
    pub api_config: Option<RawApiConfig>,
}

/// Unvalidated API configuration as authored in the built-in list.
#[derive(Clone, Copy, Debug)]
pub struct RawApiConfig {
    /// Config kind, drawn from the same closed set as [`Provider`].
    pub kind: Provider,

    /// Explicit endpoint override.
    pub endpoint: Option<&'static str>,

    /// Sub-parser hint, only meaningful for [`Provider::Custom`].
    pub parser: Option<CustomParser>,
}

/// The validated, read-only list of trackable services.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Load and validate the built-in entry list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] aggregating every malformed record if any
    /// record fails validation. There is no partial catalog.
    pub fn load() -> Result<Self> {
        Self::from_raw(entries::BUILTIN)
    }

    /// Validate an arbitrary raw entry list. Collects all violations
    /// across all records before failing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if any record is malformed.
    pub fn from_raw(raw: &[RawEntry]) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        let mut violations = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for (index, record) in raw.iter().enumerate() {
            match validate_entry(record, &mut seen_ids) {
                Ok(entry) => entries.push(entry),
                Err(problems) => violations.push(EntryViolation {
                    index,
                    id: record.id.to_string(),
                    problems,
                }),
            }
        }

        if violations.is_empty() {
            Ok(Self { entries })
        } else {
            Err(Error::Invalid(violations))
        }
    }

    /// All entries, in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up one entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry(
    record: &RawEntry,
    seen_ids: &mut HashSet<&'static str>,
) -> std::result::Result<Entry, Vec<String>> {
    let mut problems = Vec::new();

    if record.id.trim().is_empty() {
        problems.push("id must be non-empty".to_string());
    } else if !seen_ids.insert(record.id) {
        problems.push(format!("duplicate id {:?}", record.id));
    }

    if record.name.trim().is_empty() {
        problems.push("name must be non-empty".to_string());
    }

    let url = parse_url(record.url, "url", &mut problems);
    let status_page_url = parse_url(record.status_page_url, "status_page_url", &mut problems);

    if record.industries.is_empty() {
        problems.push("industries must be non-empty".to_string());
    }
    for industry in record.industries {
        if industry.trim().is_empty() {
            problems.push("industry tags must be non-empty".to_string());
        }
    }

    let api_config = match record.api_config {
        None => None,
        Some(raw) => validate_api_config(raw, &mut problems),
    };

    match (url, status_page_url) {
        (Some(url), Some(status_page_url)) if problems.is_empty() => Ok(Entry {
            id: record.id.to_string(),
            name: record.name.to_string(),
            url,
            status_page_url,
            provider: record.provider,
            industries: record.industries.iter().map(ToString::to_string).collect(),
            description: record.description.map(ToString::to_string),
            api_config,
        }),
        _ => Err(problems),
    }
}

fn validate_api_config(raw: RawApiConfig, problems: &mut Vec<String>) -> Option<ApiConfig> {
    let endpoint = match raw.endpoint {
        None => None,
        Some(s) => match parse_url(s, "api_config.endpoint", problems) {
            Some(url) => Some(url),
            None => return None,
        },
    };

    if raw.parser.is_some() && raw.kind != Provider::Custom {
        problems.push("api_config.parser is only valid for the custom kind".to_string());
        return None;
    }

    Some(match raw.kind {
        Provider::StatusPage => ApiConfig::StatusPage { endpoint },
        Provider::Uptime => ApiConfig::Uptime { endpoint },
        Provider::IncidentIo => ApiConfig::IncidentIo { endpoint },
        Provider::Instatus => ApiConfig::Instatus { endpoint },
        Provider::Custom => ApiConfig::Custom {
            endpoint,
            parser: raw.parser,
        },
        Provider::Html => ApiConfig::Html { endpoint },
    })
}

fn parse_url(value: &str, field: &str, problems: &mut Vec<String>) -> Option<Url> {
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(err) => {
            problems.push(format!("{field} is not a valid URL: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::load().expect("built-in catalog must validate");
        assert!(!catalog.is_empty());
        assert!(catalog.get("github").is_some());
    }

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = Catalog::load().unwrap();
        let mut ids: Vec<_> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_validation_aggregates_all_failures() {
        let raw = [
            RawEntry {
                id: "",
                name: "Broken One",
                url: "not a url",
                status_page_url: "https://status.example.com",
                provider: Provider::StatusPage,
                industries: &["cloud"],
                description: None,
                api_config: None,
            },
            RawEntry {
                id: "ok",
                name: "Fine",
                url: "https://example.com",
                status_page_url: "https://status.example.com",
                provider: Provider::StatusPage,
                industries: &["cloud"],
                description: None,
                api_config: None,
            },
            RawEntry {
                id: "broken-two",
                name: "",
                url: "https://example.org",
                status_page_url: "https://status.example.org",
                provider: Provider::Html,
                industries: &[],
                description: None,
                api_config: None,
            },
        ];

        let err = Catalog::from_raw(&raw).unwrap_err();
        let Error::Invalid(violations) = err;

        // Both bad records reported, the good one not
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].index, 0);
        assert!(violations[0].problems.iter().any(|p| p.contains("id")));
        assert!(violations[0].problems.iter().any(|p| p.contains("url")));
        assert_eq!(violations[1].index, 2);
        assert_eq!(violations[1].id, "broken-two");
        assert!(violations[1].problems.iter().any(|p| p.contains("name")));
        assert!(
            violations[1]
                .problems
                .iter()
                .any(|p| p.contains("industries"))
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let record = RawEntry {
            id: "dup",
            name: "Dup",
            url: "https://example.com",
            status_page_url: "https://status.example.com",
            provider: Provider::StatusPage,
            industries: &["cloud"],
            description: None,
            api_config: None,
        };

        let err = Catalog::from_raw(&[record, record]).unwrap_err();
        let Error::Invalid(violations) = err;
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].index, 1);
        assert!(violations[0].problems[0].contains("duplicate"));
    }

    #[test]
    fn test_parser_hint_only_valid_for_custom() {
        let raw = [RawEntry {
            id: "bad-parser",
            name: "Bad Parser",
            url: "https://example.com",
            status_page_url: "https://status.example.com",
            provider: Provider::StatusPage,
            industries: &["cloud"],
            description: None,
            api_config: Some(RawApiConfig {
                kind: Provider::StatusPage,
                endpoint: None,
                parser: Some(CustomParser::Rss),
            }),
        }];

        let err = Catalog::from_raw(&raw).unwrap_err();
        let Error::Invalid(violations) = err;
        assert!(violations[0].problems[0].contains("parser"));
    }

    #[test]
    fn test_api_config_accessors() {
        let config = ApiConfig::Custom {
            endpoint: Some(Url::parse("https://api.example.com/status").unwrap()),
            parser: Some(CustomParser::CommunityFeed),
        };
        assert_eq!(config.kind(), Provider::Custom);
        assert_eq!(
            config.endpoint().map(Url::as_str),
            Some("https://api.example.com/status")
        );
    }
}
