//! The built-in list of tracked services.
//!
//! Entries without an `api_config` rely on URL heuristics in the fetcher
//! layer; entries with one are matched by config kind first.

use crate::{CustomParser, Provider, RawApiConfig, RawEntry};

pub const BUILTIN: &[RawEntry] = &[
    RawEntry {
        id: "github",
        name: "GitHub",
        url: "https://github.com",
        status_page_url: "https://www.githubstatus.com",
        provider: Provider::StatusPage,
        industries: &["dev-tools", "source-control"],
        description: Some("Code hosting and collaboration"),
        api_config: None,
    },
    RawEntry {
        id: "cloudflare",
        name: "Cloudflare",
        url: "https://www.cloudflare.com",
        status_page_url: "https://www.cloudflarestatus.com",
        provider: Provider::StatusPage,
        industries: &["cdn", "security"],
        description: Some("CDN, DNS and edge security"),
        api_config: None,
    },
    RawEntry {
        id: "openai",
        name: "OpenAI",
        url: "https://openai.com",
        status_page_url: "https://status.openai.com",
        provider: Provider::StatusPage,
        industries: &["ai"],
        description: Some("LLM APIs"),
        api_config: Some(RawApiConfig {
            kind: Provider::StatusPage,
            endpoint: None,
            parser: None,
        }),
    },
    RawEntry {
        id: "netlify",
        name: "Netlify",
        url: "https://www.netlify.com",
        status_page_url: "https://www.netlifystatus.com",
        provider: Provider::StatusPage,
        industries: &["hosting"],
        description: None,
        api_config: None,
    },
    RawEntry {
        id: "render",
        name: "Render",
        url: "https://render.com",
        status_page_url: "https://status.render.com",
        provider: Provider::Uptime,
        industries: &["hosting", "cloud"],
        description: Some("Application hosting platform"),
        api_config: Some(RawApiConfig {
            kind: Provider::Uptime,
            endpoint: None,
            parser: None,
        }),
    },
    RawEntry {
        id: "linear",
        name: "Linear",
        url: "https://linear.app",
        status_page_url: "https://linearstatus.com",
        provider: Provider::IncidentIo,
        industries: &["dev-tools", "project-management"],
        description: Some("Issue tracking"),
        api_config: Some(RawApiConfig {
            kind: Provider::IncidentIo,
            endpoint: None,
            parser: None,
        }),
    },
    RawEntry {
        id: "supabase",
        name: "Supabase",
        url: "https://supabase.com",
        status_page_url: "https://status.supabase.com",
        provider: Provider::Instatus,
        industries: &["database", "backend"],
        description: Some("Postgres developer platform"),
        api_config: Some(RawApiConfig {
            kind: Provider::Instatus,
            endpoint: None,
            parser: None,
        }),
    },
    RawEntry {
        id: "resend",
        name: "Resend",
        url: "https://resend.com",
        status_page_url: "https://resend-status.com",
        provider: Provider::Instatus,
        industries: &["email"],
        description: Some("Transactional email API"),
        api_config: Some(RawApiConfig {
            kind: Provider::Instatus,
            endpoint: None,
            parser: None,
        }),
    },
    RawEntry {
        id: "fly",
        name: "Fly.io",
        url: "https://fly.io",
        status_page_url: "https://status.flyio.net",
        provider: Provider::Custom,
        industries: &["hosting", "cloud"],
        description: Some("App servers close to users"),
        api_config: Some(RawApiConfig {
            kind: Provider::Custom,
            endpoint: Some("https://status.flyio.net/index.json"),
            parser: Some(CustomParser::CommunityFeed),
        }),
    },
    RawEntry {
        id: "hetzner",
        name: "Hetzner",
        url: "https://www.hetzner.com",
        status_page_url: "https://status.hetzner.com",
        provider: Provider::Html,
        industries: &["hosting", "bare-metal"],
        description: None,
        api_config: Some(RawApiConfig {
            kind: Provider::Html,
            endpoint: None,
            parser: None,
        }),
    },
];
