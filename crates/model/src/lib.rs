//! Shared status model for third-party service monitoring. Defines the
//! canonical severity/status enums, the normalized fetch result, and the
//! free-text status normalizer every provider strategy funnels through.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod normalize;

pub use normalize::infer_status;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Coarse impact level reported alongside a status.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No impact.
    None,

    /// Minor impact, service mostly usable.
    Minor,

    /// Major impact, core functionality affected.
    Major,

    /// Critical impact, service unusable.
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Canonical, provider-agnostic service status.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Everything working as expected.
    Operational,

    /// Degraded performance.
    Degraded,

    /// Part of the service is unavailable.
    PartialOutage,

    /// The service is unavailable.
    MajorOutage,

    /// Planned maintenance in progress.
    UnderMaintenance,

    /// An incident is being investigated.
    Investigating,

    /// The cause of an incident has been identified.
    Identified,

    /// A fix has been applied and is being monitored.
    Monitoring,

    /// The incident has been resolved.
    Resolved,
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Operational => "operational",
            Self::Degraded => "degraded",
            Self::PartialOutage => "partial_outage",
            Self::MajorOutage => "major_outage",
            Self::UnderMaintenance => "under_maintenance",
            Self::Investigating => "investigating",
            Self::Identified => "identified",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
        };
        write!(f, "{s}")
    }
}

/// Normalized result of one status fetch. Produced fresh on every call;
/// owned by the caller, never persisted by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusResult {
    /// Coarse impact level.
    pub severity: Severity,

    /// Canonical status.
    pub status: Status,

    /// Human-readable description as reported by the provider.
    pub description: String,

    /// Last update time in epoch milliseconds.
    pub updated_at: i64,

    /// Timezone label reported by the provider, if any.
    pub timezone: Option<String>,
}
