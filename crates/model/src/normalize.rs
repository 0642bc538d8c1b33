//! Free-text status normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Severity, Status};

// Matches "down" as a standalone word ("service is down") without matching
// substrings like "countdown" or "shutdown".
static DOWN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdown\b").unwrap());

/// Infer a canonical status from a free-text description plus a coarse
/// severity. Evaluated as an ordered cascade; the first matching rule wins.
///
/// The cascade, in order: incident workflow keywords (investigating,
/// identified, monitoring, resolved), maintenance, outage phrases, a
/// word-boundary match on "down", degraded/performance keywords, then a
/// pure severity fallback.
#[must_use]
pub fn infer_status(description: &str, severity: Severity) -> Status {
    let text = description.to_lowercase();

    if text.contains("investigating") {
        return Status::Investigating;
    }
    if text.contains("identified") {
        return Status::Identified;
    }
    if text.contains("monitoring") {
        return Status::Monitoring;
    }
    if text.contains("resolved") {
        return Status::Resolved;
    }

    if text.contains("maintenance") {
        return Status::UnderMaintenance;
    }

    if text.contains("major outage") || text.contains("complete outage") {
        return Status::MajorOutage;
    }
    if text.contains("partial outage") || text.contains("partial system") {
        return Status::PartialOutage;
    }

    if DOWN_WORD.is_match(&text) {
        return Status::MajorOutage;
    }

    if text.contains("degraded") || text.contains("performance") {
        return Status::Degraded;
    }

    if severity == Severity::None {
        return Status::Operational;
    }

    match severity {
        Severity::Critical | Severity::Major => Status::MajorOutage,
        Severity::Minor => Status::Degraded,
        Severity::None => Status::Operational,
    }
}
