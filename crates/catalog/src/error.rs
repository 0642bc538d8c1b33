use std::fmt::{self, Display};

use thiserror::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// One malformed catalog record, with every field violation found in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryViolation {
    /// Position of the record in the source list.
    pub index: usize,

    /// Identifier of the record, as authored (possibly empty).
    pub id: String,

    /// Field-level violation messages.
    pub problems: Vec<String>,
}

impl Display for EntryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} (id: {:?}): {}",
            self.index,
            self.id,
            self.problems.join("; ")
        )
    }
}

/// Errors that can occur in this crate.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// One or more catalog records failed validation. Carries every
    /// failing record, not just the first.
    #[error("catalog validation failed for {} entries:\n{}", .0.len(), format_violations(.0))]
    Invalid(Vec<EntryViolation>),
}

fn format_violations(violations: &[EntryViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
