//! Shared record identity and validation contracts.
//!
//! # Responsibility
//! - Generate record ids for newly created habits and challenges.
//! - Define the validation error returned by strict decode.
//!
//! # Invariants
//! - Ids are opaque strings; older short ids must still decode.
//! - A generated id never collides with an id passed as `existing`.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record identifier as stored on the wire.
pub type RecordId = String;

/// Strict-decode failure for a stored or caller-built record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// `id` is empty or whitespace.
    EmptyId { record: &'static str },
    /// Challenge window ends before it starts.
    ReversedWindow {
        id: RecordId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { record } => write!(f, "{record} id must not be empty"),
            Self::ReversedWindow { id, start, end } => write!(
                f,
                "challenge {id}: endDate ({}) must be >= startDate ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Records that can check their own invariants after decode.
pub trait Validate {
    fn validate(&self) -> Result<(), RecordValidationError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), RecordValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// Returns a fresh random id (UUID v4, hyphenated).
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Returns a fresh id guaranteed not to appear in `existing`.
pub fn unique_record_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> RecordId {
    let taken: HashSet<&str> = existing.into_iter().collect();
    loop {
        let candidate = new_record_id();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

pub(crate) fn ensure_id(record: &'static str, id: &str) -> Result<(), RecordValidationError> {
    if id.trim().is_empty() {
        return Err(RecordValidationError::EmptyId { record });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_id, unique_record_id, RecordValidationError};

    #[test]
    fn unique_record_id_skips_existing_values() {
        let existing = ["a1b2c3".to_string(), "zz9".to_string()];
        let id = unique_record_id(existing.iter().map(String::as_str));
        assert!(!existing.contains(&id));
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn ensure_id_rejects_blank() {
        assert_eq!(
            ensure_id("habit", "  "),
            Err(RecordValidationError::EmptyId { record: "habit" })
        );
        assert!(ensure_id("habit", "k3j9x").is_ok());
    }
}
