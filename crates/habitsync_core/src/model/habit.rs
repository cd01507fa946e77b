//! Habit record and its creation draft.
//!
//! # Invariants
//! - `created_at` is stamped once at creation and never rewritten.
//! - `streak` is never advanced by this crate.
//! - `completed` is a plain flag with no notion of "today".

use super::record::{ensure_id, RecordId, RecordValidationError, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often a habit is meant to be performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

/// One tracked habit as stored under the habits key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub frequency: HabitFrequency,
    pub streak: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Builds a new habit from a draft with zeroed progress fields.
    pub fn from_draft(id: RecordId, draft: HabitDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            frequency: draft.frequency,
            streak: 0,
            completed: false,
            created_at,
        }
    }
}

impl Validate for Habit {
    fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_id("habit", &self.id)
    }
}

/// User-supplied fields for a habit that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitDraft {
    pub title: String,
    pub description: String,
    pub frequency: HabitFrequency,
}

impl HabitDraft {
    pub fn new(title: impl Into<String>, frequency: HabitFrequency) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            frequency,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
