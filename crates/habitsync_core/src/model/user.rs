//! Single local profile record.
//!
//! # Invariants
//! - At most one `User` is stored at a time.
//! - `challenges` is a derived copy of challenge membership; the challenge
//!   list's `participants` is the source of truth.

use super::habit::Habit;
use super::record::{ensure_id, RecordId, RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// Id used for the local profile and as participant id before a profile exists.
pub const LOCAL_PROFILE_ID: &str = "current-user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub points: u32,
    pub streak_count: u32,
    #[serde(default)]
    pub bio: String,
    /// Avatar image URL; not editable through `ProfileService`.
    #[serde(default)]
    pub avatar: String,
    /// Kept for wire compatibility; the habit list lives under its own key.
    pub habits: Vec<Habit>,
    /// Ids of challenges this user participates in.
    pub challenges: Vec<RecordId>,
}

impl User {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            points: 0,
            streak_count: 0,
            bio: String::new(),
            avatar: String::new(),
            habits: Vec::new(),
            challenges: Vec::new(),
        }
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_id("user", &self.id)?;
        self.habits.validate()
    }
}
