//! Challenge record, its enums and the list filter.
//!
//! # Invariants
//! - `end_date = start_date + CHALLENGE_DURATION_DAYS` when created here.
//! - Stored challenges must not end before they start.
//! - `participants` is append-only and may contain duplicates.

use super::record::{ensure_id, RecordId, RecordValidationError, Validate};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed length of every challenge.
pub const CHALLENGE_DURATION_DAYS: i64 = 30;

/// Challenge category, serialized as the `type` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    #[default]
    Fitness,
    Productivity,
    Mindfulness,
}

impl ChallengeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Productivity => "productivity",
            Self::Mindfulness => "mindfulness",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One community challenge as stored under the challenges key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Serialized as `type` to match stored data.
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    pub difficulty: Difficulty,
    pub participants: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Challenge {
    /// Builds a new challenge starting at `start` with no participants.
    pub fn from_draft(id: RecordId, draft: ChallengeDraft, start: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            difficulty: draft.difficulty,
            participants: Vec::new(),
            start_date: start,
            end_date: start + Duration::days(CHALLENGE_DURATION_DAYS),
        }
    }

    pub fn has_participant(&self, participant_id: &str) -> bool {
        self.participants.iter().any(|item| item == participant_id)
    }
}

impl Validate for Challenge {
    fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_id("challenge", &self.id)?;
        if self.end_date < self.start_date {
            return Err(RecordValidationError::ReversedWindow {
                id: self.id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

/// User-supplied fields for a challenge that does not exist yet.
///
/// Defaults mirror the create form: fitness, medium difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeDraft {
    pub title: String,
    pub description: String,
    pub kind: ChallengeType,
    pub difficulty: Difficulty,
}

impl ChallengeDraft {
    pub fn new(title: impl Into<String>, kind: ChallengeType, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind,
            difficulty,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Type filter for challenge lists; `All` is the "all" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChallengeFilter {
    #[default]
    All,
    Type(ChallengeType),
}

impl ChallengeFilter {
    pub fn matches(self, challenge: &Challenge) -> bool {
        match self {
            Self::All => true,
            Self::Type(kind) => challenge.kind == kind,
        }
    }
}

/// Unknown filter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown challenge filter `{}`; expected all|fitness|productivity|mindfulness",
            self.0
        )
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for ChallengeFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "fitness" => Ok(Self::Type(ChallengeType::Fitness)),
            "productivity" => Ok(Self::Type(ChallengeType::Productivity)),
            "mindfulness" => Ok(Self::Type(ChallengeType::Mindfulness)),
            _ => Err(UnknownFilter(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChallengeFilter, ChallengeType};

    #[test]
    fn filter_parses_sentinel_and_types() {
        assert_eq!("all".parse::<ChallengeFilter>(), Ok(ChallengeFilter::All));
        assert_eq!(
            " Mindfulness ".parse::<ChallengeFilter>(),
            Ok(ChallengeFilter::Type(ChallengeType::Mindfulness))
        );
        assert!("cardio".parse::<ChallengeFilter>().is_err());
    }
}
