//! Challenge list mutations and membership queries.

use crate::model::challenge::{Challenge, ChallengeDraft, ChallengeFilter};
use crate::model::record::{unique_record_id, RecordId};
use chrono::{DateTime, Utc};

/// Appends a new challenge starting at `now` and lasting 30 days.
pub fn add_challenge(
    challenges: &[Challenge],
    draft: ChallengeDraft,
    now: DateTime<Utc>,
) -> Vec<Challenge> {
    let id = unique_record_id(challenges.iter().map(|challenge| challenge.id.as_str()));
    let mut updated = Vec::with_capacity(challenges.len() + 1);
    updated.extend_from_slice(challenges);
    updated.push(Challenge::from_draft(id, draft, now));
    updated
}

/// Appends `participant_id` to the matching challenge's participants.
///
/// No membership check happens here; joining twice records two entries.
pub fn join_challenge(challenges: &[Challenge], id: &str, participant_id: &str) -> Vec<Challenge> {
    challenges
        .iter()
        .map(|challenge| {
            let mut next = challenge.clone();
            if next.id == id {
                next.participants.push(participant_id.to_string());
            }
            next
        })
        .collect()
}

/// Returns the challenges accepted by `filter`, keeping their relative order.
pub fn filter_by_type(challenges: &[Challenge], filter: ChallengeFilter) -> Vec<Challenge> {
    challenges
        .iter()
        .filter(|challenge| filter.matches(challenge))
        .cloned()
        .collect()
}

/// Ids of every challenge listing `participant_id`, in list order, deduplicated.
pub fn joined_challenge_ids(challenges: &[Challenge], participant_id: &str) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = Vec::new();
    for challenge in challenges {
        if challenge.has_participant(participant_id) && !ids.contains(&challenge.id) {
            ids.push(challenge.id.clone());
        }
    }
    ids
}
