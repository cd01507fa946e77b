//! Challenge use-case service.
//!
//! # Responsibility
//! - Create, list and join challenges with whole-list persistence.
//! - Resolve the local participant id and keep the profile's copy of
//!   membership in sync after a join.
//!
//! # Invariants
//! - `join` is idempotent: an existing member is not appended again.
//! - The participant id is the stored profile id, or `LOCAL_PROFILE_ID`.
//! - Writes read through the `*_for_update` methods and never overwrite a
//!   corrupt slot.

use crate::model::challenge::{Challenge, ChallengeDraft, ChallengeFilter};
use crate::model::user::LOCAL_PROFILE_ID;
use crate::mutation::challenge::{add_challenge, filter_by_type, join_challenge};
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::{normalize_title, ServiceResult};
use crate::service::profile_service::sync_profile_membership;
use crate::storage::backend::KvBackend;
use crate::storage::local_store::{LocalStore, StoreResult};
use log::info;

/// Result of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    NotFound,
}

/// Card-level facts about one challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeSummary {
    pub duration_days: i64,
    pub participant_count: usize,
    pub joined: bool,
}

impl ChallengeSummary {
    pub fn of(challenge: &Challenge, participant_id: &str) -> Self {
        Self {
            duration_days: (challenge.end_date - challenge.start_date).num_days(),
            participant_count: challenge.participants.len(),
            joined: challenge.has_participant(participant_id),
        }
    }
}

pub struct ChallengeService<'s, B: KvBackend, C: Clock = SystemClock> {
    store: &'s LocalStore<B>,
    clock: C,
}

impl<'s, B: KvBackend> ChallengeService<'s, B, SystemClock> {
    pub fn new(store: &'s LocalStore<B>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<'s, B: KvBackend, C: Clock> ChallengeService<'s, B, C> {
    pub fn with_clock(store: &'s LocalStore<B>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn list(&self, filter: ChallengeFilter) -> StoreResult<Vec<Challenge>> {
        Ok(filter_by_type(&self.store.get_challenges()?, filter))
    }

    /// Appends a challenge running for the next 30 days.
    pub fn create(&self, draft: ChallengeDraft) -> ServiceResult<Challenge> {
        let draft = ChallengeDraft {
            title: normalize_title(draft.title)?,
            ..draft
        };
        let current = self.store.get_challenges_for_update()?;
        let mut updated = add_challenge(&current, draft, self.clock.now());
        self.store.set_challenges(&updated)?;

        // `add_challenge` always appends exactly one record.
        let created = updated.remove(updated.len() - 1);
        info!(
            "event=challenge_create module=service status=ok challenge_id={} type={}",
            created.id,
            created.kind.as_str()
        );
        Ok(created)
    }

    /// Id used when the local user joins a challenge.
    pub fn participant_id(&self) -> StoreResult<String> {
        Ok(self
            .store
            .get_user()?
            .map(|user| user.id)
            .unwrap_or_else(|| LOCAL_PROFILE_ID.to_string()))
    }

    /// Adds the local participant to challenge `id`.
    pub fn join(&self, id: &str) -> ServiceResult<JoinOutcome> {
        let current = self.store.get_challenges_for_update()?;
        let participant = self.participant_id()?;

        let outcome = match current.iter().find(|challenge| challenge.id == id) {
            None => JoinOutcome::NotFound,
            Some(challenge) if challenge.has_participant(&participant) => {
                JoinOutcome::AlreadyJoined
            }
            Some(_) => {
                let updated = join_challenge(&current, id, &participant);
                self.store.set_challenges(&updated)?;
                sync_profile_membership(self.store, &updated)?;
                JoinOutcome::Joined
            }
        };

        info!(
            "event=challenge_join module=service status={} challenge_id={id}",
            match outcome {
                JoinOutcome::Joined => "ok",
                JoinOutcome::AlreadyJoined => "already_joined",
                JoinOutcome::NotFound => "not_found",
            }
        );
        Ok(outcome)
    }

    pub fn summary(&self, challenge: &Challenge) -> StoreResult<ChallengeSummary> {
        Ok(ChallengeSummary::of(challenge, &self.participant_id()?))
    }
}
