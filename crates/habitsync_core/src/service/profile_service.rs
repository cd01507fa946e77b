//! Local profile use-case service.
//!
//! # Responsibility
//! - Build and persist the single `User` record from profile edits.
//! - Derive `User::challenges` from challenge participants.
//!
//! # Invariants
//! - Only one profile exists; saving overwrites it wholesale.
//! - `User::challenges` always equals the ids of challenges listing the user.
//! - Reads for a save reject corrupt text rather than overwrite it.

use crate::model::challenge::Challenge;
use crate::model::user::{User, LOCAL_PROFILE_ID};
use crate::mutation::challenge::joined_challenge_ids;
use crate::service::error::{ServiceError, ServiceResult};
use crate::storage::backend::KvBackend;
use crate::storage::local_store::{LocalStore, StoreResult};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub points: u32,
    pub streak_count: u32,
}

pub struct ProfileService<'s, B: KvBackend> {
    store: &'s LocalStore<B>,
}

impl<'s, B: KvBackend> ProfileService<'s, B> {
    pub fn new(store: &'s LocalStore<B>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> StoreResult<Option<User>> {
        self.store.get_user()
    }

    /// Validates `update` and overwrites the stored profile.
    ///
    /// Keeps the existing profile id (or `LOCAL_PROFILE_ID` for a first
    /// save) so challenge membership carries over. The stored `avatar` and
    /// legacy `habits` copy are kept as they are.
    pub fn save(&self, update: ProfileUpdate) -> ServiceResult<User> {
        let name = update.name.trim();
        if name.is_empty() {
            return Err(ServiceError::BlankName);
        }
        let email = update.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ServiceError::InvalidEmail(update.email));
        }

        let existing = self.store.get_user_for_update()?;
        let challenges = self.store.get_challenges_for_update()?;
        let (id, avatar, habits) = match existing {
            Some(user) => (user.id, user.avatar, user.habits),
            None => (LOCAL_PROFILE_ID.to_string(), String::new(), Vec::new()),
        };

        let joined = joined_challenge_ids(&challenges, &id);
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            points: update.points,
            streak_count: update.streak_count,
            bio: update.bio.trim().to_string(),
            avatar,
            habits,
            challenges: joined,
        };
        self.store.set_user(&user)?;
        info!(
            "event=profile_save module=service status=ok joined_challenges={}",
            user.challenges.len()
        );
        Ok(user)
    }
}

/// Rewrites the stored profile's `challenges` from `challenges` when they differ.
pub(crate) fn sync_profile_membership<B: KvBackend>(
    store: &LocalStore<B>,
    challenges: &[Challenge],
) -> StoreResult<()> {
    let Some(mut user) = store.get_user_for_update()? else {
        return Ok(());
    };

    let joined = joined_challenge_ids(challenges, &user.id);
    if user.challenges == joined {
        return Ok(());
    }
    user.challenges = joined;
    store.set_user(&user)?;
    debug!(
        "event=profile_sync module=service status=ok joined_challenges={}",
        user.challenges.len()
    );
    Ok(())
}
