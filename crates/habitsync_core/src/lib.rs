//! Core persistence and list logic for HabitSync.
//! Local slots for one profile, a habit list and a challenge list, plus the
//! mutations the app applies to them.

pub mod db;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::challenge::{
    Challenge, ChallengeDraft, ChallengeFilter, ChallengeType, Difficulty, UnknownFilter,
    CHALLENGE_DURATION_DAYS,
};
pub use model::habit::{Habit, HabitDraft, HabitFrequency};
pub use model::record::{new_record_id, RecordId, RecordValidationError, Validate};
pub use model::user::{User, LOCAL_PROFILE_ID};
pub use mutation::challenge::{
    add_challenge, filter_by_type, join_challenge, joined_challenge_ids,
};
pub use mutation::habit::{add_habit, toggle_habit};
pub use service::challenge_service::{ChallengeService, ChallengeSummary, JoinOutcome};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::error::{ServiceError, ServiceResult};
pub use service::habit_service::{DashboardStats, HabitService};
pub use service::profile_service::{ProfileService, ProfileUpdate};
pub use storage::backend::{
    BackendError, BackendResult, KvBackend, MemoryKvBackend, SqliteKvBackend,
};
pub use storage::local_store::{
    CorruptStatePolicy, LocalStore, StoreError, StoreOptions, StoreResult, CHALLENGES_KEY,
    HABITS_KEY, USER_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
