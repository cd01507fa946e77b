//! Typed slots over a key-value backend.
//!
//! # Responsibility
//! - Persist the profile, habit list and challenge list under fixed keys.
//! - Strictly decode stored JSON and apply the corrupt-state policy.
//!
//! # Invariants
//! - Every write replaces a whole slot; there are no partial updates.
//! - A missing key is never an error: `None` for the user, empty lists.
//! - Corrupt text is never silently masked without a `warn` event.
//! - Under `TreatAsAbsent`, one invalid record hides its whole slot; writers
//!   must read through the `*_for_update` methods, which always reject.

use crate::model::challenge::Challenge;
use crate::model::habit::Habit;
use crate::model::record::Validate;
use crate::model::user::User;
use crate::storage::backend::{BackendError, KvBackend, MemoryKvBackend, SqliteKvBackend};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const USER_KEY: &str = "habitsync_user";
pub const HABITS_KEY: &str = "habitsync_habits";
pub const CHALLENGES_KEY: &str = "habitsync_challenges";

const ALL_KEYS: [&str; 3] = [USER_KEY, HABITS_KEY, CHALLENGES_KEY];

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Backend(BackendError),
    /// Record could not be serialized for writing.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Stored text failed strict decode under `CorruptStatePolicy::Reject`.
    CorruptState { key: &'static str, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
            Self::CorruptState { key, message } => {
                write!(f, "corrupt stored state under `{key}`: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
            Self::CorruptState { .. } => None,
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

/// What a read does when the stored text fails strict decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptStatePolicy {
    /// Log a warning and return the absent/empty value.
    #[default]
    TreatAsAbsent,
    /// Return `StoreError::CorruptState`.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub corrupt_state: CorruptStatePolicy,
}

impl StoreOptions {
    pub fn strict() -> Self {
        Self {
            corrupt_state: CorruptStatePolicy::Reject,
        }
    }
}

/// Handle over the three persisted slots.
///
/// Constructed once at startup and passed to whatever needs it.
pub struct LocalStore<B: KvBackend> {
    backend: B,
    options: StoreOptions,
}

impl<B: KvBackend> LocalStore<B> {
    pub fn new(backend: B, options: StoreOptions) -> Self {
        Self { backend, options }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Returns the stored profile, or `None` when no profile was saved.
    pub fn get_user(&self) -> StoreResult<Option<User>> {
        self.read_slot(USER_KEY)
    }

    pub fn set_user(&self, user: &User) -> StoreResult<()> {
        self.write_slot(USER_KEY, user)
    }

    /// Returns the stored habits in insertion order, empty when never saved.
    pub fn get_habits(&self) -> StoreResult<Vec<Habit>> {
        Ok(self.read_slot(HABITS_KEY)?.unwrap_or_default())
    }

    pub fn set_habits(&self, habits: &[Habit]) -> StoreResult<()> {
        self.write_slot(HABITS_KEY, habits)
    }

    /// Returns the stored challenges in insertion order, empty when never saved.
    pub fn get_challenges(&self) -> StoreResult<Vec<Challenge>> {
        Ok(self.read_slot(CHALLENGES_KEY)?.unwrap_or_default())
    }

    /// Like `get_user`, but always rejects corrupt text.
    ///
    /// Read-modify-write paths use the `*_for_update` reads: a corrupt slot
    /// read as absent and then rewritten would lose every valid record in it.
    pub fn get_user_for_update(&self) -> StoreResult<Option<User>> {
        self.read_slot_with(USER_KEY, CorruptStatePolicy::Reject)
    }

    pub fn get_habits_for_update(&self) -> StoreResult<Vec<Habit>> {
        Ok(self
            .read_slot_with(HABITS_KEY, CorruptStatePolicy::Reject)?
            .unwrap_or_default())
    }

    pub fn get_challenges_for_update(&self) -> StoreResult<Vec<Challenge>> {
        Ok(self
            .read_slot_with(CHALLENGES_KEY, CorruptStatePolicy::Reject)?
            .unwrap_or_default())
    }

    pub fn set_challenges(&self, challenges: &[Challenge]) -> StoreResult<()> {
        self.write_slot(CHALLENGES_KEY, challenges)
    }

    /// Removes all three slots. Irreversible.
    pub fn clear_all(&self) -> StoreResult<()> {
        self.backend.remove_all(&ALL_KEYS)?;
        info!("event=store_clear module=store status=ok keys={}", ALL_KEYS.len());
        Ok(())
    }

    fn read_slot<T>(&self, key: &'static str) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Validate,
    {
        self.read_slot_with(key, self.options.corrupt_state)
    }

    fn read_slot_with<T>(
        &self,
        key: &'static str,
        policy: CorruptStatePolicy,
    ) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Validate,
    {
        let Some(text) = self.backend.get(key)? else {
            debug!("event=store_read module=store status=absent key={key}");
            return Ok(None);
        };

        match decode_strict::<T>(&text) {
            Ok(value) => {
                debug!(
                    "event=store_read module=store status=ok key={key} bytes={}",
                    text.len()
                );
                Ok(Some(value))
            }
            Err(message) => match policy {
                CorruptStatePolicy::TreatAsAbsent => {
                    warn!(
                        "event=store_read module=store status=corrupt policy=treat_as_absent key={key} bytes={} error={message}",
                        text.len()
                    );
                    Ok(None)
                }
                CorruptStatePolicy::Reject => {
                    warn!(
                        "event=store_read module=store status=corrupt policy=reject key={key} bytes={} error={message}",
                        text.len()
                    );
                    Err(StoreError::CorruptState { key, message })
                }
            },
        }
    }

    fn write_slot<T>(&self, key: &'static str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let text =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.backend.set(key, &text)?;
        debug!(
            "event=store_write module=store status=ok key={key} bytes={}",
            text.len()
        );
        Ok(())
    }
}

fn decode_strict<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(text).map_err(|err| err.to_string())?;
    value.validate().map_err(|err| err.to_string())?;
    Ok(value)
}

impl LocalStore<SqliteKvBackend> {
    /// Opens a durable store at `path`.
    pub fn open(path: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        Ok(Self::new(SqliteKvBackend::open(path)?, options))
    }

    pub fn open_sqlite_in_memory(options: StoreOptions) -> StoreResult<Self> {
        Ok(Self::new(SqliteKvBackend::open_in_memory()?, options))
    }

    /// Releases the underlying connection.
    pub fn close(self) -> StoreResult<()> {
        self.backend.close()?;
        info!("event=store_close module=store status=ok");
        Ok(())
    }
}

impl LocalStore<MemoryKvBackend> {
    pub fn in_memory(options: StoreOptions) -> Self {
        Self::new(MemoryKvBackend::new(), options)
    }
}
