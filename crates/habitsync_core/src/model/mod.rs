//! Domain records persisted by the local store.
//!
//! # Responsibility
//! - Define the `User`, `Habit` and `Challenge` wire shapes.
//! - Provide strict validation applied on every read from storage.
//!
//! # Invariants
//! - Records reference each other only by string id, never by identity.
//! - Field names serialize in camelCase to stay compatible with stored data.

pub mod challenge;
pub mod habit;
pub mod record;
pub mod user;
