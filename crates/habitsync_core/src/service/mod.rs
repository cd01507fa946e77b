//! Use-case services over the local store.
//!
//! # Responsibility
//! - Run "read list, mutate, write whole list back" for each user action.
//! - Keep membership bookkeeping consistent across slots.
//!
//! # Invariants
//! - Services never bypass `LocalStore` strict decode.
//! - Services stay storage-agnostic (generic over `KvBackend`).

pub mod challenge_service;
pub mod clock;
pub mod error;
pub mod habit_service;
pub mod profile_service;
