//! Local persistence: raw key-value backends and the typed store over them.
//!
//! # Responsibility
//! - Keep serialization and backend details inside the storage boundary.
//! - Expose whole-slot get/set for the profile, habits and challenges.
//!
//! # Invariants
//! - Reads validate records before handing them out.
//! - Backend failures are reported as `StoreError::Backend`, never swallowed.

pub mod backend;
pub mod local_store;
