//! Pure list mutations applied before a whole-list write.
//!
//! # Responsibility
//! - Turn a current list plus one intent into a fresh list.
//!
//! # Invariants
//! - Inputs are borrowed and never modified.
//! - Insertion order is preserved; new records are appended.
//! - An unmatched id yields an unchanged copy, not an error.

pub mod challenge;
pub mod habit;
