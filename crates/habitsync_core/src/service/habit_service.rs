//! Habit use-case service and dashboard statistics.
//!
//! # Responsibility
//! - Add and toggle habits with whole-list persistence.
//! - Derive the dashboard counters (active, best streak, completion rate).
//!
//! # Invariants
//! - Titles are trimmed and must not be blank.
//! - An unmatched toggle performs no write.
//! - Writes read through `get_habits_for_update`, so a corrupt slot fails
//!   the action instead of being overwritten.

use crate::model::habit::{Habit, HabitDraft};
use crate::mutation::habit::{add_habit, toggle_habit};
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::{normalize_title, ServiceResult};
use crate::storage::backend::KvBackend;
use crate::storage::local_store::{LocalStore, StoreResult};
use log::info;

/// Summary counters shown above the habit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_habits: usize,
    /// Highest `streak` among all habits, 0 when there are none.
    pub current_streak: u32,
    /// Completed share rounded to a whole percent, 0 when there are no habits.
    pub completion_rate_percent: u32,
}

impl DashboardStats {
    pub fn from_habits(habits: &[Habit]) -> Self {
        let total = habits.len();
        let completed = habits.iter().filter(|habit| habit.completed).count();
        let completion_rate_percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            active_habits: total,
            current_streak: habits.iter().map(|habit| habit.streak).max().unwrap_or(0),
            completion_rate_percent,
        }
    }
}

pub struct HabitService<'s, B: KvBackend, C: Clock = SystemClock> {
    store: &'s LocalStore<B>,
    clock: C,
}

impl<'s, B: KvBackend> HabitService<'s, B, SystemClock> {
    pub fn new(store: &'s LocalStore<B>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<'s, B: KvBackend, C: Clock> HabitService<'s, B, C> {
    pub fn with_clock(store: &'s LocalStore<B>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn list(&self) -> StoreResult<Vec<Habit>> {
        self.store.get_habits()
    }

    /// Appends a habit and returns the stored record.
    pub fn add(&self, draft: HabitDraft) -> ServiceResult<Habit> {
        let draft = HabitDraft {
            title: normalize_title(draft.title)?,
            ..draft
        };
        let current = self.store.get_habits_for_update()?;
        let mut updated = add_habit(&current, draft, self.clock.now());
        self.store.set_habits(&updated)?;

        // `add_habit` always appends exactly one record.
        let created = updated.remove(updated.len() - 1);
        info!(
            "event=habit_add module=service status=ok habit_id={} total={}",
            created.id,
            current.len() + 1
        );
        Ok(created)
    }

    /// Flips completion for `id` and returns the updated habit.
    ///
    /// Returns `Ok(None)` without writing when no habit has that id.
    pub fn toggle(&self, id: &str) -> ServiceResult<Option<Habit>> {
        let current = self.store.get_habits_for_update()?;
        if !current.iter().any(|habit| habit.id == id) {
            info!("event=habit_toggle module=service status=not_found habit_id={id}");
            return Ok(None);
        }

        let updated = toggle_habit(&current, id);
        self.store.set_habits(&updated)?;
        let toggled = updated.into_iter().find(|habit| habit.id == id);
        if let Some(habit) = &toggled {
            info!(
                "event=habit_toggle module=service status=ok habit_id={id} completed={}",
                habit.completed
            );
        }
        Ok(toggled)
    }

    pub fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        Ok(DashboardStats::from_habits(&self.store.get_habits()?))
    }
}
