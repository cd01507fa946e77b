//! Habit list mutations.

use crate::model::habit::{Habit, HabitDraft};
use crate::model::record::unique_record_id;
use chrono::{DateTime, Utc};

/// Appends a new habit built from `draft`, stamped with `now`.
///
/// The new id is unique within the returned list.
pub fn add_habit(habits: &[Habit], draft: HabitDraft, now: DateTime<Utc>) -> Vec<Habit> {
    let id = unique_record_id(habits.iter().map(|habit| habit.id.as_str()));
    let mut updated = Vec::with_capacity(habits.len() + 1);
    updated.extend_from_slice(habits);
    updated.push(Habit::from_draft(id, draft, now));
    updated
}

/// Flips `completed` on the habit whose id matches.
pub fn toggle_habit(habits: &[Habit], id: &str) -> Vec<Habit> {
    habits
        .iter()
        .map(|habit| {
            if habit.id == id {
                Habit {
                    completed: !habit.completed,
                    ..habit.clone()
                }
            } else {
                habit.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{add_habit, toggle_habit};
    use crate::model::habit::{HabitDraft, HabitFrequency};
    use chrono::{TimeZone, Utc};

    #[test]
    fn add_then_toggle_marks_only_the_new_habit() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let first = add_habit(&[], HabitDraft::new("Read", HabitFrequency::Daily), now);
        let second = add_habit(&first, HabitDraft::new("Run", HabitFrequency::Weekly), now);

        let toggled = toggle_habit(&second, &second[1].id);
        assert!(!toggled[0].completed);
        assert!(toggled[1].completed);
        assert!(!second[1].completed);
    }
}
