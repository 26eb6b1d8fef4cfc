//! Habit collection with write-through persistence.

use chrono::{DateTime, NaiveDate, Utc};

use super::{catalog, read_collection, write_collection, Habit, HabitUpdate, UserHabit};
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{KeyValueStore, HABITS_KEY};

/// Owns the user's habits stored under [`HABITS_KEY`].
///
/// Nothing is cached: each call loads the full collection, applies one
/// change and saves it back before returning.
pub struct HabitTracker<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> HabitTracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// All habits. Missing or unreadable data loads as an empty list.
    pub fn load(&self) -> Vec<UserHabit> {
        read_collection(&self.store, HABITS_KEY)
    }

    pub fn get(&self, id: &str) -> Option<UserHabit> {
        self.load().into_iter().find(|h| h.id() == id)
    }

    fn save(&self, habits: &[UserHabit]) -> Result<()> {
        write_collection(&self.store, HABITS_KEY, habits)
    }

    /// Millisecond timestamp, bumped past any id already in use.
    fn next_id(&self, habits: &[UserHabit]) -> String {
        let mut candidate = self.clock.now().timestamp_millis();
        while habits.iter().any(|h| h.id() == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Start tracking `template` with a fresh id and zero streak.
    pub fn add(&self, template: Habit) -> Result<UserHabit> {
        let mut habits = self.load();
        let habit = UserHabit {
            habit: Habit {
                id: self.next_id(&habits),
                ..template
            },
            is_completed_today: false,
            streak: 0,
            last_completed: None,
            last_feedback: None,
            last_feedback_at: None,
            created_at: self.today(),
        };
        habits.push(habit.clone());
        self.save(&habits)?;
        tracing::debug!(habit_id = habit.id(), title = %habit.habit.title, "habit added");
        Ok(habit)
    }

    /// Start tracking a habit from the built-in catalog.
    pub fn add_from_catalog(&self, template_id: &str) -> Result<UserHabit> {
        let entry = catalog::find(template_id)
            .ok_or_else(|| ValidationError::UnknownHabitTemplate(template_id.to_string()))?;
        self.add(entry.to_habit())
    }

    /// Load, change the habit with `id`, save. Unknown ids write nothing.
    fn mutate<F>(&self, id: &str, change: F) -> Result<UserHabit>
    where
        F: FnOnce(&mut UserHabit, NaiveDate, DateTime<Utc>),
    {
        let mut habits = self.load();
        let habit = habits
            .iter_mut()
            .find(|h| h.id() == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;
        change(habit, self.clock.today(), self.clock.now());
        let updated = habit.clone();
        self.save(&habits)?;
        Ok(updated)
    }

    /// Mark the habit done today.
    ///
    /// The streak grows by one only on the first completion of a calendar
    /// day, so repeated calls on the same day are idempotent. A gap of
    /// several days does not reset the streak.
    pub fn complete(&self, id: &str, feedback: Option<&str>) -> Result<UserHabit> {
        let habit = self.mutate(id, |habit, today, now| {
            if habit.last_completed != Some(today) {
                habit.streak = habit.streak.saturating_add(1);
            }
            habit.is_completed_today = true;
            habit.last_completed = Some(today);
            if let Some(text) = feedback {
                habit.last_feedback = Some(text.to_string());
                habit.last_feedback_at = Some(now);
            }
        })?;
        tracing::debug!(habit_id = id, streak = habit.streak, "habit completed");
        Ok(habit)
    }

    /// Clear today's completion and take one off the streak.
    ///
    /// `lastCompleted` keeps its value, so completing again on the same day
    /// does not earn the point back.
    pub fn undo_completion(&self, id: &str) -> Result<UserHabit> {
        let habit = self.mutate(id, |habit, _, _| {
            habit.is_completed_today = false;
            habit.streak = habit.streak.saturating_sub(1);
        })?;
        tracing::debug!(habit_id = id, streak = habit.streak, "habit completion undone");
        Ok(habit)
    }

    /// Shallow-merge `changes` into the habit.
    pub fn update(&self, id: &str, changes: HabitUpdate) -> Result<UserHabit> {
        self.mutate(id, |habit, _, _| changes.apply_to(habit))
    }

    /// Stop tracking the habit. Other records are saved untouched.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut habits = self.load();
        let before = habits.len();
        habits.retain(|h| h.id() != id);
        if habits.len() == before {
            return Err(CoreError::HabitNotFound(id.to_string()));
        }
        self.save(&habits)?;
        tracing::debug!(habit_id = id, "habit deleted");
        Ok(())
    }

    /// Whether the habit is done for the current calendar day. Unknown ids
    /// are not.
    pub fn is_completed_today(&self, id: &str) -> bool {
        let today = self.today();
        self.get(id).is_some_and(|h| h.completed_on(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::StorageError;
    use crate::habits::{Difficulty, Frequency, HabitCategory};
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn template(title: &str) -> Habit {
        Habit {
            id: "template".into(),
            title: title.into(),
            description: String::new(),
            category: HabitCategory::Mindfulness,
            frequency: Frequency::Daily,
            difficulty: Difficulty::Easy,
        }
    }

    fn tracker() -> (HabitTracker<MemoryStore>, ManualClock) {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        (HabitTracker::with_clock(MemoryStore::new(), clock.clone()), clock)
    }

    #[test]
    fn add_starts_fresh() {
        let (tracker, _) = tracker();
        let habit = tracker.add(template("Meditate")).unwrap();
        assert_ne!(habit.id(), "template");
        assert_eq!(habit.streak, 0);
        assert!(!habit.is_completed_today);
        assert_eq!(habit.created_at.to_string(), "2024-06-01");
        assert_eq!(tracker.load(), vec![habit]);
    }

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let (tracker, _) = tracker();
        let a = tracker.add(template("A")).unwrap();
        let b = tracker.add(template("B")).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn complete_twice_same_day_counts_once() {
        let (tracker, _) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        tracker.complete(&id, None).unwrap();
        let habit = tracker.complete(&id, None).unwrap();
        assert_eq!(habit.streak, 1);
        assert!(tracker.is_completed_today(&id));
    }

    #[test]
    fn consecutive_days_grow_the_streak() {
        let (tracker, clock) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        for _ in 0..3 {
            tracker.complete(&id, None).unwrap();
            clock.advance_days(1);
        }
        assert_eq!(tracker.get(&id).unwrap().streak, 3);
    }

    #[test]
    fn missed_day_does_not_reset_streak() {
        let (tracker, clock) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        tracker.complete(&id, None).unwrap();
        clock.advance_days(5);
        assert!(!tracker.is_completed_today(&id));
        assert_eq!(tracker.complete(&id, None).unwrap().streak, 2);
    }

    #[test]
    fn stale_flag_from_yesterday_still_counts_today() {
        let (tracker, clock) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        tracker.complete(&id, None).unwrap();
        clock.advance_days(1);
        // The flag is still set from yesterday; the query disagrees.
        assert!(tracker.get(&id).unwrap().is_completed_today);
        assert!(!tracker.is_completed_today(&id));
        assert_eq!(tracker.complete(&id, None).unwrap().streak, 2);
    }

    #[test]
    fn undo_keeps_last_completed() {
        let (tracker, _) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        tracker.complete(&id, None).unwrap();
        let undone = tracker.undo_completion(&id).unwrap();
        assert_eq!(undone.streak, 0);
        assert!(!undone.is_completed_today);
        assert_eq!(undone.last_completed, Some(tracker.today()));

        // Same day, lastCompleted already equals today: no point back.
        let redone = tracker.complete(&id, None).unwrap();
        assert_eq!(redone.streak, 0);
        assert!(redone.is_completed_today);
    }

    #[test]
    fn undo_floors_at_zero() {
        let (tracker, _) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        assert_eq!(tracker.undo_completion(&id).unwrap().streak, 0);
        assert_eq!(tracker.undo_completion(&id).unwrap().streak, 0);
    }

    #[test]
    fn complete_records_feedback() {
        let (tracker, clock) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        let habit = tracker.complete(&id, Some("felt calmer")).unwrap();
        assert_eq!(habit.last_feedback.as_deref(), Some("felt calmer"));
        assert_eq!(habit.last_feedback_at, Some(clock.now()));
    }

    #[test]
    fn update_merges_fields() {
        let (tracker, _) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        let updated = tracker
            .update(
                &id,
                HabitUpdate {
                    difficulty: Some(Difficulty::Hard),
                    ..HabitUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.habit.difficulty, Difficulty::Hard);
        assert_eq!(updated.habit.title, "Meditate");
        assert_eq!(tracker.get(&id).unwrap(), updated);
    }

    #[test]
    fn complete_at_max_streak_saturates() {
        let (tracker, _) = tracker();
        let id = tracker.add(template("Meditate")).unwrap().habit.id;
        tracker
            .update(
                &id,
                HabitUpdate {
                    streak: Some(u32::MAX),
                    ..HabitUpdate::default()
                },
            )
            .unwrap();
        let habit = tracker.complete(&id, None).unwrap();
        assert_eq!(habit.streak, u32::MAX);
        assert!(habit.is_completed_today);
    }

    #[test]
    fn unknown_id_is_an_error_and_writes_nothing() {
        let (tracker, _) = tracker();
        assert!(matches!(
            tracker.complete("nope", None),
            Err(CoreError::HabitNotFound(_))
        ));
        assert!(matches!(tracker.delete("nope"), Err(CoreError::HabitNotFound(_))));
        assert!(tracker.store.raw(HABITS_KEY).is_none());
        assert!(!tracker.is_completed_today("nope"));
    }

    #[test]
    fn add_from_catalog_rejects_unknown_template() {
        let (tracker, _) = tracker();
        let err = tracker.add_from_catalog("juggling").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownHabitTemplate(_))
        ));
        assert!(tracker.store.raw(HABITS_KEY).is_none());

        let added = tracker.add_from_catalog("morning-meditation").unwrap();
        assert_eq!(added.habit.category, HabitCategory::Mindfulness);
    }

    #[test]
    fn corrupt_collection_loads_empty() {
        let store = MemoryStore::new();
        store.set(HABITS_KEY, "{not json").unwrap();
        let tracker = HabitTracker::new(store);
        assert!(tracker.load().is_empty());
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "read-only".into(),
            })
        }
    }

    #[test]
    fn write_failure_is_returned() {
        let tracker = HabitTracker::new(ReadOnlyStore);
        let err = tracker.add(template("Meditate")).unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::WriteFailed { .. })));
    }

    proptest! {
        #[test]
        fn repeated_completions_on_one_day_add_at_most_one(calls in 1usize..6, days in 0u64..4) {
            let (tracker, clock) = tracker();
            let id = tracker.add(template("Meditate")).unwrap().habit.id;
            for _ in 0..days {
                tracker.complete(&id, None).unwrap();
                clock.advance_days(1);
            }
            let before = tracker.get(&id).unwrap().streak;
            for _ in 0..calls {
                tracker.complete(&id, None).unwrap();
            }
            prop_assert_eq!(tracker.get(&id).unwrap().streak, before + 1);
        }
    }
}
