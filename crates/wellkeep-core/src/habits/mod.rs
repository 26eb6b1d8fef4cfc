//! Habit tracking: templates, per-user habit state, streaks, feedback and
//! achievements.
//!
//! Collections are stored whole under a single key each and every mutation
//! is a load-modify-save round trip through a [`KeyValueStore`].

pub mod achievements;
pub mod catalog;
pub mod feedback;
pub mod tracker;

pub use achievements::{evaluate as evaluate_achievements, Achievement, AchievementStatus};
pub use feedback::{FeedbackKind, FeedbackLog, HabitEffectiveness, HabitFeedback};
pub use tracker::HabitTracker;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Mindfulness,
    Fitness,
    Sleep,
    Nutrition,
    Relationships,
    Productivity,
    SelfCare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Parse a snake_case name through the enum's serde representation.
fn parse_name<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, ValidationError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).map_err(|_| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("'{raw}' is not a valid {field}"),
        }
    })
}

impl FromStr for HabitCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("category", s)
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("frequency", s)
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("difficulty", s)
    }
}

/// Static description of a habit, as offered by the catalog or typed in by
/// the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: HabitCategory,
    pub frequency: Frequency,
    pub difficulty: Difficulty,
}

/// A habit the user tracks, with completion state and streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHabit {
    #[serde(flatten)]
    pub habit: Habit,
    pub is_completed_today: bool,
    pub streak: u32,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_feedback_at: Option<DateTime<Utc>>,
    pub created_at: NaiveDate,
}

impl UserHabit {
    pub fn id(&self) -> &str {
        &self.habit.id
    }

    /// The flag alone can be stale after a day rollover, so the date must
    /// match too.
    pub fn completed_on(&self, today: NaiveDate) -> bool {
        self.is_completed_today && self.last_completed == Some(today)
    }
}

/// Partial update for [`HabitTracker::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
    pub frequency: Option<Frequency>,
    pub difficulty: Option<Difficulty>,
    pub streak: Option<u32>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        *self == HabitUpdate::default()
    }

    fn apply_to(self, habit: &mut UserHabit) {
        if let Some(title) = self.title {
            habit.habit.title = title;
        }
        if let Some(description) = self.description {
            habit.habit.description = description;
        }
        if let Some(category) = self.category {
            habit.habit.category = category;
        }
        if let Some(frequency) = self.frequency {
            habit.habit.frequency = frequency;
        }
        if let Some(difficulty) = self.difficulty {
            habit.habit.difficulty = difficulty;
        }
        if let Some(streak) = self.streak {
            habit.streak = streak;
        }
    }
}

/// Read a JSON array stored under `key`.
///
/// Absent keys, read failures and unparsable JSON all yield an empty list.
/// Failures are logged and never surfaced.
pub(crate) fn read_collection<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, "failed to read collection, using empty list: {e}");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, "failed to parse collection, using empty list: {e}");
        Vec::new()
    })
}

/// Serialize `items` and replace the array under `key`.
///
/// Failures are logged and returned to the caller.
pub(crate) fn write_collection<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let json = serde_json::to_string(items).inspect_err(|e| {
        tracing::error!(key, "failed to serialize collection: {e}");
    })?;
    store.set(key, &json).inspect_err(|e| {
        tracing::error!(key, "failed to save collection: {e}");
    })?;
    Ok(())
}
