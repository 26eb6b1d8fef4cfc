//! Append-only habit feedback log and effectiveness statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{parse_name, read_collection, write_collection};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ValidationError};
use crate::storage::{KeyValueStore, FEEDBACK_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
}

impl FromStr for FeedbackKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name("feedback", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitFeedback {
    pub habit_id: String,
    pub feedback: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Share of positive feedback for one habit, as a whole percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEffectiveness {
    pub effectiveness: u32,
    pub total_feedback: usize,
    pub positive_feedback: usize,
    pub negative_feedback: usize,
}

impl HabitEffectiveness {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HabitFeedback>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total_feedback += 1;
            match record.feedback {
                FeedbackKind::Positive => stats.positive_feedback += 1,
                FeedbackKind::Negative => stats.negative_feedback += 1,
            }
        }
        if stats.total_feedback > 0 {
            let ratio = stats.positive_feedback as f64 / stats.total_feedback as f64;
            stats.effectiveness = (ratio * 100.0).round() as u32;
        }
        stats
    }
}

/// Feedback records stored under [`FEEDBACK_KEY`]. Records are only ever
/// appended.
pub struct FeedbackLog<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> FeedbackLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn all(&self) -> Vec<HabitFeedback> {
        read_collection(&self.store, FEEDBACK_KEY)
    }

    pub fn for_habit(&self, habit_id: &str) -> Vec<HabitFeedback> {
        self.all()
            .into_iter()
            .filter(|record| record.habit_id == habit_id)
            .collect()
    }

    pub fn record(
        &self,
        habit_id: &str,
        feedback: FeedbackKind,
        notes: Option<String>,
    ) -> Result<HabitFeedback> {
        let mut records = self.all();
        let record = HabitFeedback {
            habit_id: habit_id.to_string(),
            feedback,
            notes: notes.filter(|n| !n.trim().is_empty()),
            timestamp: self.clock.now(),
        };
        records.push(record.clone());
        write_collection(&self.store, FEEDBACK_KEY, &records)?;
        tracing::debug!(habit_id, ?feedback, "habit feedback recorded");
        Ok(record)
    }

    /// Effectiveness of one habit. No feedback gives all zeros.
    pub fn effectiveness(&self, habit_id: &str) -> HabitEffectiveness {
        let records = self.for_habit(habit_id);
        HabitEffectiveness::from_records(&records)
    }
}
