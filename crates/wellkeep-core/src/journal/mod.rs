//! Journal entries, trigger detection and the local sentiment heuristic.
//!
//! Entries live behind the [`JournalStore`] port. Everything else in this
//! module is pure and deterministic.

pub mod sentiment;
pub mod service;
pub mod templates;
pub mod triggers;

pub use sentiment::{analyze_sentiment, Sentiment, SentimentAnalysis};
pub use service::{JournalService, TriggerCount};
pub use templates::{JournalTemplate, JOURNAL_TEMPLATES};
pub use triggers::{detect_triggers, Trigger, TRIGGERS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;

/// A saved journal entry. `triggers` is filled in before insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub responses: Vec<String>,
    pub triggers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored result of running the sentiment heuristic over one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub id: String,
    pub entry_id: String,
    pub user_id: String,
    pub sentiment: Sentiment,
    pub patterns: Vec<String>,
    pub intensity: u8,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Journal persistence port.
///
/// The core only needs these five calls. Schema and transport belong to the
/// implementation; errors are returned to the caller unchanged.
pub trait JournalStore {
    /// Stores a new entry and returns its id.
    fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<String, DatabaseError>;

    /// Entries owned by `user_id`, newest first, at most `limit` when given.
    fn get_journal_entries(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>, DatabaseError>;

    fn get_journal_entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>, DatabaseError>;

    /// Stores an analysis record and returns its id.
    fn insert_ai_analysis(&self, record: &AiAnalysis) -> Result<String, DatabaseError>;

    fn get_ai_analysis_for_entry(&self, entry_id: &str)
        -> Result<Option<AiAnalysis>, DatabaseError>;
}

impl<T: JournalStore + ?Sized> JournalStore for &T {
    fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<String, DatabaseError> {
        (**self).insert_journal_entry(entry)
    }

    fn get_journal_entries(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>, DatabaseError> {
        (**self).get_journal_entries(user_id, limit)
    }

    fn get_journal_entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>, DatabaseError> {
        (**self).get_journal_entry_by_id(id)
    }

    fn insert_ai_analysis(&self, record: &AiAnalysis) -> Result<String, DatabaseError> {
        (**self).insert_ai_analysis(record)
    }

    fn get_ai_analysis_for_entry(
        &self,
        entry_id: &str,
    ) -> Result<Option<AiAnalysis>, DatabaseError> {
        (**self).get_ai_analysis_for_entry(entry_id)
    }
}
