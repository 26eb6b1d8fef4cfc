//! Journal operations for a single user over a [`JournalStore`].

use std::collections::{BTreeSet, HashMap};

use chrono::{SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{analyze_sentiment, detect_triggers, templates, triggers, AiAnalysis, JournalEntry, JournalStore};
use crate::error::{CoreError, Result, ValidationError};

/// How many of a user's entries mention a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: usize,
}

pub struct JournalService<D> {
    store: D,
    user_id: String,
}

impl<D: JournalStore> JournalService<D> {
    pub fn new(store: D, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Validate, detect triggers, and store a new entry.
    ///
    /// # Errors
    /// Validation errors for an unknown template or mismatched responses;
    /// database errors unchanged.
    pub fn create_entry(&self, template_id: &str, responses: Vec<String>) -> Result<JournalEntry> {
        let template = templates::find(template_id)
            .ok_or_else(|| ValidationError::UnknownJournalTemplate(template_id.to_string()))?;
        template.validate(&responses)?;

        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            template_id: template.id.to_string(),
            triggers: detect_triggers(&responses),
            responses,
            created_at: Utc::now().trunc_subsecs(6),
        };

        let id = self.store.insert_journal_entry(&entry)?;
        tracing::debug!(entry_id = %id, triggers = ?entry.triggers, "journal entry saved");
        Ok(JournalEntry { id, ..entry })
    }

    /// The user's entries, newest first.
    pub fn entries(&self, limit: Option<usize>) -> Result<Vec<JournalEntry>> {
        Ok(self.store.get_journal_entries(&self.user_id, limit)?)
    }

    /// One entry, if it exists and belongs to this user.
    pub fn entry(&self, id: &str) -> Result<Option<JournalEntry>> {
        let entry = self.store.get_journal_entry_by_id(id)?;
        Ok(entry.filter(|e| e.user_id == self.user_id))
    }

    pub fn analysis_for_entry(&self, id: &str) -> Result<Option<AiAnalysis>> {
        if self.entry(id)?.is_none() {
            return Ok(None);
        }
        Ok(self.store.get_ai_analysis_for_entry(id)?)
    }

    /// Stored analysis for the entry, computing and storing one first if
    /// none exists yet.
    ///
    /// # Errors
    /// [`CoreError::EntryNotFound`] when the entry is missing; database
    /// errors unchanged.
    pub fn analyze_entry(&self, id: &str) -> Result<AiAnalysis> {
        let entry = self
            .entry(id)?
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;

        if let Some(existing) = self.store.get_ai_analysis_for_entry(&entry.id)? {
            return Ok(existing);
        }

        let analysis = analyze_sentiment(&entry.responses.join("\n"));
        let record = AiAnalysis {
            id: Uuid::new_v4().to_string(),
            entry_id: entry.id,
            user_id: self.user_id.clone(),
            sentiment: analysis.sentiment,
            patterns: analysis.patterns,
            intensity: analysis.intensity,
            suggestions: analysis.suggestions,
            created_at: Utc::now().trunc_subsecs(6),
        };
        let id = self.store.insert_ai_analysis(&record)?;
        tracing::debug!(analysis_id = %id, entry_id = %record.entry_id, sentiment = %record.sentiment, "analysis stored");
        Ok(AiAnalysis { id, ..record })
    }

    /// Trigger frequency across all of the user's entries.
    ///
    /// Most frequent first; ties keep taxonomy order, and names outside the
    /// taxonomy sort after it alphabetically.
    pub fn trigger_summary(&self) -> Result<Vec<TriggerCount>> {
        let entries = self.store.get_journal_entries(&self.user_id, None)?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in &entries {
            let unique: BTreeSet<&String> = entry.triggers.iter().collect();
            for trigger in unique {
                *counts.entry(trigger.clone()).or_default() += 1;
            }
        }

        let rank = |name: &str| {
            triggers::TRIGGERS
                .iter()
                .position(|t| t.name == name)
                .unwrap_or(usize::MAX)
        };

        let mut summary: Vec<TriggerCount> = counts
            .into_iter()
            .map(|(trigger, count)| TriggerCount { trigger, count })
            .collect();
        summary.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| rank(&a.trigger).cmp(&rank(&b.trigger)))
                .then_with(|| a.trigger.cmp(&b.trigger))
        });
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Sentiment;
    use crate::storage::Database;

    fn service(db: &Database) -> JournalService<&Database> {
        JournalService::new(db, "user-1")
    }

    #[test]
    fn create_entry_detects_triggers() {
        let db = Database::open_memory().unwrap();
        let journal = service(&db);
        let entry = journal
            .create_entry(
                "daily-reflection",
                vec!["I drank coffee and felt anxious about my deadline".into()],
            )
            .unwrap();
        assert_eq!(entry.triggers, vec!["Work".to_string(), "Caffeine".to_string()]);
        assert_eq!(journal.entry(&entry.id).unwrap(), Some(entry));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let db = Database::open_memory().unwrap();
        let err = service(&db)
            .create_entry("poetry", vec!["roses".into()])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownJournalTemplate(_))
        ));
    }

    #[test]
    fn other_users_entries_are_invisible() {
        let db = Database::open_memory().unwrap();
        let mine = service(&db)
            .create_entry("free-write", vec!["hello".into()])
            .unwrap();
        let theirs = JournalService::new(&db, "user-2");
        assert!(theirs.entry(&mine.id).unwrap().is_none());
        assert!(theirs.entries(None).unwrap().is_empty());
        assert!(matches!(
            theirs.analyze_entry(&mine.id),
            Err(CoreError::EntryNotFound(_))
        ));
    }

    #[test]
    fn analyze_entry_is_stored_once() {
        let db = Database::open_memory().unwrap();
        let journal = service(&db);
        let entry = journal
            .create_entry("gratitude", vec!["So grateful and happy!".into()])
            .unwrap();

        assert!(journal.analysis_for_entry(&entry.id).unwrap().is_none());
        let first = journal.analyze_entry(&entry.id).unwrap();
        let second = journal.analyze_entry(&entry.id).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert_eq!(
            journal.analysis_for_entry(&entry.id).unwrap().map(|a| a.id),
            Some(first.id)
        );
    }

    #[test]
    fn trigger_summary_orders_by_count_then_taxonomy() {
        let db = Database::open_memory().unwrap();
        let journal = service(&db);
        journal
            .create_entry("free-write", vec!["coffee before the meeting".into()])
            .unwrap();
        journal
            .create_entry("free-write", vec!["my boss again".into()])
            .unwrap();
        journal
            .create_entry("free-write", vec!["could not sleep".into()])
            .unwrap();

        let summary = journal.trigger_summary().unwrap();
        assert_eq!(
            summary,
            vec![
                TriggerCount { trigger: "Work".into(), count: 2 },
                TriggerCount { trigger: "Caffeine".into(), count: 1 },
                TriggerCount { trigger: "Sleep".into(), count: 1 },
            ]
        );
    }
}
