//! SQLite-backed storage.
//!
//! One database file provides both persistence ports:
//! - [`KeyValueStore`] over the `kv` table (habits, feedback log)
//! - [`JournalStore`] over `journal_entries` and `ai_analyses`

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{migrations, Config, KeyValueStore};
use crate::error::{DatabaseError, StorageError};
use crate::journal::{AiAnalysis, JournalEntry, JournalStore};

/// SQLite database for habits, feedback and journal data.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database named in `config` inside the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the
    /// database cannot be opened or migrated.
    pub fn open(config: &Config) -> crate::Result<Self> {
        let path = config.database_path()?;
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(table: &str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::CorruptRow {
            table: table.to_string(),
            message: format!("bad timestamp '{raw}': {e}"),
        })
}

fn parse_list(table: &str, raw: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::CorruptRow {
        table: table.to_string(),
        message: e.to_string(),
    })
}

fn encode_list(list: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(list).map_err(|e| DatabaseError::QueryFailed(e.to_string()))
}

/// Raw `journal_entries` columns before JSON decoding.
struct EntryRow {
    id: String,
    user_id: String,
    template_id: String,
    responses: String,
    triggers: String,
    created_at: String,
}

impl EntryRow {
    const COLUMNS: &'static str = "id, user_id, template_id, responses, triggers, created_at";

    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            template_id: row.get(2)?,
            responses: row.get(3)?,
            triggers: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn decode(self) -> Result<JournalEntry, DatabaseError> {
        const TABLE: &str = "journal_entries";
        Ok(JournalEntry {
            responses: parse_list(TABLE, &self.responses)?,
            triggers: parse_list(TABLE, &self.triggers)?,
            created_at: parse_timestamp(TABLE, &self.created_at)?,
            id: self.id,
            user_id: self.user_id,
            template_id: self.template_id,
        })
    }
}

/// Raw `ai_analyses` columns before decoding.
struct AnalysisRow {
    id: String,
    entry_id: String,
    user_id: String,
    sentiment: String,
    patterns: String,
    intensity: u8,
    suggestions: String,
    created_at: String,
}

impl AnalysisRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            entry_id: row.get(1)?,
            user_id: row.get(2)?,
            sentiment: row.get(3)?,
            patterns: row.get(4)?,
            intensity: row.get(5)?,
            suggestions: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn decode(self) -> Result<AiAnalysis, DatabaseError> {
        const TABLE: &str = "ai_analyses";
        let sentiment = self
            .sentiment
            .parse()
            .map_err(|message: String| DatabaseError::CorruptRow {
                table: TABLE.to_string(),
                message,
            })?;
        Ok(AiAnalysis {
            sentiment,
            patterns: parse_list(TABLE, &self.patterns)?,
            suggestions: parse_list(TABLE, &self.suggestions)?,
            created_at: parse_timestamp(TABLE, &self.created_at)?,
            id: self.id,
            entry_id: self.entry_id,
            user_id: self.user_id,
            intensity: self.intensity,
        })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

impl JournalStore for Database {
    fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<String, DatabaseError> {
        self.conn.execute(
            "INSERT INTO journal_entries (id, user_id, template_id, responses, triggers, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.user_id,
                entry.template_id,
                encode_list(&entry.responses)?,
                encode_list(&entry.triggers)?,
                timestamp(&entry.created_at),
            ],
        )?;
        Ok(entry.id.clone())
    }

    fn get_journal_entries(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>, DatabaseError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM journal_entries
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2",
            EntryRow::COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, limit], EntryRow::read)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.decode()?);
        }
        Ok(entries)
    }

    fn get_journal_entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM journal_entries WHERE id = ?1",
                    EntryRow::COLUMNS
                ),
                [id],
                EntryRow::read,
            )
            .optional()?;
        row.map(EntryRow::decode).transpose()
    }

    fn insert_ai_analysis(&self, record: &AiAnalysis) -> Result<String, DatabaseError> {
        self.conn.execute(
            "INSERT INTO ai_analyses
                (id, entry_id, user_id, sentiment, patterns, intensity, suggestions, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.entry_id,
                record.user_id,
                record.sentiment.as_str(),
                encode_list(&record.patterns)?,
                record.intensity,
                encode_list(&record.suggestions)?,
                timestamp(&record.created_at),
            ],
        )?;
        Ok(record.id.clone())
    }

    fn get_ai_analysis_for_entry(
        &self,
        entry_id: &str,
    ) -> Result<Option<AiAnalysis>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, entry_id, user_id, sentiment, patterns, intensity, suggestions, created_at
                 FROM ai_analyses
                 WHERE entry_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT 1",
                [entry_id],
                AnalysisRow::read,
            )
            .optional()?;
        row.map(AnalysisRow::decode).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Sentiment;
    use chrono::Duration;

    fn entry(id: &str, user: &str, at: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            user_id: user.to_string(),
            template_id: "daily-reflection".to_string(),
            responses: vec!["Long day at work".to_string()],
            triggers: vec!["Work".to_string()],
            created_at: at,
        }
    }

    #[test]
    fn kv_roundtrip_and_overwrite() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.get("user_habits").unwrap(), None);
        db.set("user_habits", "[]").unwrap();
        db.set("user_habits", "[1]").unwrap();
        assert_eq!(db.get("user_habits").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn entries_are_listed_newest_first_per_user() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.insert_journal_entry(&entry("a", "u1", now - Duration::hours(2)))
            .unwrap();
        db.insert_journal_entry(&entry("b", "u1", now)).unwrap();
        db.insert_journal_entry(&entry("c", "u2", now)).unwrap();

        let listed = db.get_journal_entries("u1", None).unwrap();
        let ids: Vec<_> = listed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let limited = db.get_journal_entries("u1", Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, "b");
    }

    #[test]
    fn entry_roundtrip_preserves_fields() {
        let db = Database::open_memory().unwrap();
        let original = entry("x", "u1", Utc::now());
        db.insert_journal_entry(&original).unwrap();

        let loaded = db.get_journal_entry_by_id("x").unwrap().unwrap();
        assert_eq!(loaded.responses, original.responses);
        assert_eq!(loaded.triggers, original.triggers);
        assert_eq!(
            loaded.created_at.timestamp_micros(),
            original.created_at.timestamp_micros()
        );
        assert!(db.get_journal_entry_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn analysis_requires_existing_entry() {
        let db = Database::open_memory().unwrap();
        let record = AiAnalysis {
            id: "an-1".into(),
            entry_id: "nope".into(),
            user_id: "u1".into(),
            sentiment: Sentiment::Neutral,
            patterns: vec![],
            intensity: 3,
            suggestions: vec!["Keep going".into()],
            created_at: Utc::now(),
        };
        assert!(db.insert_ai_analysis(&record).is_err());
    }

    #[test]
    fn analysis_roundtrip() {
        let db = Database::open_memory().unwrap();
        db.insert_journal_entry(&entry("e1", "u1", Utc::now())).unwrap();
        let record = AiAnalysis {
            id: "an-1".into(),
            entry_id: "e1".into(),
            user_id: "u1".into(),
            sentiment: Sentiment::Negative,
            patterns: vec!["pattern".into()],
            intensity: 7,
            suggestions: vec!["Breathe".into()],
            created_at: Utc::now(),
        };
        db.insert_ai_analysis(&record).unwrap();

        let loaded = db.get_ai_analysis_for_entry("e1").unwrap().unwrap();
        assert_eq!(loaded.sentiment, Sentiment::Negative);
        assert_eq!(loaded.intensity, 7);
        assert_eq!(loaded.patterns, vec!["pattern".to_string()]);
        assert!(db.get_ai_analysis_for_entry("e2").unwrap().is_none());
    }

    #[test]
    fn corrupt_json_column_surfaces_as_error() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO journal_entries (id, user_id, template_id, responses, triggers, created_at)
                 VALUES ('bad', 'u1', 't', 'not json', '[]', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        let err = db.get_journal_entry_by_id("bad").unwrap_err();
        assert!(matches!(err, DatabaseError::CorruptRow { .. }));
    }
}
