//! # Wellkeep Core Library
//!
//! The logic behind the Wellkeep wellness tracker, kept free of any UI.
//! Every operation is also reachable from the standalone `wellkeep` CLI.
//!
//! ## Architecture
//!
//! - **Habits**: streak-counting habit engine and an append-only feedback
//!   log, both persisted as whole JSON collections through a key-value port
//! - **Journal**: trigger detection and a deterministic sentiment heuristic
//!   over journal responses, persisted through a journal-database port
//! - **Storage**: SQLite adapter implementing both ports, an in-memory
//!   key-value store, and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitTracker`]: habit collection with write-through persistence
//! - [`FeedbackLog`]: habit feedback and effectiveness statistics
//! - [`JournalService`]: journal entries and stored analyses for one user
//! - [`Database`]: SQLite implementation of [`KeyValueStore`] and [`JournalStore`]
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod habits;
pub mod journal;
pub mod storage;
pub mod theme;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, StorageError, ValidationError};
pub use habits::{
    FeedbackKind, FeedbackLog, Habit, HabitEffectiveness, HabitFeedback, HabitTracker,
    HabitUpdate, UserHabit,
};
pub use journal::{
    analyze_sentiment, detect_triggers, AiAnalysis, JournalEntry, JournalService, JournalStore,
    Sentiment, SentimentAnalysis,
};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use theme::{Palette, ThemeMode};
