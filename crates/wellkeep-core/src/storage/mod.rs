mod config;
pub mod database;
mod memory;
pub mod migrations;

pub use config::{Config, JournalConfig, LoggingConfig, StorageConfig, UiConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};

/// Storage key holding the serialized `UserHabit` array.
pub const HABITS_KEY: &str = "user_habits";

/// Storage key holding the append-only `HabitFeedback` array.
pub const FEEDBACK_KEY: &str = "habit_feedback";

/// Persistence port for whole-collection read-modify-write.
///
/// Values are opaque strings (JSON in practice). Implementations decide
/// where they live: SQLite, memory, or anything else with get/set.
pub trait KeyValueStore {
    /// Returns `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns the Wellkeep data directory, creating it if needed.
///
/// `WELLKEEP_DATA_DIR` wins when set. Otherwise `~/.config/wellkeep[-dev]/`
/// based on `WELLKEEP_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("WELLKEEP_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("WELLKEEP_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("wellkeep-dev")
            } else {
                base_dir.join("wellkeep")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
