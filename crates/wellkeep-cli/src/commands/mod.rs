pub mod config;
pub mod habit;
pub mod journal;
pub mod theme;

use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
