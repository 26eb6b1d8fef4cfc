//! Journal commands for CLI.

use clap::Subcommand;
use serde_json::json;
use wellkeep_core::journal::JOURNAL_TEMPLATES;
use wellkeep_core::{analyze_sentiment, detect_triggers, Config, CoreError, Database, JournalService};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// List journal templates and their prompts
    Templates,
    /// Write a new entry, one response per prompt
    New {
        /// Template id (see `journal templates`)
        #[arg(long)]
        template: String,
        #[arg(required = true)]
        responses: Vec<String>,
    },
    /// List entries, newest first
    List {
        /// Maximum entries (default: journal.list_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one entry and its analysis
    Show { id: String },
    /// Analyze an entry and store the result
    Analyze { id: String },
    /// Detect triggers in text without saving anything
    Triggers {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Run the sentiment heuristic on text without saving anything
    Sentiment {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// How often each trigger shows up across entries
    Summary,
}

pub fn run(action: JournalAction, config: &Config) -> CliResult {
    // Text-only actions never touch the database.
    match action {
        JournalAction::Templates => return print_json(JOURNAL_TEMPLATES),
        JournalAction::Triggers { text } => return print_json(&detect_triggers(&text)),
        JournalAction::Sentiment { text } => return print_json(&analyze_sentiment(&text.join(" "))),
        _ => {}
    }

    let db = Database::open(config)?;
    let journal = JournalService::new(&db, config.journal.user_id.as_str());

    match action {
        JournalAction::New { template, responses } => {
            let entry = journal.create_entry(&template, responses)?;
            if config.journal.analyze_on_save {
                let analysis = journal.analyze_entry(&entry.id)?;
                print_json(&json!({ "entry": entry, "analysis": analysis }))?;
            } else {
                print_json(&entry)?;
            }
        }
        JournalAction::List { limit } => {
            let limit = limit.unwrap_or(usize::try_from(config.journal.list_limit)?);
            print_json(&journal.entries(Some(limit))?)?;
        }
        JournalAction::Show { id } => {
            let entry = journal
                .entry(&id)?
                .ok_or_else(|| CoreError::EntryNotFound(id.clone()))?;
            let analysis = journal.analysis_for_entry(&id)?;
            print_json(&json!({ "entry": entry, "analysis": analysis }))?;
        }
        JournalAction::Analyze { id } => print_json(&journal.analyze_entry(&id)?)?,
        JournalAction::Summary => print_json(&journal.trigger_summary()?)?,
        JournalAction::Templates | JournalAction::Triggers { .. } | JournalAction::Sentiment { .. } => {}
    }
    Ok(())
}
