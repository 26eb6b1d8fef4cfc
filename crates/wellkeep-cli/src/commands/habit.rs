//! Habit commands for CLI.

use clap::Subcommand;
use serde_json::json;
use wellkeep_core::habits::{catalog, evaluate_achievements, HabitCategory};
use wellkeep_core::{
    Config, CoreError, Database, FeedbackKind, FeedbackLog, Habit, HabitTracker, HabitUpdate,
};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List tracked habits
    List,
    /// Show built-in habit templates
    Catalog {
        /// Only templates in this category (e.g. mindfulness, sleep)
        #[arg(long)]
        category: Option<String>,
    },
    /// Start tracking a habit
    Add {
        /// Catalog template id
        #[arg(long, conflicts_with = "title")]
        template: Option<String>,
        /// Title for a custom habit
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "self_care")]
        category: String,
        /// daily or weekly
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// Mark a habit done today
    Complete {
        id: String,
        /// How it went
        #[arg(long)]
        note: Option<String>,
    },
    /// Undo today's completion
    Undo { id: String },
    /// Update habit fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        /// Overwrite the streak counter
        #[arg(long)]
        streak: Option<u32>,
    },
    /// Stop tracking a habit
    Delete { id: String },
    /// Whether a habit is done today
    Status { id: String },
    /// Record positive or negative feedback
    Feedback {
        id: String,
        /// positive or negative
        kind: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Feedback effectiveness for a habit
    Stats { id: String },
    /// Achievement progress
    Achievements,
}

pub fn run(action: HabitAction, config: &Config) -> CliResult {
    // The catalog is static and never touches the database.
    if let HabitAction::Catalog { category } = &action {
        let entries: Vec<_> = match category {
            Some(category) => catalog::by_category(category.parse::<HabitCategory>()?).collect(),
            None => catalog::HABIT_CATALOG.iter().collect(),
        };
        return print_json(&entries);
    }

    let db = Database::open(config)?;
    let tracker = HabitTracker::new(&db);

    match action {
        HabitAction::List => print_json(&tracker.load())?,
        HabitAction::Add {
            template,
            title,
            description,
            category,
            frequency,
            difficulty,
        } => {
            let habit = match template {
                Some(template_id) => tracker.add_from_catalog(&template_id)?,
                None => {
                    let title = title.ok_or("either --template or --title is required")?;
                    tracker.add(Habit {
                        id: String::new(),
                        title,
                        description,
                        category: category.parse()?,
                        frequency: frequency.parse()?,
                        difficulty: difficulty.parse()?,
                    })?
                }
            };
            print_json(&habit)?;
        }
        HabitAction::Complete { id, note } => {
            print_json(&tracker.complete(&id, note.as_deref())?)?;
        }
        HabitAction::Undo { id } => print_json(&tracker.undo_completion(&id)?)?,
        HabitAction::Update {
            id,
            title,
            description,
            category,
            frequency,
            difficulty,
            streak,
        } => {
            let changes = HabitUpdate {
                title,
                description,
                category: category.map(|c| c.parse()).transpose()?,
                frequency: frequency.map(|f| f.parse()).transpose()?,
                difficulty: difficulty.map(|d| d.parse()).transpose()?,
                streak,
            };
            if changes.is_empty() {
                return Err("nothing to update".into());
            }
            print_json(&tracker.update(&id, changes)?)?;
        }
        HabitAction::Delete { id } => {
            tracker.delete(&id)?;
            println!("deleted {id}");
        }
        HabitAction::Status { id } => {
            let habit = tracker
                .get(&id)
                .ok_or_else(|| CoreError::HabitNotFound(id.clone()))?;
            print_json(&json!({
                "id": habit.id(),
                "title": habit.habit.title,
                "completedToday": tracker.is_completed_today(&id),
                "streak": habit.streak,
                "lastCompleted": habit.last_completed,
            }))?;
        }
        HabitAction::Feedback { id, kind, notes } => {
            if tracker.get(&id).is_none() {
                return Err(CoreError::HabitNotFound(id).into());
            }
            let kind: FeedbackKind = kind.parse()?;
            let log = FeedbackLog::new(&db);
            print_json(&log.record(&id, kind, notes)?)?;
        }
        HabitAction::Stats { id } => {
            let log = FeedbackLog::new(&db);
            print_json(&log.effectiveness(&id))?;
        }
        HabitAction::Achievements => {
            print_json(&evaluate_achievements(&tracker.load()))?;
        }
        HabitAction::Catalog { .. } => {}
    }
    Ok(())
}
