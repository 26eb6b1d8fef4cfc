//! Guided journal templates.

use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub prompts: &'static [&'static str],
}

pub const JOURNAL_TEMPLATES: &[JournalTemplate] = &[
    JournalTemplate {
        id: "daily-reflection",
        title: "Daily Reflection",
        prompts: &[
            "How are you feeling right now?",
            "What stood out about today?",
            "What would you like to do differently tomorrow?",
        ],
    },
    JournalTemplate {
        id: "gratitude",
        title: "Gratitude",
        prompts: &[
            "Name three things you are grateful for.",
            "Who made a difference to you today?",
        ],
    },
    JournalTemplate {
        id: "anxiety-check-in",
        title: "Anxiety Check-in",
        prompts: &[
            "What is worrying you?",
            "Where do you feel it in your body?",
            "What is one small step you can take?",
        ],
    },
    JournalTemplate {
        id: "sleep-log",
        title: "Sleep Log",
        prompts: &[
            "How did you sleep last night?",
            "What did you do in the hour before bed?",
        ],
    },
    JournalTemplate {
        id: "free-write",
        title: "Free Write",
        prompts: &["Write whatever is on your mind."],
    },
];

pub fn find(id: &str) -> Option<&'static JournalTemplate> {
    JOURNAL_TEMPLATES.iter().find(|template| template.id == id)
}

impl JournalTemplate {
    /// Checks that `responses` fit this template's prompts.
    pub fn validate<S: AsRef<str>>(&self, responses: &[S]) -> Result<(), ValidationError> {
        if responses.len() > self.prompts.len() {
            return Err(ValidationError::TooManyResponses {
                template_id: self.id.to_string(),
                prompts: self.prompts.len(),
                responses: responses.len(),
            });
        }
        if responses.iter().all(|r| r.as_ref().trim().is_empty()) {
            return Err(ValidationError::InvalidValue {
                field: "responses".to_string(),
                message: "at least one response must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}
