//! Built-in habit templates.

use serde::Serialize;

use super::{Difficulty, Frequency, Habit, HabitCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: HabitCategory,
    pub frequency: Frequency,
    pub difficulty: Difficulty,
}

impl CatalogEntry {
    pub fn to_habit(&self) -> Habit {
        Habit {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category,
            frequency: self.frequency,
            difficulty: self.difficulty,
        }
    }
}

pub const HABIT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "morning-meditation",
        title: "Morning meditation",
        description: "Sit quietly for ten minutes before checking your phone.",
        category: HabitCategory::Mindfulness,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        id: "gratitude-note",
        title: "Gratitude note",
        description: "Write down one thing you are grateful for.",
        category: HabitCategory::Mindfulness,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        id: "evening-walk",
        title: "Evening walk",
        description: "Walk outside for at least twenty minutes.",
        category: HabitCategory::Fitness,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        id: "strength-session",
        title: "Strength session",
        description: "A full-body strength workout.",
        category: HabitCategory::Fitness,
        frequency: Frequency::Weekly,
        difficulty: Difficulty::Hard,
    },
    CatalogEntry {
        id: "screen-free-hour",
        title: "Screen-free hour before bed",
        description: "Put screens away an hour before sleeping.",
        category: HabitCategory::Sleep,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        id: "consistent-bedtime",
        title: "Consistent bedtime",
        description: "Go to bed within thirty minutes of your target time.",
        category: HabitCategory::Sleep,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Hard,
    },
    CatalogEntry {
        id: "drink-water",
        title: "Drink water",
        description: "Eight glasses of water through the day.",
        category: HabitCategory::Nutrition,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        id: "date-night",
        title: "Date night",
        description: "Plan uninterrupted time with your partner.",
        category: HabitCategory::Relationships,
        frequency: Frequency::Weekly,
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        id: "call-someone",
        title: "Call someone you care about",
        description: "A real conversation, not just a text.",
        category: HabitCategory::Relationships,
        frequency: Frequency::Weekly,
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        id: "plan-tomorrow",
        title: "Plan tomorrow",
        description: "List the three most important tasks for tomorrow.",
        category: HabitCategory::Productivity,
        frequency: Frequency::Daily,
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        id: "self-care-block",
        title: "Self-care block",
        description: "Reserve thirty minutes for something restorative.",
        category: HabitCategory::SelfCare,
        frequency: Frequency::Weekly,
        difficulty: Difficulty::Medium,
    },
];

pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    HABIT_CATALOG.iter().find(|entry| entry.id == id)
}

pub fn by_category(category: HabitCategory) -> impl Iterator<Item = &'static CatalogEntry> {
    HABIT_CATALOG
        .iter()
        .filter(move |entry| entry.category == category)
}
