//! Keyword-based trigger detection.

use serde::Serialize;

/// One entry of the trigger taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// The fixed taxonomy. Detection results follow this order.
///
/// Keywords match as lower-case substrings, so each one is chosen to avoid
/// hiding inside unrelated common words.
pub const TRIGGERS: &[Trigger] = &[
    Trigger {
        id: "work",
        name: "Work",
        keywords: &["work", "boss", "meeting", "deadline", "job", "office", "colleague", "coworker"],
    },
    Trigger {
        id: "caffeine",
        name: "Caffeine",
        keywords: &["coffee", "caffeine", "espresso", "energy drink", "latte"],
    },
    Trigger {
        id: "sleep",
        name: "Sleep",
        keywords: &["sleep", "insomnia", "tired", "exhausted", "nightmare"],
    },
    Trigger {
        id: "relationships",
        name: "Relationships",
        keywords: &["partner", "boyfriend", "girlfriend", "husband", "wife", "argument", "breakup"],
    },
    Trigger {
        id: "family",
        name: "Family",
        keywords: &["family", "mother", "father", "parents", "sibling", "brother", "sister", "kids"],
    },
    Trigger {
        id: "social",
        name: "Social",
        keywords: &["party", "crowd", "social media", "friends", "lonely"],
    },
    Trigger {
        id: "health",
        name: "Health",
        keywords: &["sick", "headache", "doctor", "illness", "injury", "hospital"],
    },
    Trigger {
        id: "finances",
        name: "Finances",
        keywords: &["money", "bills", "debt", "budget", "paycheck", "finances"],
    },
    Trigger {
        id: "alcohol",
        name: "Alcohol",
        keywords: &["alcohol", "beer", "wine", "hangover", "drunk"],
    },
];

impl Trigger {
    /// Whether any keyword occurs in already lower-cased `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Names of every trigger whose keywords appear anywhere in `responses`.
///
/// Responses are joined and lower-cased before matching. The result is in
/// taxonomy order with no duplicates.
pub fn detect_triggers<S: AsRef<str>>(responses: &[S]) -> Vec<String> {
    let text = responses
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    TRIGGERS
        .iter()
        .filter(|trigger| trigger.matches(&text))
        .map(|trigger| trigger.name.to_string())
        .collect()
}

/// Look up a trigger by its display name.
pub fn by_name(name: &str) -> Option<&'static Trigger> {
    TRIGGERS.iter().find(|trigger| trigger.name == name)
}
