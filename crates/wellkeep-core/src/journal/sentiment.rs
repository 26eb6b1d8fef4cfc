//! Local, deterministic sentiment heuristic.
//!
//! Word presence decides sentiment, punctuation and emotional vocabulary
//! decide intensity, and two rule tables map keywords to canned pattern
//! observations and suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    pub patterns: Vec<String>,
    pub intensity: u8,
    pub suggestions: Vec<String>,
}

pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "excited", "grateful", "thankful", "love", "calm", "peaceful", "proud",
    "hopeful", "relaxed", "content", "great", "wonderful", "energized",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "anxious", "nervous", "stressed", "worried", "upset", "lonely",
    "frustrated", "overwhelmed", "depressed", "afraid", "tired", "hurt", "awful",
];

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;
const BASE_INTENSITY: usize = 3;

pub const FALLBACK_SUGGESTION: &str =
    "Keep journaling regularly so patterns have a chance to show up over time.";

/// Condition over the lower-cased text and the computed sentiment.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// Every group must have at least one word present.
    AllOf(&'static [&'static [&'static str]]),
    Sentiment(Sentiment),
}

impl Condition {
    fn holds(&self, text: &str, sentiment: Sentiment) -> bool {
        match self {
            Condition::AllOf(groups) => groups
                .iter()
                .all(|group| group.iter().any(|word| text.contains(word))),
            Condition::Sentiment(expected) => *expected == sentiment,
        }
    }
}

/// A condition and the canned sentence it produces.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: Condition,
    pub output: &'static str,
}

pub const PATTERN_RULES: &[Rule] = &[
    Rule {
        when: Condition::AllOf(&[&["meeting"], &["anxious", "nervous"]]),
        output: "Meetings seem to bring on anxiety for you.",
    },
    Rule {
        when: Condition::AllOf(&[&["sleep", "tired", "exhausted"], &["stressed", "anxious", "overwhelmed"]]),
        output: "Poor rest and stress are showing up together.",
    },
    Rule {
        when: Condition::AllOf(&[&["work", "deadline", "boss"], &["stressed", "overwhelmed", "frustrated"]]),
        output: "Work pressure looks like a recurring source of stress.",
    },
    Rule {
        when: Condition::AllOf(&[&["friend", "family", "partner"], &["happy", "grateful", "love", "joy"]]),
        output: "Time with people you care about lifts your mood.",
    },
    Rule {
        when: Condition::AllOf(&[&["exercise", "walk", "run", "yoga", "gym"], &["happy", "calm", "energized", "relaxed", "great"]]),
        output: "Physical activity is linked with your better days.",
    },
    Rule {
        when: Condition::AllOf(&[&["coffee", "caffeine"], &["anxious", "nervous", "jittery"]]),
        output: "Caffeine may be feeding your anxious moments.",
    },
];

pub const SUGGESTION_RULES: &[Rule] = &[
    Rule {
        when: Condition::Sentiment(Sentiment::Negative),
        output: "Try a five-minute breathing exercise to reset.",
    },
    Rule {
        when: Condition::AllOf(&[&["anxious", "nervous", "worried"]]),
        output: "Write down what is within your control right now.",
    },
    Rule {
        when: Condition::AllOf(&[&["sleep", "tired", "exhausted"]]),
        output: "Aim for a consistent bedtime tonight and skip screens beforehand.",
    },
    Rule {
        when: Condition::AllOf(&[&["lonely"]]),
        output: "Reach out to someone you trust, even with a short message.",
    },
    Rule {
        when: Condition::Sentiment(Sentiment::Positive),
        output: "Note what went well today so you can repeat it.",
    },
];

fn present(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}

fn apply(rules: &[Rule], text: &str, sentiment: Sentiment) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.when.holds(text, sentiment))
        .map(|rule| rule.output.to_string())
        .collect()
}

/// Analyze free text with no external calls. Identical input always yields
/// identical output, and `suggestions` is never empty.
pub fn analyze_sentiment(text: &str) -> SentimentAnalysis {
    let lower = text.to_lowercase();

    let positive = present(&lower, POSITIVE_WORDS);
    let negative = present(&lower, NEGATIVE_WORDS);
    let sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };

    let exclamations = text.matches('!').count();
    let raw = BASE_INTENSITY + exclamations + (positive + negative) / 2;
    let intensity = raw.clamp(MIN_INTENSITY as usize, MAX_INTENSITY as usize) as u8;

    let patterns = apply(PATTERN_RULES, &lower, sentiment);

    let mut suggestions = apply(SUGGESTION_RULES, &lower, sentiment);
    if suggestions.is_empty() {
        suggestions.push(FALLBACK_SUGGESTION.to_string());
    }

    SentimentAnalysis {
        sentiment,
        patterns,
        intensity,
        suggestions,
    }
}
