//! Theme selection.
//!
//! Palettes are immutable statics. Callers hold a [`ThemeMode`] (usually from
//! [`crate::Config`]) and resolve colors through it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Named colors used by front ends, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub primary: &'static str,
    pub positive: &'static str,
    pub negative: &'static str,
    pub streak: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#f8fafc",
    surface: "#ffffff",
    text: "#0f172a",
    text_muted: "#64748b",
    primary: "#6366f1",
    positive: "#16a34a",
    negative: "#dc2626",
    streak: "#f97316",
};

pub const DARK: Palette = Palette {
    background: "#0f172a",
    surface: "#1e293b",
    text: "#f1f5f9",
    text_muted: "#94a3b8",
    primary: "#818cf8",
    positive: "#4ade80",
    negative: "#f87171",
    streak: "#fb923c",
};

impl ThemeMode {
    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ValidationError::InvalidValue {
                field: "theme".to_string(),
                message: format!("'{other}' is not a valid theme, expected light or dark"),
            }),
        }
    }
}
