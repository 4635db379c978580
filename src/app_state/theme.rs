//! Theme preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's theme preference
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always light
    #[default]
    Light,
    /// Always dark
    Dark,
    /// Follow the system-level preference
    System,
}

impl Theme {
    /// All themes, in display order
    pub const ALL: &'static [Self] = &[Self::Light, Self::Dark, Self::System];

    /// Lowercase label, identical to the persisted form
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Whether this theme tracks system preference changes
    #[must_use]
    pub const fn follows_system(self) -> bool {
        matches!(self, Self::System)
    }

    /// Effective darkness for this theme given the system preference
    #[must_use]
    pub const fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => system_prefers_dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known theme
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{input}' (expected light, dark or system)")]
pub struct ParseThemeError {
    input: String,
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseThemeError {
                input: s.to_string(),
            })
    }
}
