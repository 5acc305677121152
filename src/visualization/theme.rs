use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable that preselects the theme.
pub const THEME_ENV: &str = "RACING_KINGS_THEME";

/// Terminal background, which decides which glyph set reads as "white".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Theme configured through [`THEME_ENV`], if any.
    pub fn from_env() -> Result<Option<Self>, ThemeParseError> {
        match std::env::var(THEME_ENV) {
            Ok(value) => value.parse().map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// Error when a theme name is neither `dark` nor `light`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}', expected 'dark' or 'light'")]
pub struct ThemeParseError(String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ThemeParseError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}
