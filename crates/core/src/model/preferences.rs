use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text size options offered by the accessibility dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
    Larger,
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Larger => "larger",
        };
        write!(f, "{name}")
    }
}

/// Error type for parsing a text size from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTextSizeError {
    raw: String,
}

impl fmt::Display for ParseTextSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown text size: {}", self.raw)
    }
}

impl std::error::Error for ParseTextSizeError {}

impl FromStr for TextSize {
    type Err = ParseTextSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "large" => Ok(Self::Large),
            "larger" => Ok(Self::Larger),
            _ => Err(ParseTextSizeError { raw: s.to_owned() }),
        }
    }
}

/// Accessibility preferences, persisted as a whole record.
///
/// The serialized field names match the blob the site has always written
/// (`textSize`, `highContrast`, `screenReader`, `dyslexicFont`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityPrefs {
    pub text_size: TextSize,
    pub high_contrast: bool,
    pub screen_reader: bool,
    pub dyslexic_font: bool,
}
