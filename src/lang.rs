/*!
 * The fixed three-language set and per-language text storage.
 *
 * The language set is closed: every translation operation is defined over
 * exactly one source language and the other two as targets. Target order is
 * declaration order and is the single ordering authority shared by prompt
 * construction, combined-response parsing, and fallback dispatch.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// One of the three languages a session is translated between
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    French,
    English,
    Polish,
}

impl Language {
    /// All languages, in declaration order
    pub const ALL: [Language; 3] = [Language::French, Language::English, Language::Polish];

    /// The two target languages for a given source, in declaration order
    pub fn targets_of(source: Language) -> [Language; 2] {
        match source {
            Language::French => [Language::English, Language::Polish],
            Language::English => [Language::French, Language::Polish],
            Language::Polish => [Language::French, Language::English],
        }
    }

    /// Human-readable language name, as sent to the translation model
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::French => "French",
            Self::English => "English",
            Self::Polish => "Polish",
        }
    }

    /// Lowercase wire identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::French => "french".to_string(),
            Self::English => "english".to_string(),
            Self::Polish => "polish".to_string(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "french" | "fr" => Ok(Self::French),
            "english" | "en" => Ok(Self::English),
            "polish" | "pl" => Ok(Self::Polish),
            _ => Err(anyhow!("Invalid language: {}", s)),
        }
    }
}

/// One text slot per language. Slots are always present, possibly empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LanguageText {
    /// French text
    #[serde(default)]
    pub french: String,

    /// English text
    #[serde(default)]
    pub english: String,

    /// Polish text
    #[serde(default)]
    pub polish: String,
}

impl LanguageText {
    /// Create a record with all three slots empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the slot for a language
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::French => &self.french,
            Language::English => &self.english,
            Language::Polish => &self.polish,
        }
    }

    /// Write the slot for a language
    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        match language {
            Language::French => self.french = text.into(),
            Language::English => self.english = text.into(),
            Language::Polish => self.polish = text.into(),
        }
    }

    /// True if every slot is empty
    pub fn is_empty(&self) -> bool {
        self.french.is_empty() && self.english.is_empty() && self.polish.is_empty()
    }
}
