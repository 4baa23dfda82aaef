use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregation;
pub mod config_file;

pub use aggregation::{
    Aggregator, CategoryScores, RankedRow, ScoreTable, Stats, TierColumns, aggregate,
};
pub use config_file::{AwardConfig, ConfigFile, PathsConfig};

/// Delimiter/ordering convention of an award list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `Author — «Title» — details`, split on em-dashes only.
    Dash,
    /// `Author1, Author2, «Title», publisher (note)`, split on commas and
    /// em-dashes outside quotes and parentheses.
    Guillemet,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Dash => "dash",
            Dialect::Guillemet => "guillemet",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dash" | "a" => Ok(Dialect::Dash),
            "guillemet" | "b" => Ok(Dialect::Guillemet),
            other => Err(CoreError::UnknownDialect(other.to_string())),
        }
    }
}

/// One raw list entry as found on a source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub award: String,
    pub year: i32,
    pub category: String,
    pub text: String,
}

/// An author entry: name plus the optional parenthetical qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Qualifier text (role, pseudonym note). Empty when absent.
    #[serde(default)]
    pub details: String,
}

impl Author {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }
}

/// A classified citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub award: String,
    pub year: i32,
    pub category: String,
    /// The citation text the record was built from.
    #[serde(rename = "src")]
    pub source_text: String,
    pub authors: Vec<Author>,
    pub title: String,
    pub details: String,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("unknown dialect: {0:?} (expected \"dash\" or \"guillemet\")")]
    UnknownDialect(String),
}
