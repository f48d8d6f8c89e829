//! Severity levels and sink control values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Message priority, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// All levels in ascending severity
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Tag rendered inside the line decoration
    pub fn name(self) -> &'static str {
        match self {
            Level::Trace => "TRCE",
            Level::Debug => "DBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERR!",
            Level::Fatal => "FATAL!",
        }
    }

    /// Position in [`Level::ALL`], used to index precomputed tables
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" | "trce" => Ok(Level::Trace),
            "debug" | "dbug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" | "err" | "err!" => Ok(Level::Error),
            "fatal" | "fatal!" => Ok(Level::Fatal),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

/// What a sink should do with the line state before appending a payload.
///
/// `Stop` and `Continue` are the two sentinel pseudo-levels: they steer the
/// state machine but are never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Close the open line, if any
    Stop,
    /// Append to whatever line is open
    Continue,
    /// Always close the open line and open a new one
    Start(Level),
    /// Open a new line only if level or domain differ from the open one
    Want(Level),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Error < Level::Fatal);
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    #[test]
    fn test_level_names() {
        let names: Vec<_> = Level::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(names, ["TRCE", "DBUG", "INFO", "WARN", "ERR!", "FATAL!"]);
    }

    #[test]
    fn test_level_index_matches_all() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!(" WARNING ".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
        assert!(matches!(
            "loud".parse::<Level>(),
            Err(LogError::UnknownLevel(s)) if s == "loud"
        ));
    }

    #[test]
    fn test_level_serde_lowercase() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(level, Level::Fatal);
    }
}
