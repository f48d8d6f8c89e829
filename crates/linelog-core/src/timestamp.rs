//! Timestamp rendering for line prefixes.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Which parts of a timestamp appear in the line prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsFormat {
    /// `2009/01/23`
    pub date: bool,
    /// `01:23:23`
    pub time: bool,
    /// `.123456` after the time
    pub micros: bool,
    /// Render in UTC instead of local time
    pub utc: bool,
}

impl TsFormat {
    pub const NONE: TsFormat = TsFormat {
        date: false,
        time: false,
        micros: false,
        utc: false,
    };

    /// Time with microseconds, local zone
    pub const PRECISE: TsFormat = TsFormat {
        date: false,
        time: true,
        micros: true,
        utc: false,
    };

    /// Whether anything is rendered at all
    pub fn is_visible(&self) -> bool {
        self.date || self.time
    }

    fn pattern(&self) -> String {
        let mut pattern = String::new();
        if self.date {
            pattern.push_str("%Y/%m/%d");
            if self.time {
                pattern.push(' ');
            }
        }
        if self.time {
            pattern.push_str("%H:%M:%S");
            if self.micros {
                pattern.push_str("%.6f");
            }
        }
        pattern
    }

    /// Render `ts`; empty when neither date nor time is enabled.
    pub fn format(&self, ts: &DateTime<Utc>) -> String {
        if !self.is_visible() {
            return String::new();
        }
        let pattern = self.pattern();
        if self.utc {
            ts.format(&pattern).to_string()
        } else {
            ts.with_timezone(&Local).format(&pattern).to_string()
        }
    }
}
