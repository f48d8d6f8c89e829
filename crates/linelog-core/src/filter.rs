//! Level gating for the chatty severities.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Which of the verbose levels are let through. Everything from
/// [`Level::Info`] up is always shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub trace: bool,
    pub debug: bool,
}

impl Filter {
    /// Let every level through
    pub const ALL: Filter = Filter {
        trace: true,
        debug: true,
    };

    pub fn allows(&self, level: Level) -> bool {
        match level {
            Level::Trace => self.trace,
            Level::Debug => self.debug,
            _ => true,
        }
    }
}
