//! `io::Write` adapter that streams bytes into a logger at a fixed level.
//!
//! Useful for piping command output or progress text through the logger
//! when newline boundaries are unpredictable.

use std::io::{self, Write};

use crate::level::Level;
use crate::logger::SharedLogger;

/// Writer logging everything written to it at one level and domain.
///
/// The first write always begins a fresh line. Later writes re-assert the
/// writer's level under the same lock as the append, so if another message
/// took over the line in between, the writer resumes on a fresh line. A
/// trailing `\n` is held back on the logger (see [`crate::Logger::stream`]),
/// so closing a stream that ended with a newline does not print an empty
/// decorated line.
pub struct LevelWriter {
    logger: SharedLogger,
    level: Level,
    domain: String,
    started: bool,
}

impl LevelWriter {
    /// Nothing is logged until the first non-empty write.
    pub fn new(logger: SharedLogger, level: Level, domain: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            domain: domain.into(),
            started: false,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Terminate this writer's line if it is still the open one.
    pub fn finish(&mut self) {
        if !self.started {
            return;
        }
        self.logger.lock().end_stream(self.level, &self.domain);
    }
}

impl Write for LevelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let fresh = !self.started;
        self.started = true;
        self.logger.lock().stream(self.level, &self.domain, buf, fresh);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.logger.lock().flush_output();
        Ok(())
    }
}

impl Drop for LevelWriter {
    fn drop(&mut self) {
        self.finish();
    }
}
