//! Open-line state machine.
//!
//! ```text
//! Stopped --start / want(differs)--> Open(level, chain) --append--> Open
//! Open --flush--> Stopped                     want(same) loops on Open
//! ```

use chrono::{DateTime, Utc};

use crate::level::Level;

/// Formatting context of the line currently being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLine {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub domains: Vec<String>,
}

/// Tracks the open line and decides when a new one begins.
///
/// Content is handed to a `deliver` callback together with the line it
/// belongs to; the callback is expected to run it through a
/// [`crate::LineSplitter`].
#[derive(Debug, Default)]
pub struct LineState {
    open: Option<OpenLine>,
}

impl LineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_line(&self) -> Option<&OpenLine> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Whether the open line has exactly this level and chain
    pub fn is_open_at(&self, level: Level, domains: &[String]) -> bool {
        matches!(&self.open, Some(line) if line.level == level && line.domains == domains)
    }

    /// Close any open line, then open a new one.
    pub fn start<F>(
        &mut self,
        timestamp: DateTime<Utc>,
        level: Level,
        domains: Vec<String>,
        deliver: F,
    ) where
        F: FnMut(&OpenLine, &[u8]),
    {
        self.flush(deliver);
        self.open = Some(OpenLine {
            timestamp,
            level,
            domains,
        });
    }

    /// Open a new line unless one with the same level and chain is open.
    ///
    /// Returns `true` when a new line was started.
    pub fn want<F>(
        &mut self,
        timestamp: DateTime<Utc>,
        level: Level,
        domains: Vec<String>,
        deliver: F,
    ) -> bool
    where
        F: FnMut(&OpenLine, &[u8]),
    {
        if self.is_open_at(level, &domains) {
            return false;
        }
        self.start(timestamp, level, domains, deliver);
        true
    }

    /// Forward `bytes` to the open line. Without an open line there is no
    /// formatting context and the bytes are dropped.
    pub fn append<F>(&mut self, bytes: &[u8], mut deliver: F)
    where
        F: FnMut(&OpenLine, &[u8]),
    {
        if bytes.is_empty() {
            return;
        }
        if let Some(line) = &self.open {
            deliver(line, bytes);
        }
    }

    /// Terminate the open line with a synthetic `\n` and return to Stopped.
    pub fn flush<F>(&mut self, mut deliver: F)
    where
        F: FnMut(&OpenLine, &[u8]),
    {
        if let Some(line) = self.open.take() {
            deliver(&line, b"\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<(Level, Vec<String>, Vec<u8>)>;

    fn recorder(log: &mut Log) -> impl FnMut(&OpenLine, &[u8]) + '_ {
        move |line, bytes| log.push((line.level, line.domains.clone(), bytes.to_vec()))
    }

    #[test]
    fn test_append_without_open_line_is_dropped() {
        let mut state = LineState::new();
        let mut log = Log::new();
        state.append(b"orphan", recorder(&mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn test_flush_on_stopped_is_noop() {
        let mut state = LineState::new();
        let mut log = Log::new();
        state.flush(recorder(&mut log));
        assert!(log.is_empty());
        assert!(!state.is_open());
    }

    #[test]
    fn test_start_flushes_previous_line() {
        let mut state = LineState::new();
        let mut log = Log::new();
        state.start(Utc::now(), Level::Info, vec![], recorder(&mut log));
        state.append(b"one", recorder(&mut log));
        state.start(Utc::now(), Level::Warn, vec![], recorder(&mut log));

        assert_eq!(
            log,
            vec![
                (Level::Info, vec![], b"one".to_vec()),
                (Level::Info, vec![], b"\n".to_vec()),
            ]
        );
        assert!(state.is_open_at(Level::Warn, &[]));
    }

    #[test]
    fn test_want_same_level_is_self_loop() {
        let mut state = LineState::new();
        let mut log = Log::new();
        let net = vec!["net".to_string()];
        assert!(state.want(Utc::now(), Level::Info, net.clone(), recorder(&mut log)));
        assert!(!state.want(Utc::now(), Level::Info, net.clone(), recorder(&mut log)));
        assert!(log.is_empty());

        assert!(state.want(Utc::now(), Level::Info, vec![], recorder(&mut log)));
        assert_eq!(log, vec![(Level::Info, net, b"\n".to_vec())]);
    }

    #[test]
    fn test_append_uses_open_line_timestamp() {
        let mut state = LineState::new();
        let opened = Utc::now() - chrono::Duration::seconds(5);
        state.start(opened, Level::Debug, vec![], |_, _| {});

        let mut seen = None;
        state.append(b"x", |line, _| seen = Some(line.timestamp));
        assert_eq!(seen, Some(opened));
    }
}
