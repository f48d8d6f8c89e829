//! Sinks: the single callback every log message goes through.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::decor::{Decorate, Decorator};
use crate::level::{Control, Level};
use crate::splitter::{LineContext, LineSplitter};
use crate::state::LineState;

/// Receives every message after filtering and domain resolution.
///
/// `control` moves the line state first; `msg` (possibly empty) is then
/// appended to whatever line is open.
pub trait Sink {
    fn emit(&mut self, ts: DateTime<Utc>, control: Control, domains: &[String], msg: &[u8]);

    /// Whether a line with this level and chain is currently open
    fn is_open_at(&self, level: Level, domains: &[String]) -> bool;

    /// Flush the underlying writer
    fn flush_target(&mut self);
}

/// Decorates every physical line with a prefix and suffix.
pub struct DecoratedSink<W, D = Decorator> {
    target: W,
    decor: D,
    state: LineState,
    splitter: LineSplitter,
}

impl<W: Write, D: Decorate> DecoratedSink<W, D> {
    pub fn new(target: W, decor: D) -> Self {
        Self {
            target,
            decor,
            state: LineState::new(),
            splitter: LineSplitter::new(),
        }
    }

    pub fn decorator(&self) -> &D {
        &self.decor
    }

    pub fn get_ref(&self) -> &W {
        &self.target
    }

    pub fn into_inner(self) -> W {
        self.target
    }
}

impl<W: Write, D: Decorate> Sink for DecoratedSink<W, D> {
    fn emit(&mut self, ts: DateTime<Utc>, control: Control, domains: &[String], msg: &[u8]) {
        let Self {
            target,
            decor,
            state,
            splitter,
        } = self;

        // Failed writes are dropped: logging must never take the host down.
        let mut deliver = |line: &crate::state::OpenLine, bytes: &[u8]| {
            let ctx = LineContext {
                timestamp: &line.timestamp,
                level: line.level,
                domains: &line.domains,
            };
            let _ = splitter.feed(&*decor, &ctx, bytes, &mut *target);
        };

        match control {
            Control::Stop => state.flush(&mut deliver),
            Control::Continue => {}
            Control::Start(level) => state.start(ts, level, domains.to_vec(), &mut deliver),
            Control::Want(level) => {
                state.want(ts, level, domains.to_vec(), &mut deliver);
            }
        }
        state.append(msg, &mut deliver);
    }

    fn is_open_at(&self, level: Level, domains: &[String]) -> bool {
        self.state.is_open_at(level, domains)
    }

    fn flush_target(&mut self) {
        let _ = self.target.flush();
    }
}

/// Writes payloads unchanged, with a bare `\n` between lines.
pub struct PlainSink<W> {
    target: W,
    open: Option<(Level, Vec<String>)>,
}

impl<W: Write> PlainSink<W> {
    pub fn new(target: W) -> Self {
        Self { target, open: None }
    }

    pub fn into_inner(self) -> W {
        self.target
    }

    fn close_line(&mut self) {
        if self.open.take().is_some() {
            let _ = self.target.write_all(b"\n");
        }
    }
}

impl<W: Write> Sink for PlainSink<W> {
    fn emit(&mut self, _ts: DateTime<Utc>, control: Control, domains: &[String], msg: &[u8]) {
        match control {
            Control::Stop => self.close_line(),
            Control::Continue => {}
            Control::Start(level) => {
                self.close_line();
                self.open = Some((level, domains.to_vec()));
            }
            Control::Want(level) => {
                if !self.is_open_at(level, domains) {
                    self.close_line();
                    self.open = Some((level, domains.to_vec()));
                }
            }
        }
        if !msg.is_empty() && self.open.is_some() {
            let _ = self.target.write_all(msg);
        }
    }

    fn is_open_at(&self, level: Level, domains: &[String]) -> bool {
        matches!(&self.open, Some((l, d)) if *l == level && d == domains)
    }

    fn flush_target(&mut self) {
        let _ = self.target.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::TsFormat;

    fn emit(sink: &mut impl Sink, control: Control, domains: &[&str], msg: &str) {
        let chain: Vec<String> = domains.iter().map(|s| s.to_string()).collect();
        sink.emit(Utc::now(), control, &chain, msg.as_bytes());
    }

    fn decorated() -> DecoratedSink<Vec<u8>> {
        DecoratedSink::new(Vec::new(), Decorator::bracketed(TsFormat::NONE))
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_decorated_message_sequence() {
        let mut sink = decorated();
        emit(&mut sink, Control::Start(Level::Info), &[], "starting");
        emit(&mut sink, Control::Start(Level::Warn), &["net"], "slow\npeer");
        emit(&mut sink, Control::Stop, &[], "");

        assert_eq!(
            text(sink.into_inner()),
            "[INFO] starting\n[WARN:net] slow\n[WARN:net] peer\n"
        );
    }

    #[test]
    fn test_continue_appends_to_open_line() {
        let mut sink = decorated();
        emit(&mut sink, Control::Start(Level::Info), &[], "");
        emit(&mut sink, Control::Continue, &[], "par");
        emit(&mut sink, Control::Continue, &[], "tial\nnext");
        emit(&mut sink, Control::Stop, &[], "");

        assert_eq!(text(sink.into_inner()), "[INFO] partial\n[INFO] next\n");
    }

    #[test]
    fn test_continue_without_line_is_dropped() {
        let mut sink = decorated();
        emit(&mut sink, Control::Continue, &[], "lost");
        emit(&mut sink, Control::Stop, &[], "");
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_want_keeps_line_open() {
        let mut sink = decorated();
        emit(&mut sink, Control::Want(Level::Error), &["io"], "a");
        emit(&mut sink, Control::Want(Level::Error), &["io"], "b");
        emit(&mut sink, Control::Want(Level::Error), &[], "c");
        emit(&mut sink, Control::Stop, &[], "");

        assert_eq!(text(sink.into_inner()), "[ERR!:io] ab\n[ERR!] c\n");
    }

    #[test]
    fn test_plain_sink_passes_payload_through() {
        let mut sink = PlainSink::new(Vec::new());
        emit(&mut sink, Control::Continue, &[], "dropped");
        emit(&mut sink, Control::Start(Level::Info), &[], "one\r\n");
        emit(&mut sink, Control::Continue, &[], "");
        emit(&mut sink, Control::Start(Level::Warn), &[], "two");
        emit(&mut sink, Control::Stop, &[], "");
        emit(&mut sink, Control::Stop, &[], "");

        assert_eq!(text(sink.into_inner()), "one\r\n\ntwo\n");
    }

    #[test]
    fn test_plain_sink_want() {
        let mut sink = PlainSink::new(Vec::new());
        emit(&mut sink, Control::Want(Level::Info), &[], "a");
        emit(&mut sink, Control::Want(Level::Info), &[], "b");
        assert!(sink.is_open_at(Level::Info, &[]));
        emit(&mut sink, Control::Want(Level::Debug), &[], "c");
        assert_eq!(text(sink.into_inner()), "ab\nc");
    }
}
