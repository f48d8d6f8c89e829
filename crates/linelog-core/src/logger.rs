//! Logger context: a sink plus the level filter and domain stack in front of it.
//!
//! A [`Logger`] is plain single-writer state. Wrap it in a [`SharedLogger`]
//! to use it from several threads; every operation then holds the lock for
//! exactly one call, so concurrent writers interleave per call and a single
//! call's prefix, content and terminator always stay together.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};

use crate::decor::Decorator;
use crate::domain::DomainStack;
use crate::filter::Filter;
use crate::level::{Control, Level};
use crate::sink::{DecoratedSink, PlainSink, Sink};
use crate::writer::LevelWriter;

pub struct Logger {
    sink: Box<dyn Sink + Send>,
    filter: Filter,
    domains: DomainStack,
    /// Set while the most recent level was rejected by the filter
    muted: bool,
    /// The open line's content ended with a `\n` that is not written yet
    held_eol: bool,
}

impl Logger {
    pub fn new(sink: impl Sink + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            filter: Filter::default(),
            domains: DomainStack::new(),
            muted: false,
            held_eol: false,
        }
    }

    /// Logger decorating every line written to `target`
    pub fn decorated<W: Write + Send + 'static>(target: W, decor: Decorator) -> Self {
        Self::new(DecoratedSink::new(target, decor))
    }

    /// Logger writing payloads to `target` unchanged
    pub fn plain<W: Write + Send + 'static>(target: W) -> Self {
        Self::new(PlainSink::new(target))
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Domain chain a line logged at `domain` would carry
    pub fn effective_chain(&self, domain: &str) -> Vec<String> {
        self.domains.effective(domain)
    }

    pub fn push_domain(&mut self, segment: impl Into<String>) {
        self.domains.push(segment);
    }

    pub fn pop_domain(&mut self) -> Option<String> {
        self.domains.pop()
    }

    pub fn domains(&self) -> &DomainStack {
        &self.domains
    }

    /// Close the open line and start a new one.
    ///
    /// Returns `false` when the level is filtered out; the open line is then
    /// left alone and appends are dropped until the next accepted level.
    pub fn start_level(&mut self, level: Level, domain: &str) -> bool {
        if !self.accept(level) {
            return false;
        }
        let chain = self.domains.effective(domain);
        self.held_eol = false;
        self.sink.emit(Utc::now(), Control::Start(level), &chain, &[]);
        true
    }

    /// Start a new line only if `level`/`domain` differ from the open line.
    ///
    /// Returns `true` when a new line was started.
    pub fn want_level(&mut self, level: Level, domain: &str) -> bool {
        if !self.accept(level) {
            return false;
        }
        let chain = self.domains.effective(domain);
        if self.sink.is_open_at(level, &chain) {
            return false;
        }
        self.held_eol = false;
        self.sink.emit(Utc::now(), Control::Want(level), &chain, &[]);
        true
    }

    /// Append raw bytes to the open line. Dropped when no line is open.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.muted || bytes.is_empty() {
            return;
        }
        self.release_held_eol();
        self.sink.emit(Utc::now(), Control::Continue, &[], bytes);
    }

    /// Stream `bytes` at `level`/`domain`, holding back a trailing `\n`.
    ///
    /// With `fresh` the bytes always begin a new line; otherwise they
    /// continue an open line of the same level and chain. A held `\n` is
    /// written before the next content on the line, or becomes the line's
    /// terminator when the line is closed, so a stream ending in a newline
    /// never leaves a decorated blank line behind.
    pub fn stream(&mut self, level: Level, domain: &str, bytes: &[u8], fresh: bool) {
        if fresh {
            self.start_level(level, domain);
        } else {
            self.want_level(level, domain);
        }
        if self.muted {
            return;
        }
        let (body, eol) = match bytes.split_last() {
            Some((b'\n', body)) => (body, true),
            _ => (bytes, false),
        };
        if eol || !body.is_empty() {
            self.release_held_eol();
        }
        self.append(body);
        self.held_eol = eol;
    }

    /// Terminate the open line if it is at `level`/`domain` and still owes
    /// a held `\n`.
    pub fn end_stream(&mut self, level: Level, domain: &str) {
        if self.held_eol && self.is_open(level, domain) {
            self.flush();
        }
    }

    /// Terminate the open line, if any.
    pub fn flush(&mut self) {
        self.muted = false;
        self.held_eol = false;
        self.sink.emit(Utc::now(), Control::Stop, &[], &[]);
    }

    /// Same as [`Logger::flush`]
    pub fn stop(&mut self) {
        self.flush();
    }

    /// Flush the underlying writer without touching the line state
    pub fn flush_output(&mut self) {
        self.sink.flush_target();
    }

    /// Terminate the open line and flush the writer. Call before exit.
    pub fn close(&mut self) {
        self.flush();
        self.flush_output();
    }

    /// Log one message on a fresh line. Fatal messages are terminated
    /// right away.
    pub fn log(&mut self, level: Level, domain: &str, msg: &str) {
        self.start_level(level, domain);
        self.append(msg.as_bytes());
        if level == Level::Fatal {
            self.flush();
        }
    }

    /// Append text to the open line
    pub fn print(&mut self, msg: &str) {
        self.append(msg.as_bytes());
    }

    /// Whether the open line has this level and domain
    pub fn is_open(&self, level: Level, domain: &str) -> bool {
        self.sink.is_open_at(level, &self.domains.effective(domain))
    }

    fn release_held_eol(&mut self) {
        if std::mem::take(&mut self.held_eol) {
            self.sink.emit(Utc::now(), Control::Continue, &[], b"\n");
        }
    }

    fn accept(&mut self, level: Level) -> bool {
        self.muted = !self.filter.allows(level);
        !self.muted
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // The open line is deliberately left unterminated; callers own that
        // through `close`.
        self.sink.flush_target();
    }
}

/// Thread-safe handle to a [`Logger`].
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Lock for a sequence of operations that must not interleave
    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        self.inner.lock()
    }

    /// Swap in a new logger, returning the previous one
    pub fn replace(&self, logger: Logger) -> Logger {
        std::mem::replace(&mut *self.inner.lock(), logger)
    }

    pub fn log(&self, level: Level, domain: &str, msg: &str) {
        self.lock().log(level, domain, msg);
    }

    pub fn print(&self, msg: &str) {
        self.lock().print(msg);
    }

    pub fn start_level(&self, level: Level, domain: &str) -> bool {
        self.lock().start_level(level, domain)
    }

    pub fn want_level(&self, level: Level, domain: &str) -> bool {
        self.lock().want_level(level, domain)
    }

    pub fn append(&self, bytes: &[u8]) {
        self.lock().append(bytes);
    }

    /// Re-assert `level`/`domain` and append, under one lock.
    ///
    /// Returns `true` when a new line had to be started.
    pub fn write_at(&self, level: Level, domain: &str, bytes: &[u8]) -> bool {
        let mut logger = self.lock();
        let started = logger.want_level(level, domain);
        logger.append(bytes);
        started
    }

    pub fn flush(&self) {
        self.lock().flush();
    }

    pub fn close(&self) {
        self.lock().close();
    }

    pub fn push_domain(&self, segment: impl Into<String>) {
        self.lock().push_domain(segment);
    }

    pub fn pop_domain(&self) -> Option<String> {
        self.lock().pop_domain()
    }

    /// Push `segment` until the returned guard is dropped
    pub fn scoped_domain(&self, segment: impl Into<String>) -> DomainGuard {
        self.push_domain(segment);
        DomainGuard {
            logger: self.clone(),
        }
    }

    /// Streaming writer that logs everything written to it at `level`
    pub fn writer(&self, level: Level, domain: impl Into<String>) -> LevelWriter {
        LevelWriter::new(self.clone(), level, domain)
    }
}

/// Pops the domain segment pushed by [`SharedLogger::scoped_domain`]
pub struct DomainGuard {
    logger: SharedLogger,
}

impl Drop for DomainGuard {
    fn drop(&mut self) {
        self.logger.pop_domain();
    }
}
