//! Process-wide root logger.
//!
//! Until [`configure`] is called the root writes bracketed lines with a
//! microsecond timestamp to stderr. Call [`stop`] (or [`close`]) before the
//! process exits, otherwise the last line is left without its terminator.

use std::fmt;
use std::io;
use std::sync::OnceLock;

use crate::config::Options;
use crate::decor::Decorator;
use crate::level::Level;
use crate::logger::{DomainGuard, Logger, SharedLogger};
use crate::timestamp::TsFormat;
use crate::writer::LevelWriter;

static ROOT: OnceLock<SharedLogger> = OnceLock::new();

pub fn root() -> &'static SharedLogger {
    ROOT.get_or_init(|| {
        SharedLogger::new(Logger::decorated(
            io::stderr(),
            Decorator::bracketed(TsFormat::PRECISE),
        ))
    })
}

/// Replace the root logger with one built from `options`.
pub fn configure(options: &Options) {
    set_root(options.build());
}

/// Replace the root logger, terminating the previous one's open line.
pub fn set_root(logger: Logger) {
    let mut previous = root().replace(logger);
    previous.close();
}

/// Terminate the open line of the root logger
pub fn stop() {
    root().flush();
}

/// Terminate the open line and flush the root logger's output.
///
/// The console mode is left as it is. On Windows, virtual terminal
/// processing switched on by [`crate::term::supports_color`] stays on after
/// close, since `crossterm` keeps no record of the previous mode to restore.
pub fn close() {
    root().close();
}

/// Used by the level macros
pub fn log(level: Level, domain: &str, args: fmt::Arguments<'_>) {
    match args.as_str() {
        Some(msg) => root().log(level, domain, msg),
        None => root().log(level, domain, &args.to_string()),
    }
}

/// Append text to the root logger's open line
pub fn print(msg: &str) {
    root().print(msg);
}

pub fn push_domain(segment: impl Into<String>) {
    root().push_domain(segment);
}

pub fn pop_domain() -> Option<String> {
    root().pop_domain()
}

pub fn scoped_domain(segment: impl Into<String>) -> DomainGuard {
    root().scoped_domain(segment)
}

pub fn writer(level: Level, domain: impl Into<String>) -> LevelWriter {
    root().writer(level, domain)
}
