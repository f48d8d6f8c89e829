//! tracing Layer that renders events through a linelog logger.
//!
//! Lets a program use `tracing` macros for its own diagnostics while sharing
//! one decorated console stream with everything else it logs.
//!
//! ```ignore
//! use linelog_core::{global, ConsoleLayer};
//! use tracing_subscriber::prelude::*;
//!
//! tracing_subscriber::registry()
//!     .with(ConsoleLayer::new(global::root().clone()))
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::domain::DOMAIN_SEPARATOR;
use crate::level::Level;
use crate::logger::SharedLogger;

/// A tracing Layer writing each event as one decorated log message.
///
/// The domain of a message is the event's span names from the root, joined
/// with `:`, below an optional fixed domain.
pub struct ConsoleLayer {
    logger: SharedLogger,
    domain: Option<String>,
}

impl ConsoleLayer {
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            logger,
            domain: None,
        }
    }

    /// Put every event under `domain`
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Map a tracing level onto the matching severity
pub fn level_from_tracing(level: &tracing::Level) -> Level {
    if *level == tracing::Level::TRACE {
        Level::Trace
    } else if *level == tracing::Level::DEBUG {
        Level::Debug
    } else if *level == tracing::Level::INFO {
        Level::Info
    } else if *level == tracing::Level::WARN {
        Level::Warn
    } else {
        Level::Error
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let level = level_from_tracing(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut segments: Vec<String> = self.domain.iter().cloned().collect();
        if let Some(scope) = ctx.event_scope(event) {
            segments.extend(scope.from_root().map(|span| span.name().to_string()));
        }

        let domain = segments.join(DOMAIN_SEPARATOR);
        self.logger.log(level, &domain, &visitor.finish());
    }
}

/// Collects the `message` field plus ` key=value` for every other field.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(mut self) -> String {
        self.message.push_str(&self.fields);
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}
