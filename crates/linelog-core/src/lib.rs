//! linelog Core Library
//!
//! Line-oriented console log decoration.
//!
//! ## Overview
//!
//! linelog takes a stream of bytes tagged with a severity level and a domain
//! chain and re-emits it with a prefix on every physical line:
//!
//! ```text
//! 14:02:11.518204 [INFO:build] compiling linelog-core
//! 14:02:12.003911 [WARN:build:deps] unused import
//! ```
//!
//! Input may arrive in arbitrary chunks. Lines are split on `\n`, `\r\n` and
//! bare `\r`, decorations never land mid-line, and the output is identical no
//! matter where chunk boundaries fall.
//!
//! ## Layers
//!
//! - [`LineSplitter`]: resumable transducer inserting prefix/suffix around
//!   each physical line
//! - [`LineState`]: tracks the open line's level, domains and timestamp
//! - [`Sink`]: one `emit` callback wiring the two to a writer
//! - [`Logger`] / [`SharedLogger`]: filter and domain stack in front of a sink
//! - [`global`]: the process-wide root logger and the level macros
//!
//! ## Quick Start
//!
//! ```ignore
//! use linelog_core::{global, Options};
//!
//! global::configure(&"time,stderr".parse::<Options>()?);
//!
//! linelog_core::info!("server starting");
//! {
//!     let _scope = global::scoped_domain("db");
//!     linelog_core::warn!(domain: "pool", "{} idle connections dropped", 3);
//! }
//!
//! global::close();
//! ```

pub mod ansi;
pub mod config;
pub mod decor;
pub mod domain;
pub mod error;
pub mod filter;
pub mod global;
pub mod layer;
pub mod level;
pub mod logger;
mod macros;
pub mod progress;
pub mod sink;
pub mod splitter;
pub mod state;
pub mod term;
pub mod timestamp;
pub mod writer;

// Re-exports
pub use config::{Options, OutputFormat, OutputTarget, CONFIGURATION_TOKENS};
pub use decor::{Decorate, Decorator, Style};
pub use domain::{join_chain, DomainStack, DOMAIN_SEPARATOR};
pub use error::{LogError, LogResult};
pub use filter::Filter;
pub use layer::ConsoleLayer;
pub use level::{Control, Level};
pub use logger::{DomainGuard, Logger, SharedLogger};
pub use progress::{Progress, RuneBar};
pub use sink::{DecoratedSink, PlainSink, Sink};
pub use splitter::{Carry, LineContext, LineSplitter};
pub use state::{LineState, OpenLine};
pub use timestamp::TsFormat;
pub use writer::LevelWriter;
