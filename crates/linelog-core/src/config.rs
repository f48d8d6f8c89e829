//! Logger options and the configuration tokens that set them.
//!
//! Tokens make it easy to configure logging from a command line flag or an
//! environment variable:
//!
//! ```ignore
//! use linelog_core::Options;
//!
//! let options: Options = "time,microsecond,debug,stderr".parse()?;
//! linelog_core::global::configure(&options);
//! ```

use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decor::{Decorator, Style};
use crate::error::{LogError, LogResult};
use crate::filter::Filter;
use crate::logger::Logger;
use crate::term;
use crate::timestamp::TsFormat;

/// Every token accepted by [`Options::apply`]
pub const CONFIGURATION_TOKENS: [&str; 12] = [
    "notime",
    "time",
    "microsecond",
    "utc",
    "date",
    "nodate",
    "debug",
    "trace",
    "plain",
    "color",
    "stdout",
    "stderr",
];

/// Where log output goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Decoration style selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored when the target is a color-capable terminal, bracketed otherwise
    #[default]
    Auto,
    Plain,
    Color,
}

/// Formatting style, output target and level filter of a logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub timestamp: TsFormat,
    pub output: OutputTarget,
    pub format: OutputFormat,
    pub filter: Filter,
}

impl Options {
    /// Apply configuration tokens in order. Surrounding whitespace is ignored
    /// and empty tokens are skipped.
    pub fn apply<I, S>(&mut self, tokens: I) -> LogResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref().trim();
            let ts = &mut self.timestamp;
            match token {
                "" => {}
                "notime" => {
                    ts.time = false;
                    ts.micros = false;
                    ts.utc = false;
                }
                "time" => ts.time = true,
                "microsecond" => {
                    ts.time = true;
                    ts.micros = true;
                }
                "utc" => {
                    ts.time = true;
                    ts.utc = true;
                }
                "date" => ts.date = true,
                "nodate" => ts.date = false,
                "debug" => self.filter.debug = true,
                "trace" => self.filter.trace = true,
                "plain" => self.format = OutputFormat::Plain,
                "color" => self.format = OutputFormat::Color,
                "stdout" => self.output = OutputTarget::Stdout,
                "stderr" => self.output = OutputTarget::Stderr,
                other => return Err(LogError::UnknownToken(other.to_string())),
            }
        }
        Ok(())
    }

    /// Options from the tokens in environment variable `var`; defaults when
    /// the variable is unset.
    pub fn from_env(var: &str) -> LogResult<Self> {
        match std::env::var(var) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Decorator for these options, probing the terminal for `Auto`
    pub fn decorator(&self) -> Decorator {
        let style = match self.format {
            OutputFormat::Plain => Style::Bracketed,
            OutputFormat::Color => Style::Colored,
            OutputFormat::Auto if term::supports_color(self.output) => Style::Colored,
            OutputFormat::Auto => Style::Bracketed,
        };
        Decorator::new(style, self.timestamp)
    }

    /// Build a logger writing to the configured standard stream.
    pub fn build(&self) -> Logger {
        let decor = self.decorator();
        tracing::debug!(
            style = ?decor.style(),
            output = ?self.output,
            "configured console logger"
        );
        let logger = match self.output {
            OutputTarget::Stdout => Logger::decorated(io::stdout(), decor),
            OutputTarget::Stderr => Logger::decorated(io::stderr(), decor),
        };
        logger.with_filter(self.filter)
    }
}

impl FromStr for Options {
    type Err = LogError;

    /// Tokens separated by commas and/or whitespace, applied to the defaults
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Options::default();
        options.apply(s.split(|c: char| c == ',' || c.is_whitespace()))?;
        Ok(options)
    }
}
