//! Line decorations: the prefix/suffix bytes wrapped around each physical line.
//!
//! Two styles ship with the crate:
//!
//! ```text
//! bracketed   01:02:03.004567 [INFO:server:tls] handshake done
//! colored      01:02:03.004567  INFO  server:tls  handshake done
//! ```
//!
//! (the colored style puts each segment on its own ANSI background)
//!
//! All escape sequences and level tags are assembled once, when a
//! [`Decorator`] is built; decorating a line only stitches the timestamp and
//! domain chain into the precomputed pieces.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::ansi::{self, gray, rgb, ColorPair, BLACK, WHITE};
use crate::domain::DOMAIN_SEPARATOR;
use crate::level::Level;
use crate::timestamp::TsFormat;

/// Produces decoration bytes for one physical line.
///
/// Called once with `prefix = true` before the line content and once with
/// `prefix = false` right before the line terminator. Implementations must be
/// deterministic and free of side effects.
pub trait Decorate {
    fn decorate(
        &self,
        ts: &DateTime<Utc>,
        level: Level,
        domains: &[String],
        prefix: bool,
    ) -> Cow<'_, [u8]>;
}

/// Visual style of a [`Decorator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `<ts> [<LEVEL>:<domain>] `
    Bracketed,
    /// Same segments on ANSI 256-color backgrounds
    Colored,
}

const TIME_COLORS: ColorPair = ColorPair::new(BLACK, gray(128));
const DOMAIN_COLORS: ColorPair = ColorPair::new(WHITE, gray(64));

fn level_colors(level: Level) -> ColorPair {
    match level {
        Level::Trace => ColorPair::new(gray(96), rgb(32, 32, 48)),
        Level::Debug => ColorPair::new(gray(96), rgb(72, 32, 64)),
        Level::Info => ColorPair::new(gray(240), rgb(64, 64, 96)),
        Level::Warn => ColorPair::new(BLACK, rgb(128, 128, 64)),
        Level::Error => ColorPair::new(WHITE, rgb(128, 64, 64)),
        Level::Fatal => ColorPair::new(BLACK, rgb(240, 64, 64)),
    }
}

/// The shipped decoration strategy, precomputed for one style and
/// timestamp format.
#[derive(Debug, Clone)]
pub struct Decorator {
    style: Style,
    ts_format: TsFormat,
    /// Written before the timestamp
    time_open: String,
    /// Written after the timestamp
    time_close: String,
    /// Level tag per [`Level::index`]
    heads: [String; 6],
    /// Complete prefix per level for lines without timestamp and domain
    bare: [String; 6],
    domain_open: String,
    domain_close: String,
    plain_close: String,
}

impl Decorator {
    pub fn new(style: Style, ts_format: TsFormat) -> Self {
        let (time_open, time_close, domain_open, domain_close, plain_close) = match style {
            Style::Bracketed => (
                String::new(),
                " ".to_string(),
                DOMAIN_SEPARATOR.to_string(),
                "] ".to_string(),
                "] ".to_string(),
            ),
            Style::Colored => (
                format!("{} ", TIME_COLORS.seq()),
                " ".to_string(),
                format!("{} ", DOMAIN_COLORS.seq()),
                format!(" {} ", ansi::RESET),
                format!("{} ", ansi::RESET),
            ),
        };

        let heads = Level::ALL.map(|level| match style {
            Style::Bracketed => format!("[{}", level.name()),
            Style::Colored => format!("{} {} ", level_colors(level).seq(), level.name()),
        });
        let bare = Level::ALL.map(|level| format!("{}{}", heads[level.index()], plain_close));

        Self {
            style,
            ts_format,
            time_open,
            time_close,
            heads,
            bare,
            domain_open,
            domain_close,
            plain_close,
        }
    }

    pub fn bracketed(ts_format: TsFormat) -> Self {
        Self::new(Style::Bracketed, ts_format)
    }

    pub fn colored(ts_format: TsFormat) -> Self {
        Self::new(Style::Colored, ts_format)
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn ts_format(&self) -> TsFormat {
        self.ts_format
    }
}

impl Decorate for Decorator {
    fn decorate(
        &self,
        ts: &DateTime<Utc>,
        level: Level,
        domains: &[String],
        prefix: bool,
    ) -> Cow<'_, [u8]> {
        if !prefix {
            return Cow::Borrowed(&[]);
        }
        let show_time = self.ts_format.is_visible();
        if !show_time && domains.is_empty() {
            return Cow::Borrowed(self.bare[level.index()].as_bytes());
        }

        let mut out = String::with_capacity(64);
        if show_time {
            out.push_str(&self.time_open);
            out.push_str(&self.ts_format.format(ts));
            out.push_str(&self.time_close);
        }
        out.push_str(&self.heads[level.index()]);
        if domains.is_empty() {
            out.push_str(&self.plain_close);
        } else {
            out.push_str(&self.domain_open);
            out.push_str(&domains.join(DOMAIN_SEPARATOR));
            out.push_str(&self.domain_close);
        }
        Cow::Owned(out.into_bytes())
    }
}
