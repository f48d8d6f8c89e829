//! Resumable line splitter.
//!
//! Turns raw chunks into decorated output: a prefix before the first byte of
//! every physical line, a suffix right before its terminator, and the
//! terminator bytes exactly as they arrived (`\n`, `\r\n` or a bare `\r`).
//!
//! The only state carried between chunks is [`Carry`], so the output for a
//! byte sequence is the same whether it arrives in one piece or one byte at a
//! time. A `\r` at the end of a chunk is held back until the next byte shows
//! whether it starts a `\r\n` pair.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::decor::Decorate;
use crate::level::Level;

/// Where the splitter stands relative to line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Carry {
    /// The last byte written was a terminator; the next byte opens a line
    #[default]
    LineStart,
    /// Inside a line whose prefix has been written
    Mid,
    /// A `\r` ended the line; the suffix is out, the `\r` itself is held
    PendingCr,
}

/// Formatting context of the line being written
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub timestamp: &'a DateTime<Utc>,
    pub level: Level,
    pub domains: &'a [String],
}

/// Stateful transducer from raw chunks to decorated bytes.
#[derive(Debug, Default)]
pub struct LineSplitter {
    carry: Carry,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn carry(&self) -> Carry {
        self.carry
    }

    /// True when the next byte would open a new line
    pub fn at_line_start(&self) -> bool {
        self.carry == Carry::LineStart
    }

    /// Decorate `chunk` and write it to `out`.
    ///
    /// Write failures do not interrupt processing: every byte of the chunk is
    /// still accounted for in the carry state, and the first error is
    /// returned once the chunk is done.
    pub fn feed<D, W>(
        &mut self,
        decor: &D,
        ctx: &LineContext<'_>,
        chunk: &[u8],
        out: &mut W,
    ) -> io::Result<()>
    where
        D: Decorate + ?Sized,
        W: Write + ?Sized,
    {
        let mut sink = BestEffort::new(out);
        let mut rest = chunk;

        while let Some(&first) = rest.first() {
            match self.carry {
                Carry::PendingCr => {
                    self.carry = Carry::LineStart;
                    if first == b'\n' {
                        sink.put(b"\r\n");
                        rest = &rest[1..];
                    } else {
                        sink.put(b"\r");
                    }
                    continue;
                }
                Carry::LineStart => {
                    sink.put(&decor.decorate(ctx.timestamp, ctx.level, ctx.domains, true));
                    self.carry = Carry::Mid;
                }
                Carry::Mid => {}
            }

            match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
                None => {
                    sink.put(rest);
                    rest = &[];
                }
                Some(i) => {
                    sink.put(&rest[..i]);
                    sink.put(&decor.decorate(ctx.timestamp, ctx.level, ctx.domains, false));
                    if rest[i] == b'\n' {
                        sink.put(b"\n");
                        self.carry = Carry::LineStart;
                    } else {
                        self.carry = Carry::PendingCr;
                    }
                    rest = &rest[i + 1..];
                }
            }
        }

        sink.finish()
    }
}

/// Writer wrapper that keeps going after a failure and remembers the first one.
struct BestEffort<'a, W: Write + ?Sized> {
    out: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, W: Write + ?Sized> BestEffort<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, error: None }
    }

    fn put(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if let Err(e) = self.out.write_all(bytes) {
            self.error.get_or_insert(e);
        }
    }

    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
