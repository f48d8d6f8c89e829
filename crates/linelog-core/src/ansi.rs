//! 256-color ANSI palette indices and escape sequences.

/// Index into the standard 256-color ANSI palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index(pub u8);

pub const BLACK: Index = Index(0);
pub const WHITE: Index = Index(15);

/// Resets all colors and attributes
pub const RESET: &str = "\x1b[0m";

/// Nearest entry in the 6×6×6 color cube.
pub const fn rgb(r: u8, g: u8, b: u8) -> Index {
    let r = (r as u16 * 3) >> 7;
    let g = (g as u16 * 3) >> 7;
    let b = (b as u16 * 3) >> 7;
    Index((r * 36 + g * 6 + b + 16) as u8)
}

/// Nearest entry on the 24-step gray ramp, snapping the ends to black/white.
pub const fn gray(l: u8) -> Index {
    let v = (l as u32 * 25 + 128) >> 8;
    match v {
        0 => BLACK,
        25 => WHITE,
        v => Index((v + 231) as u8),
    }
}

pub fn fg_seq(index: Index) -> String {
    format!("\x1b[38;5;{}m", index.0)
}

pub fn bg_seq(index: Index) -> String {
    format!("\x1b[48;5;{}m", index.0)
}

/// Foreground/background pair used for one decoration segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Index,
    pub bg: Index,
}

impl ColorPair {
    pub const fn new(fg: Index, bg: Index) -> Self {
        Self { fg, bg }
    }

    /// Escape sequence switching to this pair
    pub fn seq(&self) -> String {
        let mut s = fg_seq(self.fg);
        s.push_str(&bg_seq(self.bg));
        s
    }
}
