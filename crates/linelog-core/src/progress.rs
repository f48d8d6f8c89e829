//! Rune progress indicator printed inline on the open log line.

use crate::logger::SharedLogger;

/// Reports progress of a long-running operation
pub trait Progress {
    fn position(&mut self, pos: i64);
    fn done(&mut self, msg: &str);
}

const COUNTDOWN: &str = "9:.:8:.:7:.:6:.:5:.:4:.:3:.:2:.:1:.:0";

/// Counts down `9:.:8 … 0` on the open line as `position` approaches `max`.
///
/// Only the newly grown part of the bar is printed, so it works on plain
/// streams without cursor movement.
pub struct RuneBar {
    logger: SharedLogger,
    max: i64,
    shown_pos: i64,
    shown: String,
}

impl RuneBar {
    pub fn new(logger: SharedLogger, max: i64) -> Self {
        Self {
            logger,
            max,
            shown_pos: 0,
            shown: String::new(),
        }
    }

    /// Text currently displayed
    pub fn shown(&self) -> &str {
        &self.shown
    }

    fn render(&self, pos: i64) -> String {
        if self.max <= 0 {
            return "...".to_string();
        }
        let total = COUNTDOWN.len() as i64;
        let n = (pos.saturating_mul(total) / self.max).clamp(0, total) as usize;
        let mut bar = String::with_capacity(COUNTDOWN.len() + 2);
        bar.push('[');
        bar.push_str(&COUNTDOWN[..n]);
        if pos >= self.max {
            bar.push(']');
        }
        bar
    }
}

impl Progress for RuneBar {
    fn position(&mut self, pos: i64) {
        if pos == self.shown_pos {
            return;
        }
        self.shown_pos = pos;
        let bar = self.render(pos);
        if let Some(grown) = bar.strip_prefix(self.shown.as_str()) {
            if !grown.is_empty() {
                self.logger.print(grown);
                self.shown = bar;
            }
        }
    }

    fn done(&mut self, msg: &str) {
        if !self.shown.is_empty() && !msg.is_empty() {
            self.logger.print(" ");
        }
        self.logger.print(msg);
    }
}
