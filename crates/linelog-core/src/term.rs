//! Terminal capability probing for automatic color selection.

use crossterm::tty::IsTty;

use crate::config::OutputTarget;

/// Whether ANSI color sequences written to `target` will be rendered.
///
/// The stream has to be a terminal. On Windows the console is additionally
/// switched into virtual terminal mode, which fails on legacy consoles.
pub fn supports_color(target: OutputTarget) -> bool {
    let is_tty = match target {
        OutputTarget::Stdout => std::io::stdout().is_tty(),
        OutputTarget::Stderr => std::io::stderr().is_tty(),
    };
    is_tty && enable_virtual_terminal()
}

/// Switches the console into virtual terminal mode for the rest of the
/// process; the previous mode is not restored on [`crate::global::close`].
#[cfg(windows)]
fn enable_virtual_terminal() -> bool {
    crossterm::ansi_support::supports_ansi()
}

#[cfg(not(windows))]
fn enable_virtual_terminal() -> bool {
    true
}
