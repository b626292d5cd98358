//! Theme components for the TUI.
//!
//! - [`Theme`] - Color palette (Catppuccin Mocha / high contrast)
//! - [`SPINNER`] - Frames for the typing indicator

mod colors;

pub use colors::Theme;

/// Spinner frames, advanced once per tick.
pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Spinner frame for a tick count.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
