//! Widgets for the askgem TUI.
//!
//! - [`InputBar`] - Prompt entry with a waiting title while busy
//! - [`FooterHints`] - Status and key hints
//! - [`TextInputState`] - Editing state behind the input bar

pub mod footer_hints;
pub mod input_bar;
pub mod text_input;

pub use footer_hints::{busy_hints, idle_hints, FooterHints, KeyHint};
pub use input_bar::InputBar;
pub use text_input::TextInputState;
