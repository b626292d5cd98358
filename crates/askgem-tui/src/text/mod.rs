//! Text layout helpers.
//!
//! - [`wrap_text`] - Wrap a message body to a column width
//! - [`display_width`] - Terminal column width of a string

mod wrap;

pub use wrap::{display_width, wrap_text};
