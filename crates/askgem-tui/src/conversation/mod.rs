//! Conversation pane module.
//!
//! The conversation pane fills the screen above the input bar:
//! - [`ConversationPane`] renders messages and the typing indicator
//! - [`ConversationView`] holds scroll position and follows new messages

mod view;
mod widget;

pub use view::ConversationView;
pub use widget::{build_lines, ConversationPane, EMPTY_HINT, TYPING_LABEL};
