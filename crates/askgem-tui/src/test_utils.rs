//! Test utilities for askgem-tui render tests.
//!
//! Helpers for creating test terminals and apps, and for converting
//! buffers to strings so assertions can look for text.

use askgem_engine::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use crate::app::App;
use crate::theme::Theme;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with timestamps disabled so output is stable.
pub fn create_test_app() -> App {
    let config = Config {
        timestamps: false,
        ..Config::default()
    };
    App::new(&config, Theme::default())
}

/// Convert a buffer to a string, one line per row.
///
/// Trailing whitespace is trimmed from each row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_screen_render() {
        let mut terminal = create_test_terminal();
        let mut app = create_test_app();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let out = buffer_to_string(terminal.backend().buffer());
        assert!(out.contains("Conversation"));
        assert!(out.contains("Type your question"));
        assert!(out.contains("Ready"));
    }

    #[test]
    fn test_buffer_to_string_trims_rows() {
        let mut terminal = create_test_terminal_sized(10, 2);
        terminal.draw(|_| {}).unwrap();
        assert_eq!(buffer_to_string(terminal.backend().buffer()), "\n");
    }
}
