//! Text wrapping utilities.

use unicode_width::UnicodeWidthStr;

/// Wrap text to the specified width, keeping explicit line breaks.
///
/// Blank lines in the input are preserved as empty lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, width)
                .into_iter()
                .map(std::borrow::Cow::into_owned),
        );
    }
    lines
}

/// Number of terminal columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
