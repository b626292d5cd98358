//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Speakers
    pub user: Color,
    pub assistant: Color,

    // Semantic
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)

            user: Color::Rgb(148, 226, 213),      // #94e2d5 (teal)
            assistant: Color::Rgb(137, 180, 250), // #89b4fa (blue)

            error: Color::Rgb(243, 139, 168), // #f38ba8 (red)

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// High contrast theme, used when `NO_COLOR` is set.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,

            text: Color::White,
            subtext: Color::Gray,
            muted: Color::DarkGray,

            primary: Color::Cyan,

            user: Color::White,
            assistant: Color::White,

            error: Color::Red,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Pick a theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::high_contrast()
        } else {
            Self::mocha()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocha_theme_creates() {
        let theme = Theme::mocha();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_high_contrast_theme_creates() {
        let theme = Theme::high_contrast();
        assert!(matches!(theme.text, Color::White));
    }

    #[test]
    fn test_default_is_mocha() {
        assert!(matches!(Theme::default().base, Color::Rgb(30, 30, 46)));
    }
}
