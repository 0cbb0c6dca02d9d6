//! Input bar styling configuration.
//!
//! Colors for the bar background, overlay rows and the send button.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting, ignoring the environment.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== BarStyles =====

/// Styles for every region of the input bar.
///
/// With colors disabled only modifiers remain, so the highlighted overlay
/// row and the cursor stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyles {
    /// Bar background.
    pub background: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// Cursor cell.
    pub cursor: Style,
    /// Overlay row.
    pub overlay_row: Style,
    /// Highlighted overlay row.
    pub overlay_highlight: Style,
    /// Overlay separator line.
    pub separator: Style,
    /// Send button while enabled.
    pub send_enabled: Style,
    /// Send button while disabled.
    pub send_disabled: Style,
    /// Status line.
    pub status: Style,
}

impl BarStyles {
    /// Create BarStyles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                background: Style::default().bg(Color::Rgb(30, 30, 36)),
                placeholder: Style::default().fg(Color::DarkGray),
                cursor: reversed,
                overlay_row: Style::default().fg(Color::Gray),
                overlay_highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                separator: Style::default().fg(Color::DarkGray),
                send_enabled: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                send_disabled: Style::default().fg(Color::DarkGray),
                status: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                background: Style::default(),
                placeholder: Style::default().add_modifier(Modifier::DIM),
                cursor: reversed,
                overlay_row: Style::default(),
                overlay_highlight: reversed,
                separator: Style::default(),
                send_enabled: Style::default().add_modifier(Modifier::BOLD),
                send_disabled: Style::default().add_modifier(Modifier::DIM),
                status: Style::default(),
            }
        }
    }
}

impl Default for BarStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}
