//! Screen metrics as seen by the input bar.

/// Rows a terminal needs before it counts as a regular vertical size class.
pub const REGULAR_HEIGHT_THRESHOLD: u16 = 24;

/// Vertical size class of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeClass {
    /// Tall enough for a one-third growth bound.
    #[default]
    Regular,
    /// Short screen, one-fifth growth bound.
    Compact,
}

/// Current screen dimensions plus their vertical size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
    /// Derived from `height`.
    pub vertical_size_class: SizeClass,
}

impl ScreenMetrics {
    /// Metrics for a terminal of `width` x `height` cells.
    ///
    /// The size class is derived from the row count.
    pub fn from_terminal(width: u16, height: u16) -> Self {
        let vertical_size_class = if height >= REGULAR_HEIGHT_THRESHOLD {
            SizeClass::Regular
        } else {
            SizeClass::Compact
        };
        Self {
            width,
            height,
            vertical_size_class,
        }
    }

    /// Text area growth bound for these metrics.
    ///
    /// One third of the screen height for a regular size class, one fifth
    /// for compact. Integer division rounds down.
    pub fn max_text_height(&self) -> u16 {
        match self.vertical_size_class {
            SizeClass::Regular => self.height / 3,
            SizeClass::Compact => self.height / 5,
        }
    }
}
