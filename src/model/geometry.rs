//! Cell-based geometry primitives.
//!
//! All measurements are terminal cells: widths in columns, heights in rows.

/// A width/height pair in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Four-sided inset record.
///
/// Used for the outer content padding, the overlay region padding and the
/// padding between the text area and its neighbouring slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    /// Rows above.
    pub top: u16,
    /// Columns to the left.
    pub left: u16,
    /// Rows below.
    pub bottom: u16,
    /// Columns to the right.
    pub right: u16,
}

impl Insets {
    /// No inset on any side.
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    /// Create insets in `top, left, bottom, right` order.
    pub const fn new(top: u16, left: u16, bottom: u16, right: u16) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of top and bottom.
    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Sum of left and right.
    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Copy with the right inset replaced.
    pub const fn with_right(self, right: u16) -> Self {
        Self { right, ..self }
    }
}

/// Linear interpolation between two cell counts, `t` in `[0, 1]`.
pub(crate) fn lerp_cells(from: u16, to: u16, t: f32) -> u16 {
    let t = t.clamp(0.0, 1.0);
    let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
    value.round() as u16
}
