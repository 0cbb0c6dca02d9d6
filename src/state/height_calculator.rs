//! Required height of the input bar.
//!
//! Pure arithmetic over the already-clamped text height and the layout
//! constants currently applied. Growth-bound bookkeeping happens in the
//! caller before this runs.

use super::layout::LayoutConstants;
use crate::model::{Insets, Size};

/// Everything the height formula depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightInputs {
    /// Width of the bar's bounds.
    pub bounds_width: u16,
    /// Text height after clamping to the growth bound.
    pub text_height: u16,
    /// Outer content padding.
    pub content_inset: Insets,
    /// Overlay region padding.
    pub top_view_padding: Insets,
    /// Text area padding.
    pub text_view_padding: Insets,
    /// Overlay panel height, 0 while hidden.
    pub overlay_height: u16,
    /// Bottom slot height, 0 while empty.
    pub bottom_height: u16,
}

impl HeightInputs {
    /// Collect inputs from applied layout constants.
    pub fn from_constants(constants: &LayoutConstants, bounds_width: u16, text_height: u16) -> Self {
        Self {
            bounds_width,
            text_height,
            content_inset: constants.content_inset,
            top_view_padding: constants.top_view_padding,
            text_view_padding: constants.text_view_padding,
            overlay_height: constants.overlay_height,
            bottom_height: constants.bottom_height,
        }
    }
}

/// Total padding contributing to the height.
///
/// Outer top and bottom, the overlay region's top, and the text area's top
/// and bottom.
pub fn vertical_padding(inputs: &HeightInputs) -> u16 {
    inputs
        .content_inset
        .vertical()
        .saturating_add(inputs.top_view_padding.top)
        .saturating_add(inputs.text_view_padding.vertical())
}

/// Required size of the whole bar.
pub fn required_size(inputs: &HeightInputs) -> Size {
    let height = inputs
        .text_height
        .saturating_add(vertical_padding(inputs))
        .saturating_add(inputs.overlay_height)
        .saturating_add(inputs.bottom_height);
    Size::new(inputs.bounds_width, height)
}

/// Width left for the text area once insets, paddings and side slots are
/// taken out. Never below one column.
pub fn text_area_width(constants: &LayoutConstants, bounds_width: u16) -> u16 {
    bounds_width
        .saturating_sub(constants.content_inset.horizontal())
        .saturating_sub(constants.text_view_padding.horizontal())
        .saturating_sub(constants.left_width)
        .saturating_sub(constants.right_width)
        .max(1)
}

#[cfg(test)]
#[path = "height_calculator_tests.rs"]
mod tests;
