//! Input bar state machine (pure).
//!
//! Sizing, growth bound, overlay filtering and constraint batching are all
//! testable without a terminal.

pub mod growth_bound;
pub mod height_calculator;
pub mod input_bar;
pub mod layout;
pub mod overlay;
pub mod size_cache;
pub mod text_area;

// Re-export for convenience
pub use growth_bound::{BoundTransition, GrowthBound};
pub use height_calculator::{required_size, text_area_width, HeightInputs};
pub use input_bar::{
    overlay_keyword, InputBar, InputBarDelegate, InputBarEvent, InputBarOptions, PaddingKind,
};
pub use layout::{
    ConstraintGroup, LayoutConstants, LayoutOrchestrator, ResolvedLayout, ANIMATION_DURATION,
    DEFAULT_RIGHT_SLOT_WIDTH, DEFAULT_TEXT_TRAILING_PADDING,
};
pub use overlay::{
    filter_candidates, strip_display_prefix, OverlaySelection, MAX_VISIBLE_ROWS,
    OVERLAY_ROW_HEIGHT, OVERLAY_TOP_PADDING,
};
pub use size_cache::SizeCache;
pub use text_area::{wrap_text, TextArea, TextBuffer, WrappedText};
