//! Domain model types (pure).
//!
//! Geometry, slots and items, screen metrics and the error taxonomy.

pub mod error;
pub mod geometry;
pub mod item;
pub mod key_action;
pub mod metrics;

// Re-export for convenience
pub use error::{AppError, InputBarError};
pub use geometry::{Insets, Size};
pub use key_action::KeyAction;
pub use item::{AsItemHooks, Item, ItemHooks, RenderContext, Slot, SwipeDirection, VisualItem};
pub use metrics::{ScreenMetrics, SizeClass, REGULAR_HEIGHT_THRESHOLD};
