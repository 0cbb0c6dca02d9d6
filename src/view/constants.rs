//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for the numeric values and fixed strings the demo
//! screen uses around the input bar.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line below the input bar for keyboard hints and bound state.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Minimum rows kept for the chat transcript above the bar.
pub const TRANSCRIPT_MIN_HEIGHT: u16 = 1;

/// Poll timeout while nothing is animating.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Poll timeout while a layout transition is in flight (about 60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Shown in the overlay panel when no candidate matches the keyword.
pub const OVERLAY_PLACEHOLDER: &str = "No results";

/// Shown in the text area while it is empty.
pub const TEXT_PLACEHOLDER: &str = "Message";

/// Drawn across the overlay's top padding row.
pub const OVERLAY_SEPARATOR: &str = "─";
