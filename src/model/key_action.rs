//! Domain-level keyboard actions independent of key bindings.

/// Actions the demo binds to keys.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Keys without a binding are typed into the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Text editing
    /// Fire the send callback. Default: Enter
    Send,
    /// Insert a line break. Default: Alt+Enter / Ctrl+j
    Newline,
    /// Delete before the cursor. Default: Backspace
    DeleteBackward,
    /// Delete under the cursor. Default: Delete
    DeleteForward,
    /// Default: ←
    CursorLeft,
    /// Default: →
    CursorRight,
    /// Default: Home
    CursorHome,
    /// Default: End
    CursorEnd,
    /// Attach a placeholder image. Default: Ctrl+a
    AttachImage,

    // Overlay
    /// Move the overlay highlight up. Default: ↑
    OverlayUp,
    /// Move the overlay highlight down. Default: ↓
    OverlayDown,
    /// Deliver the highlighted overlay row. Default: Tab
    OverlaySelect,
    /// Close the overlay. Default: Esc
    OverlayDismiss,

    // Gestures
    /// Default: Alt+←
    SwipeLeft,
    /// Default: Alt+→
    SwipeRight,

    // Focus
    /// Toggle focus of the input bar. Default: Ctrl+f
    ToggleFocus,
    /// Toggle translucent background. Default: Ctrl+t
    ToggleTranslucent,
    /// Toggle the forced growth bound. Default: Ctrl+x
    ToggleForceMax,

    // Application controls
    /// Quit the demo. Default: Ctrl+c
    Quit,
}
