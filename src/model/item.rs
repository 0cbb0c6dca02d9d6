//! Slots and the items they hold.

use super::geometry::Size;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::fmt;

/// A designated region of the input bar.
///
/// `Left`, `Right` and `Bottom` hold ordered item sequences. `Top` is
/// reserved for the overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Left of the text area.
    Left,
    /// Right of the text area, home of the send button.
    Right,
    /// Below the text area.
    Bottom,
    /// Above the text area, reserved for the overlay.
    Top,
}

impl Slot {
    /// Whether this slot accepts arbitrary items.
    pub const fn holds_items(self) -> bool {
        !matches!(self, Slot::Top)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Left => "left",
            Slot::Right => "right",
            Slot::Bottom => "bottom",
            Slot::Top => "top",
        };
        f.write_str(name)
    }
}

/// Direction of a horizontal swipe over the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

/// Reactions every item may have. All hooks default to no-ops.
pub trait ItemHooks {
    /// The text area content changed.
    fn on_text_changed(&mut self, _text: &str) {}

    /// The text area gained focus.
    fn on_focus_gained(&mut self) {}

    /// The text area lost focus.
    fn on_focus_lost(&mut self) {}

    /// A swipe gesture was delivered to the bar.
    fn on_swipe(&mut self, _direction: SwipeDirection) {}

    /// Ownership of the item moved into `slot`.
    fn did_move_to(&mut self, _slot: Slot) {}
}

/// Read-only facts the renderer hands to visual items.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Whether send is currently allowed.
    pub send_enabled: bool,
    /// Whether the text area has focus.
    pub focused: bool,
    /// Text style of the bar.
    pub style: Style,
}

/// View of any sized hooks implementor as a `dyn ItemHooks`.
///
/// Implemented for every [`ItemHooks`] type, so visual items never write
/// it by hand.
pub trait AsItemHooks {
    /// The item as a hooks object.
    fn as_item_hooks_mut(&mut self) -> &mut dyn ItemHooks;
}

impl<T: ItemHooks> AsItemHooks for T {
    fn as_item_hooks_mut(&mut self) -> &mut dyn ItemHooks {
        self
    }
}

/// An item with a render handle.
pub trait VisualItem: ItemHooks + AsItemHooks {
    /// Size the item would like to occupy.
    fn intrinsic_size(&self) -> Size;

    /// Draw the item into `area`.
    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext);
}

/// An item placed into a slot.
///
/// The variant tag says whether the item draws anything; no runtime type
/// inspection is needed to tell the two apart.
pub enum Item {
    /// Has a render handle and takes part in slot layout.
    Visual(Box<dyn VisualItem>),
    /// Hooks only, never rendered.
    Logic(Box<dyn ItemHooks>),
}

impl Item {
    /// Wrap a visual item.
    pub fn visual(item: impl VisualItem + 'static) -> Self {
        Item::Visual(Box::new(item))
    }

    /// Wrap a hooks-only item.
    pub fn logic(item: impl ItemHooks + 'static) -> Self {
        Item::Logic(Box::new(item))
    }

    /// Render handle, if any.
    pub fn as_visual(&self) -> Option<&dyn VisualItem> {
        match self {
            Item::Visual(item) => Some(item.as_ref()),
            Item::Logic(_) => None,
        }
    }

    /// Intrinsic size, zero for logic items.
    pub fn intrinsic_size(&self) -> Size {
        self.as_visual()
            .map(VisualItem::intrinsic_size)
            .unwrap_or(Size::ZERO)
    }

    /// Hooks of either variant.
    pub fn hooks_mut(&mut self) -> &mut dyn ItemHooks {
        match self {
            Item::Visual(item) => item.as_item_hooks_mut(),
            Item::Logic(item) => item.as_mut(),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Visual(item) => f
                .debug_tuple("Visual")
                .field(&item.intrinsic_size())
                .finish(),
            Item::Logic(_) => f.write_str("Logic"),
        }
    }
}
