//! The input bar component.
//!
//! Owns the text area, the three item slots, the overlay selection and the
//! layout orchestrator. Every public setter funnels its constraint change
//! through one batched layout update and ends by invalidating the
//! intrinsic size, which notifies the owner only when the size really
//! changed.

use super::growth_bound::{BoundTransition, GrowthBound};
use super::height_calculator::{required_size, text_area_width, HeightInputs};
use super::layout::{
    LayoutConstants, LayoutOrchestrator, DEFAULT_RIGHT_SLOT_WIDTH, DEFAULT_TEXT_TRAILING_PADDING,
};
use super::overlay::{OverlaySelection, OVERLAY_ROW_HEIGHT};
use super::size_cache::SizeCache;
use super::text_area::{TextArea, TextBuffer};
use crate::model::{
    InputBarError, Insets, Item, ScreenMetrics, Size, Slot, SwipeDirection,
};
use ratatui::style::Style;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Callbacks the owner of an input bar receives. All default to no-ops.
pub trait InputBarDelegate {
    /// The intrinsic size changed.
    fn intrinsic_size_changed(&mut self, _size: Size) {}

    /// The text changed. Receives the text with surrounding whitespace
    /// trimmed.
    fn text_changed(&mut self, _trimmed: &str) {}

    /// Send was pressed. The owner clears the text afterwards.
    fn send_pressed(&mut self, _text: &str) {}

    /// An overlay row was chosen. Receives the row value without its
    /// display prefix.
    fn overlay_row_selected(&mut self, _value: &str) {}
}

/// Discrete events delivered to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBarEvent {
    /// The text area content changed.
    TextChanged,
    /// The text area gained focus.
    FocusGained,
    /// The text area lost focus.
    FocusLost,
    /// The screen rotated or was resized.
    OrientationChanged(ScreenMetrics),
    /// The vertical size class flipped.
    SizeClassChanged(ScreenMetrics),
    /// A horizontal swipe over the bar.
    Swipe(SwipeDirection),
    /// A filtered overlay row was tapped.
    OverlayRowTapped(usize),
}

/// Which of the three inset records to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingKind {
    /// Outer content padding.
    Content,
    /// Padding of the overlay region.
    TopView,
    /// Padding between the text area and its neighbouring slots.
    TextView,
}

/// Construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarOptions {
    /// Fixed growth bound. `None` derives it from the screen metrics.
    pub max_height: Option<u16>,
    /// Recompute the bound from screen metrics. Ignored when `max_height` is set.
    pub auto_update_max_height: bool,
    /// Keep the fixed-height constraint active below the bound.
    pub force_max_height: bool,
    /// Height of one overlay row.
    pub overlay_row_height: u16,
    /// Columns reserved for the left slot.
    pub left_slot_width: u16,
    /// Right slot width, also the width restored when the overlay closes.
    pub right_slot_width: u16,
    /// Skip the background fill.
    pub translucent: bool,
    /// Keep the send enabled state in sync with the text.
    pub manage_send_enabled: bool,
    /// Length of animated transitions.
    pub animation_duration: Duration,
}

impl Default for InputBarOptions {
    fn default() -> Self {
        Self {
            max_height: None,
            auto_update_max_height: true,
            force_max_height: false,
            overlay_row_height: OVERLAY_ROW_HEIGHT,
            left_slot_width: 0,
            right_slot_width: DEFAULT_RIGHT_SLOT_WIDTH,
            translucent: false,
            manage_send_enabled: true,
            animation_duration: super::layout::ANIMATION_DURATION,
        }
    }
}

#[derive(Debug, Default)]
struct SlotItems {
    left: Vec<Item>,
    right: Vec<Item>,
    bottom: Vec<Item>,
}

impl SlotItems {
    fn get(&self, slot: Slot) -> &[Item] {
        match slot {
            Slot::Left => &self.left,
            Slot::Right => &self.right,
            Slot::Bottom => &self.bottom,
            Slot::Top => &[],
        }
    }

    fn get_mut(&mut self, slot: Slot) -> Option<&mut Vec<Item>> {
        match slot {
            Slot::Left => Some(&mut self.left),
            Slot::Right => Some(&mut self.right),
            Slot::Bottom => Some(&mut self.bottom),
            Slot::Top => None,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.left
            .iter_mut()
            .chain(self.right.iter_mut())
            .chain(self.bottom.iter_mut())
    }
}

/// Auto-resizing input bar.
pub struct InputBar<T: TextArea = TextBuffer> {
    text_area: T,
    slots: SlotItems,
    layout: LayoutOrchestrator,
    growth: GrowthBound,
    overlay: OverlaySelection,
    size_cache: SizeCache,
    delegate: Option<Weak<RefCell<dyn InputBarDelegate>>>,
    bounds_width: u16,
    default_right_width: u16,
    font: Option<Style>,
    translucent: bool,
    manage_send_enabled: bool,
    send_enabled: bool,
    focused: bool,
}

impl InputBar<TextBuffer> {
    /// Bar with an empty [`TextBuffer`] and default options.
    pub fn with_metrics(metrics: ScreenMetrics) -> Self {
        Self::new(TextBuffer::new(), metrics, &InputBarOptions::default())
    }
}

impl<T: TextArea> InputBar<T> {
    /// Create a bar as wide as the screen.
    pub fn new(text_area: T, metrics: ScreenMetrics, options: &InputBarOptions) -> Self {
        let mut growth = match options.max_height {
            Some(max_height) => GrowthBound::with_max_height(max_height),
            None => GrowthBound::new(&metrics),
        };
        // A fixed bound stays fixed across metric changes
        growth.set_auto_update_max_height(
            options.auto_update_max_height && options.max_height.is_none(),
        );
        growth.set_force_max(options.force_max_height);

        let mut constants = LayoutConstants::initial(growth.max_height());
        constants.left_width = options.left_slot_width;
        constants.right_width = options.right_slot_width;
        let mut layout = LayoutOrchestrator::new(constants);
        layout.set_animation_duration(options.animation_duration);
        layout.set_fixed_height_active(growth.fixed_height_active());

        let mut bar = Self {
            text_area,
            slots: SlotItems::default(),
            layout,
            growth,
            overlay: OverlaySelection::new(options.overlay_row_height),
            size_cache: SizeCache::new(),
            delegate: None,
            bounds_width: metrics.width,
            default_right_width: options.right_slot_width,
            font: None,
            translucent: options.translucent,
            manage_send_enabled: options.manage_send_enabled,
            send_enabled: false,
            focused: false,
        };
        bar.invalidate_intrinsic_size();
        bar
    }

    /// Register the owner. Only a weak reference is kept.
    pub fn set_delegate<D: InputBarDelegate + 'static>(&mut self, delegate: &Rc<RefCell<D>>) {
        let delegate: Rc<RefCell<dyn InputBarDelegate>> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    /// Run `callback` against the delegate. Returns whether it ran.
    fn notify(&self, callback: impl FnOnce(&mut dyn InputBarDelegate)) -> bool {
        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        let ran = match delegate.try_borrow_mut() {
            Ok(mut delegate) => {
                callback(&mut *delegate);
                true
            }
            Err(_) => {
                warn!("Input bar delegate is already borrowed, dropping callback");
                false
            }
        };
        ran
    }

    // ===== Accessors =====

    /// The text collaborator.
    pub fn text_area(&self) -> &T {
        &self.text_area
    }

    /// Mutable access for changes that leave the text alone, such as
    /// cursor movement. Text edits go through [`Self::edit_text`].
    pub fn text_area_mut(&mut self) -> &mut T {
        &mut self.text_area
    }

    /// Mutate the text area and deliver the text-change event afterwards.
    pub fn edit_text<R>(&mut self, edit: impl FnOnce(&mut T) -> R) -> R {
        let result = edit(&mut self.text_area);
        self.text_did_change();
        result
    }

    /// The layout orchestrator.
    pub fn layout(&self) -> &LayoutOrchestrator {
        &self.layout
    }

    /// Current layout constants.
    pub fn constants(&self) -> &LayoutConstants {
        self.layout.constants()
    }

    /// Overlay selection state.
    pub fn overlay(&self) -> &OverlaySelection {
        &self.overlay
    }

    /// Items of `slot`; always empty for the top slot.
    pub fn slot_items(&self, slot: Slot) -> &[Item] {
        self.slots.get(slot)
    }

    /// Last computed size.
    pub fn intrinsic_size(&self) -> Size {
        self.size_cache.current()
    }

    /// Width the size is computed for.
    pub fn bounds_width(&self) -> u16 {
        self.bounds_width
    }

    /// Whether the text reached the growth bound at the last calculation.
    pub fn is_over_max_height(&self) -> bool {
        self.growth.is_over_max_height()
    }

    /// Current growth bound in rows.
    pub fn max_height(&self) -> u16 {
        self.growth.max_height()
    }

    /// Whether the text area stays pinned to the bound.
    pub fn force_max_height(&self) -> bool {
        self.growth.force_max()
    }

    /// Whether metric events recompute the bound.
    pub fn auto_update_max_height(&self) -> bool {
        self.growth.auto_update_max_height()
    }

    /// Whether send is currently allowed.
    pub fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    /// Whether the text area has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Text style, falling back to the default style when none was set.
    pub fn font(&self) -> Style {
        self.font.unwrap_or_default()
    }

    /// Whether the background is left unpainted.
    pub fn is_translucent(&self) -> bool {
        self.translucent
    }

    // ===== Size calculation =====

    /// Compute the required size from the current state.
    ///
    /// Crossing the growth bound toggles the fixed-height constraint and
    /// the text area's scrolling. Nothing else is mutated.
    pub fn calculate_size(&mut self) -> Size {
        self.sync_bottom_height();
        let constants = *self.layout.constants();
        let width = text_area_width(&constants, self.bounds_width);
        let natural = self.text_area.natural_height(width);

        match self.growth.observe(natural) {
            BoundTransition::EnteredOverMax => {
                debug!(natural, max = self.growth.max_height(), "Text area reached growth bound");
                self.layout.set_fixed_height_active(true);
                self.text_area.set_scroll_enabled(true);
                self.layout.request_layout_pass();
            }
            BoundTransition::LeftOverMax => {
                debug!(natural, max = self.growth.max_height(), "Text area back under growth bound");
                self.layout.set_fixed_height_active(self.growth.force_max());
                self.text_area.set_scroll_enabled(false);
                self.text_area.invalidate_natural_size();
            }
            BoundTransition::Unchanged => {}
        }

        let text_height = self.growth.clamp(natural);
        required_size(&HeightInputs::from_constants(
            &constants,
            self.bounds_width,
            text_height,
        ))
    }

    /// Recalculate the size and tell the owner if it changed.
    ///
    /// A size only counts as reported once a delegate received it, so an
    /// owner registered after construction still learns the initial size.
    pub fn invalidate_intrinsic_size(&mut self) {
        let size = self.calculate_size();
        if let Some(size) = self.size_cache.store(size) {
            debug!(width = size.width, height = size.height, "Intrinsic size changed");
            if self.notify(|delegate| delegate.intrinsic_size_changed(size)) {
                self.size_cache.mark_notified(size);
            }
        }
    }

    /// Follow a change of the available width.
    pub fn set_bounds_width(&mut self, width: u16) {
        if self.bounds_width == width {
            return;
        }
        self.bounds_width = width;
        self.invalidate_intrinsic_size();
    }

    // ===== Slots =====

    /// Replace the items of `slot`. Previous items are dropped.
    ///
    /// The top slot belongs to the overlay and ignores items.
    pub fn set_slot_items(&mut self, mut items: Vec<Item>, slot: Slot, animated: bool) {
        let Some(current) = self.slots.get_mut(slot) else {
            warn!(%slot, "Slot does not hold items, ignoring {} items", items.len());
            return;
        };
        for item in &mut items {
            item.hooks_mut().did_move_to(slot);
        }
        let previous = std::mem::replace(current, items);
        debug!(%slot, dropped = previous.len(), added = current.len(), "Slot items replaced");
        drop(previous);

        let bottom_height = self.bottom_items_height();
        self.layout
            .perform_batched_update(animated, |c| c.bottom_height = bottom_height);
        self.invalidate_intrinsic_size();
    }

    fn bottom_items_height(&self) -> u16 {
        self.slots
            .bottom
            .iter()
            .map(|item| item.intrinsic_size().height)
            .max()
            .unwrap_or(0)
    }

    /// Bottom items may change size on their own, e.g. from a text hook.
    fn sync_bottom_height(&mut self) {
        let bottom_height = self.bottom_items_height();
        if self.layout.constants().bottom_height != bottom_height {
            debug!(bottom_height, "Bottom slot height changed");
            self.layout
                .perform_batched_update(false, |c| c.bottom_height = bottom_height);
        }
    }

    /// Reserve `width` columns for a side slot.
    ///
    /// Only the left and right slots have a configurable width.
    pub fn set_slot_width(&mut self, slot: Slot, width: u16, animated: bool) {
        match slot {
            Slot::Left => self
                .layout
                .perform_batched_update(animated, |c| c.left_width = width),
            Slot::Right => self
                .layout
                .perform_batched_update(animated, |c| c.right_width = width),
            Slot::Bottom | Slot::Top => {
                warn!(%slot, width, "Slot has no configurable width, ignoring");
                return;
            }
        }
        self.invalidate_intrinsic_size();
    }

    // ===== Growth bound =====

    /// Override the growth bound.
    pub fn set_max_height(&mut self, max_height: u16) {
        self.growth.set_max_height(max_height);
        self.layout
            .perform_batched_update(false, |c| c.max_text_height = max_height);
        self.invalidate_intrinsic_size();
    }

    /// Enable or disable recomputing the bound on orientation and size-class events.
    pub fn set_auto_update_max_height(&mut self, enabled: bool) {
        self.growth.set_auto_update_max_height(enabled);
    }

    /// Keep the text area pinned to the growth bound even below it.
    pub fn set_force_max_height(&mut self, force: bool, animated: bool) {
        self.growth.set_force_max(force);
        self.layout
            .set_fixed_height_active(self.growth.fixed_height_active());
        self.layout.perform_batched_update(animated, |_| {});
        self.invalidate_intrinsic_size();
    }

    fn metrics_did_change(&mut self, metrics: &ScreenMetrics) {
        if !self.growth.apply_metrics(metrics) {
            return;
        }
        let max_height = self.growth.max_height();
        self.layout
            .perform_batched_update(false, |c| c.max_text_height = max_height);
        self.invalidate_intrinsic_size();
    }

    // ===== Padding =====

    /// Replace one of the three inset records.
    pub fn set_padding(&mut self, kind: PaddingKind, insets: Insets, animated: bool) {
        self.layout.perform_batched_update(animated, |c| match kind {
            PaddingKind::Content => c.content_inset = insets,
            PaddingKind::TopView => c.top_view_padding = insets,
            PaddingKind::TextView => c.text_view_padding = insets,
        });
        self.invalidate_intrinsic_size();
    }

    /// Replace the outer content padding.
    pub fn set_content_inset(&mut self, insets: Insets, animated: bool) {
        self.set_padding(PaddingKind::Content, insets, animated);
    }

    /// Replace the overlay region padding.
    pub fn set_top_view_padding(&mut self, insets: Insets, animated: bool) {
        self.set_padding(PaddingKind::TopView, insets, animated);
    }

    /// Replace the padding between the text area and the side slots.
    pub fn set_text_view_padding(&mut self, insets: Insets, animated: bool) {
        self.set_padding(PaddingKind::TextView, insets, animated);
    }

    // ===== Appearance =====

    /// Set the text style.
    pub fn set_font(&mut self, font: Style) {
        self.font = Some(font);
        self.text_area.invalidate_natural_size();
        self.invalidate_intrinsic_size();
    }

    /// Leave the background unpainted.
    pub fn set_translucent(&mut self, translucent: bool) {
        self.translucent = translucent;
    }

    // ===== Overlay =====

    /// Open the overlay with `candidates`.
    ///
    /// The right slot collapses and the text area loses its trailing
    /// padding while the overlay is open. An empty candidate list closes
    /// the overlay instead.
    pub fn show_overlay(&mut self, candidates: Vec<String>) {
        let constants = self.layout.constants();
        let row_width = self
            .bounds_width
            .saturating_sub(constants.content_inset.horizontal())
            .saturating_sub(constants.top_view_padding.horizontal());

        if !self.overlay.show(candidates, row_width) {
            self.hide_overlay();
            return;
        }
        let panel_height = self.overlay.panel_height();
        self.layout.perform_batched_update(true, |c| {
            c.right_width = 0;
            c.text_view_padding.right = 0;
            c.overlay_height = panel_height;
        });
        self.invalidate_intrinsic_size();
    }

    /// Close the overlay and restore the right slot and trailing padding
    /// to their defaults.
    pub fn hide_overlay(&mut self) {
        self.overlay.hide();
        let right_width = self.default_right_width;
        self.layout.perform_batched_update(true, |c| {
            c.right_width = right_width;
            c.text_view_padding.right = DEFAULT_TEXT_TRAILING_PADDING;
            c.overlay_height = 0;
        });
        debug!("Overlay closed");
        self.invalidate_intrinsic_size();
    }

    /// Filter the open overlay by `keyword`. Ignored while it is closed.
    pub fn update_keyword(&mut self, keyword: &str) -> bool {
        if !self.overlay.update_keyword(keyword) {
            return false;
        }
        let panel_height = self.overlay.panel_height();
        self.layout
            .perform_batched_update(false, |c| c.overlay_height = panel_height);
        self.invalidate_intrinsic_size();
        true
    }

    /// Deliver the filtered row at `index` to the owner and close the
    /// overlay.
    pub fn select_overlay_row(&mut self, index: usize) -> Result<String, InputBarError> {
        let value = self.overlay.value_at(index)?;
        info!(index, value = %value, "Overlay row selected");
        self.notify(|delegate| delegate.overlay_row_selected(&value));
        self.hide_overlay();
        Ok(value)
    }

    /// Move the overlay highlight by `delta` rows, clamped to the filtered list.
    pub fn move_overlay_highlight(&mut self, delta: isize) {
        self.overlay.move_highlight(delta);
    }

    /// Select the highlighted row. `None` when there is nothing to pick.
    pub fn select_highlighted_row(&mut self) -> Result<Option<String>, InputBarError> {
        if !self.overlay.is_searching() || self.overlay.filtered().is_empty() {
            return Ok(None);
        }
        self.select_overlay_row(self.overlay.highlighted()).map(Some)
    }

    // ===== Events =====

    /// Route one external event.
    pub fn handle_event(&mut self, event: InputBarEvent) -> Result<(), InputBarError> {
        match event {
            InputBarEvent::TextChanged => self.text_did_change(),
            InputBarEvent::FocusGained => {
                self.focused = true;
                self.slots.iter_mut().for_each(|i| i.hooks_mut().on_focus_gained());
            }
            InputBarEvent::FocusLost => {
                self.focused = false;
                self.slots.iter_mut().for_each(|i| i.hooks_mut().on_focus_lost());
            }
            InputBarEvent::OrientationChanged(metrics) | InputBarEvent::SizeClassChanged(metrics) => {
                self.metrics_did_change(&metrics)
            }
            InputBarEvent::Swipe(direction) => {
                self.slots
                    .iter_mut()
                    .for_each(|i| i.hooks_mut().on_swipe(direction));
            }
            InputBarEvent::OverlayRowTapped(index) => {
                self.select_overlay_row(index)?;
            }
        }
        Ok(())
    }

    fn text_did_change(&mut self) {
        let text = self.text_area.text().to_string();
        let trimmed = text.trim();

        if self.manage_send_enabled {
            self.send_enabled =
                !trimmed.is_empty() || self.text_area.image_attachment_count() > 0;
        }
        self.slots
            .iter_mut()
            .for_each(|i| i.hooks_mut().on_text_changed(&text));
        self.notify(|delegate| delegate.text_changed(trimmed));

        if self.overlay.is_searching() {
            self.update_keyword(overlay_keyword(&text));
        }
        self.invalidate_intrinsic_size();
    }

    /// Fire the send callback with the current text.
    ///
    /// Returns whether the callback fired. The owner is responsible for
    /// clearing the text afterwards.
    pub fn send(&mut self) -> bool {
        if !self.send_enabled {
            return false;
        }
        let text = self.text_area.text().to_string();
        info!(len = text.len(), "Send pressed");
        self.notify(|delegate| delegate.send_pressed(&text));
        true
    }

    /// Set whether send is enabled. Only sticks while the bar does not
    /// manage the flag itself.
    pub fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }
}

/// Keyword the overlay filters by: the trailing whitespace-separated
/// token of `text`, without leading trigger punctuation.
pub fn overlay_keyword(text: &str) -> &str {
    text.rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
}

#[cfg(test)]
#[path = "input_bar_tests.rs"]
mod tests;
