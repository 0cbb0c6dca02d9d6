//! Layout orchestration.
//!
//! Every constraint change the input bar makes goes through
//! [`LayoutOrchestrator::perform_batched_update`]: constraint groups are
//! deactivated, the mutation runs against a working copy of the
//! constants, and the groups are reactivated with the new constants in
//! one step. Readers only ever see the constants of the last completed
//! batch.
//!
//! Animated batches do not delay state. The applied constants change
//! immediately; only [`LayoutOrchestrator::presented`] interpolates from
//! the previously presented constants for the transition duration.

use crate::model::geometry::lerp_cells;
use crate::model::Insets;
use ratatui::layout::{Constraint, Layout, Rect};
use std::time::{Duration, Instant};
use tracing::trace;

/// Length of an animated transition.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(150);

/// Reserved width of the right slot while the overlay is closed.
pub const DEFAULT_RIGHT_SLOT_WIDTH: u16 = 8;

/// Trailing padding of the text area while the overlay is closed.
pub const DEFAULT_TEXT_TRAILING_PADDING: u16 = 1;

/// Positioning constants owned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConstants {
    /// Outer content padding.
    pub content_inset: Insets,
    /// Padding around the overlay region.
    pub top_view_padding: Insets,
    /// Padding between the text area and its neighbours.
    pub text_view_padding: Insets,
    /// Left slot width.
    pub left_width: u16,
    /// Right slot width.
    pub right_width: u16,
    /// Overlay panel height including its own top padding.
    pub overlay_height: u16,
    /// Height of the bottom slot.
    pub bottom_height: u16,
    /// Constant of the fixed-height text constraint.
    pub max_text_height: u16,
}

impl LayoutConstants {
    /// Constants the bar starts with.
    pub fn initial(max_text_height: u16) -> Self {
        Self {
            content_inset: Insets::new(0, 1, 0, 1),
            top_view_padding: Insets::ZERO,
            text_view_padding: Insets::new(0, 0, 0, DEFAULT_TEXT_TRAILING_PADDING),
            left_width: 0,
            right_width: DEFAULT_RIGHT_SLOT_WIDTH,
            overlay_height: 0,
            bottom_height: 0,
            max_text_height,
        }
    }

    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let insets = |a: Insets, b: Insets| Insets {
            top: lerp_cells(a.top, b.top, t),
            left: lerp_cells(a.left, b.left, t),
            bottom: lerp_cells(a.bottom, b.bottom, t),
            right: lerp_cells(a.right, b.right, t),
        };
        Self {
            content_inset: insets(from.content_inset, to.content_inset),
            top_view_padding: insets(from.top_view_padding, to.top_view_padding),
            text_view_padding: insets(from.text_view_padding, to.text_view_padding),
            left_width: lerp_cells(from.left_width, to.left_width, t),
            right_width: lerp_cells(from.right_width, to.right_width, t),
            overlay_height: lerp_cells(from.overlay_height, to.overlay_height, t),
            bottom_height: lerp_cells(from.bottom_height, to.bottom_height, t),
            max_text_height: lerp_cells(from.max_text_height, to.max_text_height, t),
        }
    }
}

/// Named groups of positioning constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintGroup {
    /// Outer content insets.
    Content,
    /// Overlay panel placement and height.
    Overlay,
    /// Text area placement.
    TextArea,
    /// Side and bottom slot widths.
    Slots,
    /// Fixed text height, active while over the bound or forced.
    FixedHeight,
}

impl ConstraintGroup {
    /// Every group, in activation order.
    pub const ALL: [ConstraintGroup; 5] = [
        ConstraintGroup::Content,
        ConstraintGroup::Overlay,
        ConstraintGroup::TextArea,
        ConstraintGroup::Slots,
        ConstraintGroup::FixedHeight,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: LayoutConstants,
    started: Instant,
    duration: Duration,
}

/// Concrete rectangles for every region of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedLayout {
    /// Overlay panel.
    pub overlay: Rect,
    /// Left slot.
    pub left: Rect,
    /// Text area.
    pub text: Rect,
    /// Right slot.
    pub right: Rect,
    /// Bottom slot.
    pub bottom: Rect,
}

/// Owns the layout constants and applies them atomically.
#[derive(Debug, Clone)]
pub struct LayoutOrchestrator {
    applied: LayoutConstants,
    active: [bool; 5],
    fixed_height_active: bool,
    transition: Option<Transition>,
    animation_duration: Duration,
    commits: u64,
    layout_passes: u64,
}

impl LayoutOrchestrator {
    /// Orchestrator with all groups active except the fixed-height one.
    pub fn new(constants: LayoutConstants) -> Self {
        let mut orchestrator = Self {
            applied: constants,
            active: [false; 5],
            fixed_height_active: false,
            transition: None,
            animation_duration: ANIMATION_DURATION,
            commits: 0,
            layout_passes: 0,
        };
        orchestrator.reactivate_all();
        orchestrator
    }

    /// Override the transition duration used by animated batches.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Constants of the last completed batch.
    pub fn constants(&self) -> &LayoutConstants {
        &self.applied
    }

    /// Whether `group` is currently active.
    pub fn is_active(&self, group: ConstraintGroup) -> bool {
        self.active[group.index()]
    }

    /// Number of completed batches.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Number of forced layout passes requested outside batches.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Run `mutation` as one atomic constraint update.
    ///
    /// The mutation only sees the constants, never the orchestrator, so it
    /// cannot start a nested batch.
    pub fn perform_batched_update<R>(
        &mut self,
        animated: bool,
        mutation: impl FnOnce(&mut LayoutConstants) -> R,
    ) -> R {
        self.perform_batched_update_at(Instant::now(), animated, mutation)
    }

    pub(crate) fn perform_batched_update_at<R>(
        &mut self,
        now: Instant,
        animated: bool,
        mutation: impl FnOnce(&mut LayoutConstants) -> R,
    ) -> R {
        let from = self.presented_at(now);
        self.deactivate_all();

        let mut working = self.applied;
        let result = mutation(&mut working);
        self.applied = working;

        self.reactivate_all();
        self.commits += 1;
        self.transition = if animated && from != self.applied {
            Some(Transition {
                from,
                started: now,
                duration: self.animation_duration,
            })
        } else {
            None
        };
        trace!(commits = self.commits, animated, "Layout batch committed");
        result
    }

    /// Toggle the fixed-height constraint.
    ///
    /// The one constraint change allowed during size calculation, so it
    /// bypasses batching.
    pub fn set_fixed_height_active(&mut self, active: bool) {
        self.fixed_height_active = active;
        self.active[ConstraintGroup::FixedHeight.index()] = active;
    }

    /// Whether the fixed-height group is active.
    pub fn fixed_height_active(&self) -> bool {
        self.fixed_height_active
    }

    /// Force an immediate layout pass.
    pub fn request_layout_pass(&mut self) {
        self.layout_passes += 1;
    }

    fn deactivate_all(&mut self) {
        self.active = [false; 5];
    }

    fn reactivate_all(&mut self) {
        for group in ConstraintGroup::ALL {
            self.active[group.index()] = match group {
                ConstraintGroup::FixedHeight => self.fixed_height_active,
                _ => true,
            };
        }
    }

    /// Constants to draw with right now.
    pub fn presented(&self) -> LayoutConstants {
        self.presented_at(Instant::now())
    }

    pub(crate) fn presented_at(&self, now: Instant) -> LayoutConstants {
        match self.transition {
            Some(transition) => {
                let elapsed = now.saturating_duration_since(transition.started);
                if elapsed >= transition.duration || transition.duration.is_zero() {
                    self.applied
                } else {
                    let t = elapsed.as_secs_f32() / transition.duration.as_secs_f32();
                    LayoutConstants::lerp(&transition.from, &self.applied, t)
                }
            }
            None => self.applied,
        }
    }

    /// Whether a transition is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .is_some_and(|t| now.saturating_duration_since(t.started) < t.duration)
    }

    /// Split `area` into the bar's regions using `constants`.
    pub fn resolve(&self, area: Rect, constants: &LayoutConstants) -> ResolvedLayout {
        let inset = constants.content_inset;
        let inner = Rect {
            x: area.x.saturating_add(inset.left),
            y: area.y.saturating_add(inset.top),
            width: area.width.saturating_sub(inset.horizontal()),
            height: area.height.saturating_sub(inset.vertical()),
        };

        let text_constraint = if self.fixed_height_active {
            Constraint::Length(constants.max_text_height)
        } else {
            Constraint::Fill(1)
        };
        let text_padding = constants.text_view_padding;
        let [_, overlay_row, _, text_row, _, bottom] = Layout::vertical([
            Constraint::Length(constants.top_view_padding.top),
            Constraint::Length(constants.overlay_height),
            Constraint::Length(text_padding.top),
            text_constraint,
            Constraint::Length(text_padding.bottom),
            Constraint::Length(constants.bottom_height),
        ])
        .areas(inner);

        let [_, overlay, _] = Layout::horizontal([
            Constraint::Length(constants.top_view_padding.left),
            Constraint::Fill(1),
            Constraint::Length(constants.top_view_padding.right),
        ])
        .areas(overlay_row);

        let [left, _, text, _, right] = Layout::horizontal([
            Constraint::Length(constants.left_width),
            Constraint::Length(text_padding.left),
            Constraint::Fill(1),
            Constraint::Length(text_padding.right),
            Constraint::Length(constants.right_width),
        ])
        .areas(text_row);

        ResolvedLayout {
            overlay,
            left,
            text,
            right,
            bottom,
        }
    }
}
