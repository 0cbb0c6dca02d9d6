//! Property-based tests for the input bar core.
//!
//! Each property drives the public API with generated inputs and checks
//! the observable result against the sizing and overlay rules.

use crate::model::{Insets, ScreenMetrics, Size};
use crate::state::overlay::{panel_height, visible_rows};
use crate::state::{
    filter_candidates, required_size, strip_display_prefix, GrowthBound, HeightInputs, InputBar,
    InputBarDelegate, InputBarOptions, PaddingKind, TextArea, DEFAULT_TEXT_TRAILING_PADDING,
    MAX_VISIBLE_ROWS, OVERLAY_TOP_PADDING,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ===== Test doubles =====

/// Text area whose natural height is set directly.
#[derive(Debug, Default)]
struct FixedHeightText {
    height: u16,
    scroll_enabled: bool,
}

impl TextArea for FixedHeightText {
    fn natural_height(&self, _width: u16) -> u16 {
        self.height
    }

    fn text(&self) -> &str {
        ""
    }

    fn image_attachment_count(&self) -> usize {
        0
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn invalidate_natural_size(&mut self) {}
}

#[derive(Debug, Default)]
struct SizeLog {
    sizes: Vec<Size>,
}

impl InputBarDelegate for SizeLog {
    fn intrinsic_size_changed(&mut self, size: Size) {
        self.sizes.push(size);
    }
}

fn bar(height: u16, max_height: Option<u16>) -> InputBar<FixedHeightText> {
    let options = InputBarOptions {
        max_height,
        animation_duration: Duration::ZERO,
        ..InputBarOptions::default()
    };
    InputBar::new(
        FixedHeightText {
            height,
            ..FixedHeightText::default()
        },
        ScreenMetrics::from_terminal(80, 30),
        &options,
    )
}

// ===== Arbitrary Strategies =====

fn arb_insets() -> impl Strategy<Value = Insets> {
    (0u16..6, 0u16..6, 0u16..6, 0u16..6).prop_map(|(t, l, b, r)| Insets::new(t, l, b, r))
}

fn arb_padding_kind() -> impl Strategy<Value = PaddingKind> {
    prop_oneof![
        Just(PaddingKind::Content),
        Just(PaddingKind::TopView),
        Just(PaddingKind::TextView),
    ]
}

fn arb_candidates() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[#@][ a-zA-Z]{0,8}", 0..8)
}

proptest! {
    #[test]
    fn padding_updates_never_leave_stale_values(
        updates in prop::collection::vec((arb_padding_kind(), arb_insets(), any::<bool>()), 1..12),
    ) {
        let mut bar = bar(2, None);
        let mut latest = [Insets::new(0, 1, 0, 1), Insets::ZERO, Insets::new(0, 0, 0, 1)];

        for (kind, insets, animated) in updates {
            bar.set_padding(kind, insets, animated);
            let slot = match kind {
                PaddingKind::Content => 0,
                PaddingKind::TopView => 1,
                PaddingKind::TextView => 2,
            };
            latest[slot] = insets;
        }

        let constants = *bar.constants();
        prop_assert_eq!(constants.content_inset, latest[0]);
        prop_assert_eq!(constants.top_view_padding, latest[1]);
        prop_assert_eq!(constants.text_view_padding, latest[2]);

        let expected = 2
            + latest[0].vertical()
            + latest[1].top
            + latest[2].vertical();
        prop_assert_eq!(bar.intrinsic_size().height, expected);
        prop_assert_eq!(
            bar.intrinsic_size(),
            required_size(&HeightInputs::from_constants(&constants, 80, 2))
        );
    }

    #[test]
    fn invalidate_twice_notifies_at_most_once(
        kind in arb_padding_kind(),
        insets in arb_insets(),
    ) {
        let log = Rc::new(RefCell::new(SizeLog::default()));
        let mut bar = bar(1, None);
        bar.set_delegate(&log);

        bar.set_padding(kind, insets, false);
        let after_change = log.borrow().sizes.len();
        prop_assert!(after_change <= 1);

        bar.invalidate_intrinsic_size();
        bar.invalidate_intrinsic_size();
        prop_assert_eq!(log.borrow().sizes.len(), after_change);
    }

    #[test]
    fn filter_keeps_exactly_the_matches_in_order(
        candidates in arb_candidates(),
        keyword in "[a-zA-Z]{0,3}",
    ) {
        let filtered = filter_candidates(&candidates, &keyword);
        let needle = keyword.to_lowercase();
        let expected: Vec<String> = candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn panel_height_follows_clamped_row_count(len in 0usize..40, row_height in 1u16..5) {
        let rows = visible_rows(len);
        prop_assert!((1..=MAX_VISIBLE_ROWS).contains(&rows));
        prop_assert_eq!(rows, len.clamp(1, MAX_VISIBLE_ROWS));
        prop_assert_eq!(
            panel_height(len, row_height),
            rows as u16 * row_height + OVERLAY_TOP_PADDING
        );
    }

    #[test]
    fn growth_bound_tracks_natural_height(
        max_height in 1u16..50,
        naturals in prop::collection::vec(0u16..100, 1..20),
    ) {
        let mut bound = GrowthBound::with_max_height(max_height);
        for natural in naturals {
            bound.observe(natural);
            prop_assert_eq!(bound.is_over_max_height(), natural >= max_height);
            prop_assert_eq!(bound.clamp(natural), natural.min(max_height));
        }
    }

    #[test]
    fn bar_height_is_clamped_text_height(
        max_height in 2u16..20,
        naturals in prop::collection::vec(1u16..40, 1..10),
    ) {
        let mut bar = bar(1, Some(max_height));
        bar.set_padding(PaddingKind::Content, Insets::ZERO, false);
        bar.set_padding(PaddingKind::TextView, Insets::ZERO, false);

        for natural in naturals {
            bar.edit_text(|t| t.height = natural);
            prop_assert_eq!(bar.is_over_max_height(), natural >= max_height);
            prop_assert_eq!(bar.intrinsic_size().height, natural.min(max_height));
            prop_assert_eq!(bar.text_area().scroll_enabled, natural >= max_height);
        }
    }

    #[test]
    fn show_then_hide_restores_constants(
        candidates in prop::collection::vec("#[a-z]{1,6}", 1..6),
    ) {
        let mut bar = bar(1, None);
        let before = *bar.constants();

        bar.show_overlay(candidates);
        prop_assert!(bar.constants().overlay_height > 0);
        prop_assert_eq!(bar.constants().right_width, 0);

        bar.hide_overlay();
        let after = *bar.constants();
        prop_assert_eq!(after, before);
        prop_assert_eq!(after.text_view_padding.right, DEFAULT_TEXT_TRAILING_PADDING);
        prop_assert_eq!(after.overlay_height, 0);
    }

    #[test]
    fn selection_strips_two_leading_chars(row in "[#@ ]{2}[a-z]{0,10}") {
        let expected: String = row.chars().skip(2).collect();
        prop_assert_eq!(strip_display_prefix(&row), expected.clone());

        let mut bar = bar(1, None);
        bar.show_overlay(vec![row]);
        prop_assert_eq!(bar.select_overlay_row(0), Ok(expected));
        prop_assert!(!bar.overlay().is_searching());
    }
}
