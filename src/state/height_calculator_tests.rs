//! Tests for the required-height formula.

use super::*;

// ===== Test Helpers =====

fn inputs() -> HeightInputs {
    HeightInputs {
        bounds_width: 80,
        text_height: 1,
        content_inset: Insets::ZERO,
        top_view_padding: Insets::ZERO,
        text_view_padding: Insets::ZERO,
        overlay_height: 0,
        bottom_height: 0,
    }
}

// ===== Formula =====

#[test]
fn bare_bar_is_as_tall_as_its_text() {
    assert_eq!(required_size(&inputs()), Size::new(80, 1));
}

#[test]
fn width_is_the_bounds_width() {
    let size = required_size(&HeightInputs {
        bounds_width: 133,
        ..inputs()
    });
    assert_eq!(size.width, 133);
}

#[test]
fn every_padding_term_is_counted() {
    let size = required_size(&HeightInputs {
        text_height: 2,
        content_inset: Insets::new(1, 5, 2, 5),
        top_view_padding: Insets::new(3, 9, 9, 9),
        text_view_padding: Insets::new(4, 0, 5, 1),
        ..inputs()
    });
    assert_eq!(size.height, 2 + 1 + 2 + 3 + 4 + 5);
}

#[test]
fn horizontal_insets_and_overlay_bottom_padding_do_not_count() {
    let plain = required_size(&inputs());
    let padded = required_size(&HeightInputs {
        content_inset: Insets::new(0, 7, 0, 7),
        top_view_padding: Insets::new(0, 3, 6, 3),
        text_view_padding: Insets::new(0, 2, 0, 2),
        ..inputs()
    });
    assert_eq!(plain, padded);
}

#[test]
fn overlay_and_bottom_slot_add_their_heights() {
    let size = required_size(&HeightInputs {
        overlay_height: 4,
        bottom_height: 2,
        ..inputs()
    });
    assert_eq!(size.height, 1 + 4 + 2);
}

#[test]
fn huge_inputs_saturate_instead_of_overflowing() {
    let size = required_size(&HeightInputs {
        text_height: u16::MAX,
        bottom_height: 10,
        ..inputs()
    });
    assert_eq!(size.height, u16::MAX);
}

// ===== Text area width =====

#[test]
fn text_area_width_subtracts_slots_and_paddings() {
    let constants = LayoutConstants {
        content_inset: Insets::new(0, 1, 0, 1),
        text_view_padding: Insets::new(0, 1, 0, 1),
        left_width: 4,
        right_width: 6,
        ..LayoutConstants::default()
    };
    assert_eq!(text_area_width(&constants, 40), 40 - 2 - 2 - 4 - 6);
}

#[test]
fn text_area_width_never_drops_below_one() {
    let constants = LayoutConstants {
        left_width: 50,
        ..LayoutConstants::default()
    };
    assert_eq!(text_area_width(&constants, 10), 1);
}

#[test]
fn from_constants_copies_padding_and_slot_heights() {
    let constants = LayoutConstants {
        content_inset: Insets::new(1, 0, 1, 0),
        overlay_height: 3,
        bottom_height: 1,
        ..LayoutConstants::default()
    };
    let inputs = HeightInputs::from_constants(&constants, 60, 2);
    assert_eq!(inputs.bounds_width, 60);
    assert_eq!(inputs.text_height, 2);
    assert_eq!(inputs.overlay_height, 3);
    assert_eq!(required_size(&inputs).height, 2 + 2 + 3 + 1);
}
