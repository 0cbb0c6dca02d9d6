//! Input bar widget.
//!
//! Draws an [`InputBar`] with the constants its layout orchestrator
//! presents at a given instant, so animated transitions show up as
//! in-between frames.

use super::constants::{OVERLAY_PLACEHOLDER, OVERLAY_SEPARATOR, TEXT_PLACEHOLDER};
use super::styles::BarStyles;
use crate::model::{Item, RenderContext, Slot};
use crate::state::{InputBar, OverlaySelection, TextArea, TextBuffer, OVERLAY_TOP_PADDING};
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};
use std::time::Instant;

/// Renders the input bar into the area it is given.
///
/// The area should be as tall as the bar's intrinsic height; anything
/// that does not fit is clipped.
pub struct InputBarView<'a> {
    bar: &'a InputBar<TextBuffer>,
    styles: &'a BarStyles,
    now: Instant,
}

impl<'a> InputBarView<'a> {
    /// Widget drawing `bar` as of now.
    pub fn new(bar: &'a InputBar<TextBuffer>, styles: &'a BarStyles) -> Self {
        Self {
            bar,
            styles,
            now: Instant::now(),
        }
    }

    /// Draw the frame for `now` instead of the current instant.
    pub fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl Widget for InputBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let bar = self.bar;
        let styles = self.styles;

        if !bar.is_translucent() {
            buf.set_style(area, styles.background);
        }

        let constants = bar.layout().presented_at(self.now);
        let regions = bar.layout().resolve(area, &constants);
        let ctx = RenderContext {
            send_enabled: bar.is_send_enabled(),
            focused: bar.is_focused(),
            style: bar.font(),
        };

        if bar.overlay().is_searching() {
            render_overlay(bar.overlay(), regions.overlay, buf, styles);
        }
        render_text(bar, regions.text, buf, styles);
        render_items(bar.slot_items(Slot::Left), regions.left, buf, &ctx);
        render_items(bar.slot_items(Slot::Right), regions.right, buf, &ctx);
        render_items(bar.slot_items(Slot::Bottom), regions.bottom, buf, &ctx);
    }
}

fn row_rect(area: Rect, offset: u16, height: u16) -> Option<Rect> {
    let y = area.y.checked_add(offset)?;
    if y >= area.bottom() {
        return None;
    }
    Some(Rect {
        x: area.x,
        y,
        width: area.width,
        height: height.min(area.bottom() - y),
    })
}

fn render_overlay(overlay: &OverlaySelection, area: Rect, buf: &mut Buffer, styles: &BarStyles) {
    if area.is_empty() {
        return;
    }
    if let Some(separator) = row_rect(area, 0, OVERLAY_TOP_PADDING) {
        let line = OVERLAY_SEPARATOR.repeat(usize::from(separator.width));
        Line::styled(line, styles.separator).render(separator, buf);
    }

    let row_height = overlay.row_height().max(1);
    if overlay.shows_placeholder() {
        if let Some(rect) = row_rect(area, OVERLAY_TOP_PADDING, row_height) {
            Line::styled(OVERLAY_PLACEHOLDER, styles.placeholder).render(rect, buf);
        }
        return;
    }

    // Keep the highlighted row inside the visible window
    let visible = overlay.visible_rows();
    let first = (overlay.highlighted() + 1).saturating_sub(visible);
    for (index, row) in overlay.filtered().iter().enumerate().skip(first).take(visible) {
        let slot = u16::try_from(index - first).unwrap_or(u16::MAX);
        let offset = OVERLAY_TOP_PADDING.saturating_add(slot.saturating_mul(row_height));
        let Some(rect) = row_rect(area, offset, row_height) else {
            break;
        };
        let style = if index == overlay.highlighted() {
            styles.overlay_highlight
        } else {
            styles.overlay_row
        };
        buf.set_style(rect, style);
        Line::styled(row.as_str(), style).render(rect, buf);
    }
}

fn render_text(bar: &InputBar<TextBuffer>, area: Rect, buf: &mut Buffer, styles: &BarStyles) {
    if area.is_empty() {
        return;
    }
    let text_area = bar.text_area();
    let font = bar.font();

    if text_area.text().is_empty() {
        Line::styled(TEXT_PLACEHOLDER, styles.placeholder).render(area, buf);
        if bar.is_focused() {
            if let Some(cell) = buf.cell_mut((area.x, area.y)) {
                cell.set_style(styles.cursor);
            }
        }
        return;
    }

    let wrapped = text_area.wrapped(area.width);
    let offset = text_area.scroll_offset(area.width, area.height);
    for (row, line) in wrapped
        .lines
        .iter()
        .skip(offset)
        .take(usize::from(area.height))
        .enumerate()
    {
        let y = area.y + u16::try_from(row).unwrap_or(u16::MAX);
        Line::styled(line.as_str(), font).render(Rect { y, height: 1, ..area }, buf);
    }

    if !bar.is_focused() {
        return;
    }
    let (row, col) = wrapped.cursor;
    let Some(row) = row.checked_sub(offset) else {
        return;
    };
    let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
        return;
    };
    if row < area.height && col < area.width {
        if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
            cell.set_style(styles.cursor);
        }
    }
}

/// Lay visual items out left to right, bottom-aligned, one column apart.
fn render_items(items: &[Item], area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
    if area.is_empty() {
        return;
    }
    let mut x = area.x;
    for item in items.iter().filter_map(Item::as_visual) {
        let size = item.intrinsic_size();
        let width = size.width.min(area.right().saturating_sub(x));
        if width == 0 {
            break;
        }
        let height = size.height.clamp(1, area.height);
        let rect = Rect::new(x, area.bottom() - height, width, height);
        item.render(rect, buf, ctx);
        x = x.saturating_add(width).saturating_add(1);
    }
}
