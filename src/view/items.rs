//! Stock slot items used by the demo chat.

use crate::model::{ItemHooks, RenderContext, Size, Slot, SwipeDirection, VisualItem};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Widget,
};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

/// Bracketed send button. Dimmed while send is disabled.
#[derive(Debug, Clone)]
pub struct SendButton {
    label: String,
    enabled_style: Style,
    disabled_style: Style,
}

impl SendButton {
    /// Button rendered as `[label]`, styled by the send state.
    pub fn new(label: &str, enabled_style: Style, disabled_style: Style) -> Self {
        Self {
            label: format!("[{label}]"),
            enabled_style,
            disabled_style,
        }
    }
}

impl ItemHooks for SendButton {}

impl VisualItem for SendButton {
    fn intrinsic_size(&self) -> Size {
        Size::new(label_width(&self.label), 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let style = if ctx.send_enabled {
            self.enabled_style
        } else {
            self.disabled_style
        };
        Line::styled(self.label.as_str(), style).render(area, buf);
    }
}

/// Static label, e.g. an attachment button.
#[derive(Debug, Clone)]
pub struct ButtonItem {
    label: String,
    slot: Option<Slot>,
}

impl ButtonItem {
    /// Button showing `label` verbatim.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slot: None,
        }
    }

    /// Slot the button was last moved into.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }
}

impl ItemHooks for ButtonItem {
    fn did_move_to(&mut self, slot: Slot) {
        debug!(label = %self.label, %slot, "Button moved");
        self.slot = Some(slot);
    }
}

impl VisualItem for ButtonItem {
    fn intrinsic_size(&self) -> Size {
        Size::new(label_width(&self.label), 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        Line::styled(self.label.as_str(), ctx.style).render(area, buf);
    }
}

/// Character count of the current text, shown in the bottom slot.
#[derive(Debug, Clone, Default)]
pub struct CharacterCounter {
    count: usize,
    focused: bool,
}

impl CharacterCounter {
    /// Counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters counted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    fn caption(&self) -> String {
        match self.count {
            1 => "1 char".to_string(),
            n => format!("{n} chars"),
        }
    }
}

impl ItemHooks for CharacterCounter {
    fn on_text_changed(&mut self, text: &str) {
        self.count = text.chars().count();
    }

    fn on_focus_gained(&mut self) {
        self.focused = true;
    }

    fn on_focus_lost(&mut self) {
        self.focused = false;
    }
}

impl VisualItem for CharacterCounter {
    fn intrinsic_size(&self) -> Size {
        Size::new(12, 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        if !self.focused {
            return;
        }
        Line::styled(self.caption(), ctx.style).render(area, buf);
    }
}

/// Logic-only item that logs swipe gestures.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeLogger {
    swipes: usize,
}

impl SwipeLogger {
    /// Swipes seen so far.
    pub fn swipes(&self) -> usize {
        self.swipes
    }
}

impl ItemHooks for SwipeLogger {
    fn on_swipe(&mut self, direction: SwipeDirection) {
        self.swipes += 1;
        info!(?direction, total = self.swipes, "Swipe over input bar");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn ctx(send_enabled: bool) -> RenderContext {
        RenderContext {
            send_enabled,
            focused: true,
            style: Style::default(),
        }
    }

    #[test]
    fn send_button_brackets_label() {
        let button = SendButton::new("Send", Style::default(), Style::default());
        assert_eq!(button.intrinsic_size(), Size::new(6, 1));
    }

    #[test]
    fn send_button_dims_when_disabled() {
        let enabled = Style::default().fg(Color::Green);
        let disabled = Style::default().add_modifier(Modifier::DIM);
        let button = SendButton::new("Send", enabled, disabled);
        let area = Rect::new(0, 0, 6, 1);

        let mut buf = Buffer::empty(area);
        button.render(area, &mut buf, &ctx(false));
        assert_eq!(buf[(1, 0)].symbol(), "S");
        assert!(buf[(1, 0)].modifier.contains(Modifier::DIM));

        let mut buf = Buffer::empty(area);
        button.render(area, &mut buf, &ctx(true));
        assert_eq!(buf[(1, 0)].fg, Color::Green);
    }

    #[test]
    fn button_remembers_slot() {
        let mut button = ButtonItem::new("[+]");
        assert_eq!(button.slot(), None);
        button.did_move_to(Slot::Left);
        assert_eq!(button.slot(), Some(Slot::Left));
        assert_eq!(button.intrinsic_size(), Size::new(3, 1));
    }

    #[test]
    fn counter_counts_chars_not_bytes() {
        let mut counter = CharacterCounter::new();
        counter.on_text_changed("héllo");
        assert_eq!(counter.count(), 5);
        assert_eq!(counter.caption(), "5 chars");
        counter.on_text_changed("a");
        assert_eq!(counter.caption(), "1 char");
    }

    #[test]
    fn counter_hidden_without_focus() {
        let mut counter = CharacterCounter::new();
        counter.on_text_changed("abc");
        let area = Rect::new(0, 0, 12, 1);

        let mut buf = Buffer::empty(area);
        counter.render(area, &mut buf, &ctx(true));
        assert_eq!(buf[(0, 0)].symbol(), " ");

        counter.on_focus_gained();
        counter.render(area, &mut buf, &ctx(true));
        assert_eq!(buf[(0, 0)].symbol(), "3");
    }

    #[test]
    fn swipe_logger_counts() {
        let mut logger = SwipeLogger::default();
        logger.on_swipe(SwipeDirection::Left);
        logger.on_swipe(SwipeDirection::Right);
        assert_eq!(logger.swipes(), 2);
    }
}
