//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod input_bar;
pub mod items;
mod styles;

pub use input_bar::InputBarView;
pub use items::{ButtonItem, CharacterCounter, SendButton, SwipeLogger};
pub use styles::{BarStyles, ColorConfig};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{
    InputBarError, Item, KeyAction, ScreenMetrics, Size, Slot, SwipeDirection,
};
use crate::state::{InputBar, InputBarDelegate, InputBarEvent, TextArea, TextBuffer};
use constants::{FRAME_INTERVAL, IDLE_POLL_INTERVAL, STATUS_BAR_HEIGHT, TRANSCRIPT_MIN_HEIGHT};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Characters that open the overlay when typed at the start of a token.
const OVERLAY_TRIGGERS: [char; 2] = ['#', '@'];

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input bar rejected a request
    #[error("Input bar error: {0}")]
    Bar(#[from] InputBarError),
}

/// Chat transcript. Owner of the input bar's callbacks.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<String>,
    last_selection: Option<String>,
    bar_size: Size,
}

impl ChatState {
    /// Messages sent so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Value of the most recently selected overlay row.
    pub fn last_selection(&self) -> Option<&str> {
        self.last_selection.as_deref()
    }

    /// Last size the bar reported.
    pub fn bar_size(&self) -> Size {
        self.bar_size
    }
}

impl InputBarDelegate for ChatState {
    fn intrinsic_size_changed(&mut self, size: Size) {
        self.bar_size = size;
    }

    fn send_pressed(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn overlay_row_selected(&mut self, value: &str) {
        self.last_selection = Some(value.to_string());
    }
}

/// Trailing whitespace-separated token of `text`.
fn current_token(text: &str) -> &str {
    text.rsplit(char::is_whitespace).next().unwrap_or_default()
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    bar: InputBar<TextBuffer>,
    chat: Rc<RefCell<ChatState>>,
    key_bindings: KeyBindings,
    styles: BarStyles,
    metrics: ScreenMetrics,
    tags: Vec<String>,
    mentions: Vec<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, config)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws after every handled event and
    /// on every frame tick while a layout transition is running.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let animating = self.bar.layout().is_animating(Instant::now());
            let timeout = if animating {
                FRAME_INTERVAL
            } else {
                IDLE_POLL_INTERVAL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => self.handle_resize(width, height)?,
                    _ => continue,
                }
                self.draw()?;
            } else if animating {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an existing terminal.
    pub fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let metrics = ScreenMetrics::from_terminal(size.width.max(1), size.height);
        let styles = BarStyles::default();

        let chat = Rc::new(RefCell::new(ChatState::default()));
        let mut bar = InputBar::new(TextBuffer::new(), metrics, &config.bar_options());
        bar.set_delegate(&chat);

        bar.set_slot_items(vec![Item::visual(ButtonItem::new("[+]"))], Slot::Left, false);
        bar.set_slot_items(
            vec![Item::visual(SendButton::new(
                "Send",
                styles.send_enabled,
                styles.send_disabled,
            ))],
            Slot::Right,
            false,
        );
        bar.set_slot_items(
            vec![
                Item::visual(CharacterCounter::new()),
                Item::logic(SwipeLogger::default()),
            ],
            Slot::Bottom,
            false,
        );
        bar.handle_event(InputBarEvent::FocusGained)?;

        info!(
            width = metrics.width,
            height = metrics.height,
            max_height = bar.max_height(),
            "Input bar ready"
        );

        Ok(Self {
            terminal,
            bar,
            chat,
            key_bindings: KeyBindings::default(),
            styles,
            metrics,
            tags: config.tags.clone(),
            mentions: config.mentions.clone(),
        })
    }

    /// The input bar.
    pub fn bar(&self) -> &InputBar<TextBuffer> {
        &self.bar
    }

    /// The chat transcript state.
    pub fn chat(&self) -> std::cell::Ref<'_, ChatState> {
        self.chat.borrow()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool, TuiError> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }

        if let Some(action) = self.key_bindings.get(key) {
            return self.apply_action(action);
        }

        // Unbound printable keys are typed
        if let KeyCode::Char(ch) = key.code {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.type_char(ch);
            }
        }
        Ok(false)
    }

    fn apply_action(&mut self, action: KeyAction) -> Result<bool, TuiError> {
        debug!(?action, "Key action");
        match action {
            KeyAction::Send => self.send(),
            KeyAction::Newline => self.edit(|t| t.insert_char('\n')),
            KeyAction::DeleteBackward => self.edit(|t| {
                t.backspace();
            }),
            KeyAction::DeleteForward => self.edit(|t| {
                t.delete();
            }),
            KeyAction::CursorLeft => self.bar.text_area_mut().move_left(),
            KeyAction::CursorRight => self.bar.text_area_mut().move_right(),
            KeyAction::CursorHome => self.bar.text_area_mut().move_home(),
            KeyAction::CursorEnd => self.bar.text_area_mut().move_end(),
            KeyAction::AttachImage => self.bar.edit_text(TextBuffer::attach_image),
            KeyAction::OverlayUp => self.bar.move_overlay_highlight(-1),
            KeyAction::OverlayDown => self.bar.move_overlay_highlight(1),
            KeyAction::OverlaySelect => {
                if let Some(value) = self.bar.select_highlighted_row()? {
                    self.complete_token(&value);
                }
            }
            KeyAction::OverlayDismiss => {
                if self.bar.overlay().is_searching() {
                    self.bar.hide_overlay();
                }
            }
            KeyAction::SwipeLeft => self
                .bar
                .handle_event(InputBarEvent::Swipe(SwipeDirection::Left))?,
            KeyAction::SwipeRight => self
                .bar
                .handle_event(InputBarEvent::Swipe(SwipeDirection::Right))?,
            KeyAction::ToggleFocus => {
                let event = if self.bar.is_focused() {
                    InputBarEvent::FocusLost
                } else {
                    InputBarEvent::FocusGained
                };
                self.bar.handle_event(event)?;
            }
            KeyAction::ToggleTranslucent => {
                let translucent = !self.bar.is_translucent();
                self.bar.set_translucent(translucent);
            }
            KeyAction::ToggleForceMax => {
                let force = !self.bar.force_max_height();
                self.bar.set_force_max_height(force, true);
            }
            KeyAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn type_char(&mut self, ch: char) {
        self.bar.edit_text(|t| t.insert_char(ch));
        if self.bar.overlay().is_searching() {
            self.close_stale_overlay();
            return;
        }
        let candidates = match current_token(self.bar.text_area().text()) {
            "#" => self.tags.clone(),
            "@" => self.mentions.clone(),
            _ => return,
        };
        self.bar.show_overlay(candidates);
    }

    /// Apply a text edit, then close the overlay if its token is gone.
    fn edit(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        self.bar.edit_text(edit);
        self.close_stale_overlay();
    }

    fn close_stale_overlay(&mut self) {
        if !self.bar.overlay().is_searching() {
            return;
        }
        let token = current_token(self.bar.text_area().text());
        if !token.starts_with(OVERLAY_TRIGGERS) {
            self.bar.hide_overlay();
        }
    }

    /// Replace the trailing token with the selected overlay value.
    fn complete_token(&mut self, value: &str) {
        let text = self.bar.text_area().text();
        let token = current_token(text);
        let prefix = &text[..text.len() - token.len()];
        let trigger = token
            .chars()
            .next()
            .filter(|c| OVERLAY_TRIGGERS.contains(c))
            .map(String::from)
            .unwrap_or_default();
        let completed = format!("{prefix}{trigger}{value} ");
        self.bar.edit_text(|t| t.set_text(completed));
    }

    fn send(&mut self) {
        if self.bar.overlay().is_searching() {
            self.bar.hide_overlay();
        }
        if self.bar.send() {
            self.bar.edit_text(TextBuffer::clear);
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        debug!("Handling resize to {}x{}", width, height);
        let metrics = ScreenMetrics::from_terminal(width.max(1), height);
        let class_changed = metrics.vertical_size_class != self.metrics.vertical_size_class;
        self.metrics = metrics;

        self.bar
            .handle_event(InputBarEvent::OrientationChanged(metrics))?;
        if class_changed {
            self.bar
                .handle_event(InputBarEvent::SizeClassChanged(metrics))?;
        }
        self.bar.set_bounds_width(metrics.width);
        Ok(())
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let chat = self.chat.borrow();
        let bar = &self.bar;
        let styles = &self.styles;
        self.terminal
            .draw(|frame| render_screen(frame, bar, &chat, styles))?;
        Ok(())
    }

    /// Terminal handle, for buffer inspection in tests.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn render_screen(frame: &mut Frame, bar: &InputBar<TextBuffer>, chat: &ChatState, styles: &BarStyles) {
    let area = frame.area();
    let bar_height = bar.intrinsic_size().height.min(
        area.height
            .saturating_sub(STATUS_BAR_HEIGHT + TRANSCRIPT_MIN_HEIGHT),
    );
    let [transcript, bar_area, status] = Layout::vertical([
        Constraint::Min(TRANSCRIPT_MIN_HEIGHT),
        Constraint::Length(bar_height),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    let lines: Vec<Line> = chat
        .messages()
        .iter()
        .flat_map(|message| message.lines())
        .map(|line| Line::from(format!("> {line}")))
        .collect();
    let skip = lines.len().saturating_sub(usize::from(transcript.height));
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), transcript);

    frame.render_widget(InputBarView::new(bar, styles), bar_area);

    let mut hint = format!(" max {} rows", bar.max_height());
    if bar.is_over_max_height() {
        hint.push_str(" (scrolling)");
    } else if bar.force_max_height() {
        hint.push_str(" (pinned)");
    }
    hint.push_str(" | # @ overlay  Tab pick  Enter send  Ctrl+C quit");
    frame.render_widget(Line::styled(hint, styles.status), status);
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit. Logging must be initialized by the caller.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(config) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
