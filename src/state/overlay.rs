//! Overlay selection state (the auto-complete panel above the text area).
//!
//! Pure state: which candidates are loaded, what keyword filters them and
//! how tall the panel must be. Applying the panel height and the side
//! effects on neighbouring slots is the input bar's job.

use crate::model::InputBarError;
use tracing::debug;

/// Height of one overlay row.
pub const OVERLAY_ROW_HEIGHT: u16 = 1;

/// Padding the panel reserves above its first row.
pub const OVERLAY_TOP_PADDING: u16 = 1;

/// Most rows the panel shows at once.
pub const MAX_VISIBLE_ROWS: usize = 3;

/// Leading characters of a display string that are not part of the value.
pub const DISPLAY_PREFIX_LEN: usize = 2;

/// Candidate list, active keyword and derived filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySelection {
    candidates: Vec<String>,
    keyword: String,
    filtered: Vec<String>,
    row_height: u16,
    row_width: u16,
    panel_height: u16,
    highlighted: usize,
}

impl Default for OverlaySelection {
    fn default() -> Self {
        Self::new(OVERLAY_ROW_HEIGHT)
    }
}

impl OverlaySelection {
    /// Closed overlay with the given row height.
    pub fn new(row_height: u16) -> Self {
        Self {
            candidates: Vec::new(),
            keyword: String::new(),
            filtered: Vec::new(),
            row_height: row_height.max(1),
            row_width: 0,
            panel_height: 0,
            highlighted: 0,
        }
    }

    /// Load `candidates` and open the panel.
    ///
    /// Returns `false` and stays closed when `candidates` is empty.
    pub fn show(&mut self, candidates: Vec<String>, row_width: u16) -> bool {
        self.keyword.clear();
        self.filtered.clear();
        self.highlighted = 0;
        if candidates.is_empty() {
            self.candidates.clear();
            self.panel_height = 0;
            return false;
        }
        self.candidates = candidates;
        self.row_width = row_width;
        self.refilter();
        debug!(
            candidates = self.candidates.len(),
            panel_height = self.panel_height,
            "Overlay opened"
        );
        true
    }

    /// Clear everything and collapse the panel.
    pub fn hide(&mut self) {
        self.candidates.clear();
        self.keyword.clear();
        self.filtered.clear();
        self.highlighted = 0;
        self.panel_height = 0;
    }

    /// Whether the panel is open.
    pub fn is_searching(&self) -> bool {
        self.panel_height > 0
    }

    /// Refilter with a new keyword.
    ///
    /// Ignored while the panel is closed. Returns whether it took effect.
    pub fn update_keyword(&mut self, keyword: &str) -> bool {
        if !self.is_searching() {
            return false;
        }
        self.keyword = keyword.to_string();
        self.refilter();
        true
    }

    fn refilter(&mut self) {
        self.filtered = filter_candidates(&self.candidates, &self.keyword);
        self.panel_height = panel_height(self.filtered.len(), self.row_height);
        self.highlighted = self.highlighted.min(self.filtered.len().saturating_sub(1));
    }

    /// Candidates passed to the last `show`.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Active keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Candidates matching the keyword, in candidate order.
    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    /// Target panel height, 0 while closed.
    pub fn panel_height(&self) -> u16 {
        self.panel_height
    }

    /// Height of one row.
    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    /// Row width recorded when the panel was opened.
    pub fn row_width(&self) -> u16 {
        self.row_width
    }

    /// Rows the panel reserves, 0 while closed.
    pub fn visible_rows(&self) -> usize {
        if self.is_searching() {
            visible_rows(self.filtered.len())
        } else {
            0
        }
    }

    /// Whether the open panel shows its "no results" placeholder.
    pub fn shows_placeholder(&self) -> bool {
        self.is_searching() && self.filtered.is_empty()
    }

    /// Row under the keyboard highlight.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Move the highlight by `delta` rows, clamped to the filtered list.
    pub fn move_highlight(&mut self, delta: isize) {
        let last = self.filtered.len().saturating_sub(1);
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    /// Value delivered for the filtered row at `index`.
    pub fn value_at(&self, index: usize) -> Result<String, InputBarError> {
        self.filtered
            .get(index)
            .map(|row| strip_display_prefix(row))
            .ok_or(InputBarError::IndexOutOfRange {
                index,
                len: self.filtered.len(),
            })
    }
}

/// Case-insensitive substring filter keeping candidate order.
///
/// An empty keyword keeps every candidate.
pub fn filter_candidates(candidates: &[String], keyword: &str) -> Vec<String> {
    if keyword.is_empty() {
        return candidates.to_vec();
    }
    let needle = keyword.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Rows shown for a filtered list of `len` entries: at least one, at most
/// [`MAX_VISIBLE_ROWS`].
pub fn visible_rows(len: usize) -> usize {
    len.clamp(1, MAX_VISIBLE_ROWS)
}

/// Panel height for a filtered list of `len` entries.
pub fn panel_height(len: usize, row_height: u16) -> u16 {
    // visible_rows is at most MAX_VISIBLE_ROWS, so the cast is lossless
    (visible_rows(len) as u16)
        .saturating_mul(row_height)
        .saturating_add(OVERLAY_TOP_PADDING)
}

/// Drop the display prefix from a row string.
pub fn strip_display_prefix(row: &str) -> String {
    row.chars().skip(DISPLAY_PREFIX_LEN).collect()
}
