//! Growth bound tracking for the text area.
//!
//! The text area grows with its content until its natural height reaches
//! `max_height`. From there on it is pinned to `max_height` and scrolls
//! internally.

use crate::model::ScreenMetrics;
use tracing::debug;

/// Outcome of observing a natural text height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundTransition {
    /// Mode did not change.
    Unchanged,
    /// Natural height reached the bound: switch to scroll mode.
    EnteredOverMax,
    /// Natural height fell below the bound: switch back to grow mode.
    LeftOverMax,
}

/// Growth bound state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthBound {
    max_height: u16,
    is_over_max: bool,
    force_max: bool,
    auto_update_max_height: bool,
}

impl GrowthBound {
    /// Bound derived from the given screen metrics, auto-update enabled.
    pub fn new(metrics: &ScreenMetrics) -> Self {
        Self {
            max_height: metrics.max_text_height(),
            is_over_max: false,
            force_max: false,
            auto_update_max_height: true,
        }
    }

    /// Bound with an explicit maximum height, auto-update disabled.
    pub fn with_max_height(max_height: u16) -> Self {
        Self {
            max_height,
            is_over_max: false,
            force_max: false,
            auto_update_max_height: false,
        }
    }

    /// Whether the natural height was at or past the bound at the last
    /// calculation.
    pub fn is_over_max_height(&self) -> bool {
        self.is_over_max
    }

    /// Current bound in rows.
    pub fn max_height(&self) -> u16 {
        self.max_height
    }

    /// Override the bound.
    pub fn set_max_height(&mut self, max_height: u16) {
        self.max_height = max_height;
    }

    /// Whether the fixed-height constraint stays active below the bound.
    pub fn force_max(&self) -> bool {
        self.force_max
    }

    /// Set the force-max flag.
    pub fn set_force_max(&mut self, force_max: bool) {
        self.force_max = force_max;
    }

    /// Whether metric changes recompute the bound.
    pub fn auto_update_max_height(&self) -> bool {
        self.auto_update_max_height
    }

    /// Enable or disable recomputing the bound on metric changes.
    pub fn set_auto_update_max_height(&mut self, enabled: bool) {
        self.auto_update_max_height = enabled;
    }

    /// Whether the fixed-height constraint should be active.
    pub fn fixed_height_active(&self) -> bool {
        self.is_over_max || self.force_max
    }

    /// Recompute `max_height` from new screen metrics.
    ///
    /// Returns `true` when the bound changed. Does nothing while
    /// auto-update is disabled.
    pub fn apply_metrics(&mut self, metrics: &ScreenMetrics) -> bool {
        if !self.auto_update_max_height {
            return false;
        }
        let max_height = metrics.max_text_height();
        if max_height == self.max_height {
            return false;
        }
        debug!(
            old = self.max_height,
            new = max_height,
            "Growth bound recomputed from screen metrics"
        );
        self.max_height = max_height;
        true
    }

    /// Record a natural text height and flip mode if it crossed the bound.
    pub fn observe(&mut self, natural_height: u16) -> BoundTransition {
        let over = natural_height >= self.max_height;
        match (self.is_over_max, over) {
            (false, true) => {
                self.is_over_max = true;
                BoundTransition::EnteredOverMax
            }
            (true, false) => {
                self.is_over_max = false;
                BoundTransition::LeftOverMax
            }
            _ => BoundTransition::Unchanged,
        }
    }

    /// Height the text area actually gets for a natural height.
    pub fn clamp(&self, natural_height: u16) -> u16 {
        natural_height.min(self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SizeClass;

    #[test]
    fn starts_in_grow_mode() {
        let bound = GrowthBound::with_max_height(5);
        assert!(!bound.is_over_max_height());
        assert!(!bound.fixed_height_active());
    }

    #[test]
    fn reaching_the_bound_counts_as_over() {
        let mut bound = GrowthBound::with_max_height(5);
        assert_eq!(bound.observe(5), BoundTransition::EnteredOverMax);
        assert!(bound.is_over_max_height());
        assert_eq!(bound.clamp(5), 5);
    }

    #[test]
    fn repeated_over_observations_do_not_flip_again() {
        let mut bound = GrowthBound::with_max_height(5);
        bound.observe(9);
        assert_eq!(bound.observe(12), BoundTransition::Unchanged);
    }

    #[test]
    fn falling_below_leaves_over_mode() {
        let mut bound = GrowthBound::with_max_height(5);
        bound.observe(9);
        assert_eq!(bound.observe(4), BoundTransition::LeftOverMax);
        assert!(!bound.is_over_max_height());
    }

    #[test]
    fn force_max_keeps_fixed_height_active() {
        let mut bound = GrowthBound::with_max_height(5);
        bound.set_force_max(true);
        assert!(bound.fixed_height_active());
        bound.observe(9);
        bound.observe(1);
        assert!(bound.fixed_height_active());
    }

    #[test]
    fn metrics_update_respects_auto_flag() {
        let metrics = ScreenMetrics {
            width: 80,
            height: 30,
            vertical_size_class: SizeClass::Regular,
        };
        let mut manual = GrowthBound::with_max_height(4);
        assert!(!manual.apply_metrics(&metrics));
        assert_eq!(manual.max_height(), 4);

        let mut auto = GrowthBound::with_max_height(4);
        auto.set_auto_update_max_height(true);
        assert!(auto.apply_metrics(&metrics));
        assert_eq!(auto.max_height(), 10);
        assert!(!auto.apply_metrics(&metrics));
    }

    #[test]
    fn new_derives_bound_from_metrics() {
        let metrics = ScreenMetrics {
            width: 80,
            height: 20,
            vertical_size_class: SizeClass::Compact,
        };
        let bound = GrowthBound::new(&metrics);
        assert_eq!(bound.max_height(), 4);
        assert!(bound.auto_update_max_height());
    }
}
