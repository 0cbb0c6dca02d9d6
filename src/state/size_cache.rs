//! Intrinsic size cache with notification suppression.

use crate::model::Size;

/// Holds the last computed size and the last size reported to the owner.
///
/// The owner is only told about a size that differs from the one it was
/// told about last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeCache {
    current: Size,
    previous_notified: Option<Size>,
}

impl SizeCache {
    /// Create an empty cache. The first stored size always notifies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly computed size.
    ///
    /// Returns `Some(size)` when the owner must be notified, that is when
    /// the size differs from the last one recorded by
    /// [`Self::mark_notified`]. Returns `None` otherwise.
    pub fn store(&mut self, size: Size) -> Option<Size> {
        self.current = size;
        (self.previous_notified != Some(size)).then_some(size)
    }

    /// Record that the owner received `size`.
    pub fn mark_notified(&mut self, size: Size) {
        self.previous_notified = Some(size);
    }

    /// Last computed size.
    pub fn current(&self) -> Size {
        self.current
    }

    /// Last size the owner was told about.
    pub fn previous_notified(&self) -> Option<Size> {
        self.previous_notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_and_mark(cache: &mut SizeCache, size: Size) -> Option<Size> {
        let stored = cache.store(size);
        if let Some(size) = stored {
            cache.mark_notified(size);
        }
        stored
    }

    #[test]
    fn first_store_notifies() {
        let mut cache = SizeCache::new();
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 3)), Some(Size::new(80, 3)));
        assert_eq!(cache.previous_notified(), Some(Size::new(80, 3)));
    }

    #[test]
    fn unreported_size_keeps_notifying() {
        let mut cache = SizeCache::new();
        assert_eq!(cache.store(Size::new(80, 3)), Some(Size::new(80, 3)));
        assert_eq!(cache.previous_notified(), None);
        assert_eq!(cache.store(Size::new(80, 3)), Some(Size::new(80, 3)));
        cache.mark_notified(Size::new(80, 3));
        assert_eq!(cache.store(Size::new(80, 3)), None);
    }

    #[test]
    fn first_store_of_zero_still_notifies() {
        let mut cache = SizeCache::new();
        assert_eq!(store_and_mark(&mut cache, Size::ZERO), Some(Size::ZERO));
    }

    #[test]
    fn unchanged_size_is_suppressed() {
        let mut cache = SizeCache::new();
        store_and_mark(&mut cache, Size::new(80, 3));
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 3)), None);
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 3)), None);
    }

    #[test]
    fn changed_size_notifies_once() {
        let mut cache = SizeCache::new();
        store_and_mark(&mut cache, Size::new(80, 3));
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 4)), Some(Size::new(80, 4)));
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 4)), None);
        assert_eq!(cache.current(), Size::new(80, 4));
    }

    #[test]
    fn returning_to_an_older_size_notifies() {
        let mut cache = SizeCache::new();
        store_and_mark(&mut cache, Size::new(80, 3));
        store_and_mark(&mut cache, Size::new(80, 5));
        assert_eq!(store_and_mark(&mut cache, Size::new(80, 3)), Some(Size::new(80, 3)));
    }
}
