//! Caller-held render cache for a text panel

use super::draw::{render, DrawOp, RenderSettings};
use super::measure::TextMeasure;

/// Remembers the last rendered text so an unchanged panel is not laid out
/// again on every selection event.
#[derive(Debug, Default)]
pub struct RenderCache {
    key: Option<(String, f32)>,
    ops: Vec<DrawOp>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `text` unless it was the last text rendered at this width.
    /// Returns true when a new layout was produced.
    pub fn refresh<M: TextMeasure + ?Sized>(
        &mut self,
        text: &str,
        max_width: f32,
        measure: &M,
        settings: &RenderSettings,
    ) -> bool {
        let unchanged = matches!(&self.key, Some((last, width)) if last == text && *width == max_width);
        if unchanged {
            log::debug!("Render cache hit ({} ops)", self.ops.len());
            return false;
        }

        self.ops = render(text, max_width, measure, settings).collect();
        self.key = Some((text.to_string(), max_width));
        log::debug!("Render cache miss, laid out {} ops", self.ops.len());
        true
    }

    /// Forget the cached layout
    pub fn clear(&mut self) {
        self.key = None;
        self.ops.clear();
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::FixedWidth;
    use crate::layout::style::TextStyle;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl TextMeasure for Counting {
        fn measure(&self, text: &str, _style: &TextStyle) -> f32 {
            self.calls.set(self.calls.get() + 1);
            text.chars().count() as f32 * 6.0
        }
    }

    #[test]
    fn test_unchanged_text_is_not_laid_out_again() {
        let measure = Counting { calls: Cell::new(0) };
        let settings = RenderSettings::default();
        let mut cache = RenderCache::new();

        assert!(cache.refresh("hello there", 200.0, &measure, &settings));
        let calls = measure.calls.get();
        assert!(calls > 0);
        assert_eq!(cache.ops().len(), 11);

        assert!(!cache.refresh("hello there", 200.0, &measure, &settings));
        assert_eq!(measure.calls.get(), calls);

        assert!(cache.refresh("hello there", 100.0, &measure, &settings));
        assert!(cache.refresh("bye", 100.0, &measure, &settings));
        assert_eq!(cache.ops().len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut cache = RenderCache::new();
        let settings = RenderSettings::default();
        cache.refresh("x", 50.0, &FixedWidth::new(4.0), &settings);
        cache.clear();
        assert!(cache.ops().is_empty());
        assert!(cache.refresh("x", 50.0, &FixedWidth::new(4.0), &settings));
    }
}
