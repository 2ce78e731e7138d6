//! Text measurement
//!
//! The layout engine never talks to a font directly; widths come from a
//! [`TextMeasure`] implementation. [`crate::present::FontBook`] measures with
//! real macroquad fonts, [`FixedWidth`] gives every glyph the same advance.

use super::style::TextStyle;

pub trait TextMeasure {
    /// Width in pixels of `text` drawn in `style`
    fn measure(&self, text: &str, style: &TextStyle) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        (**self).measure(text, style)
    }
}

/// Monospace metrics: every character is `advance` pixels wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth {
    pub advance: f32,
}

impl FixedWidth {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextMeasure for FixedWidth {
    fn measure(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}
