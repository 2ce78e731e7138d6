//! Draw pass: turns wrapped canonical text into positioned draw operations

use serde::{Deserialize, Serialize};

use crate::markup::{next_token, ControlCode, Token};

use super::measure::TextMeasure;
use super::style::{TextColor, TextStyle};
use super::wrap::wrap;

/// Metrics and defaults for laying out a text panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Distance between line tops
    pub line_height: f32,
    /// Width (and height) of an inline icon
    pub icon_size: f32,
    /// Extra advance after every glyph
    pub glyph_pad: f32,
    /// Palette index the style resets to at the start of a render
    pub default_color: u8,
    pub font_size: u16,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            line_height: 22.0,
            icon_size: 24.0,
            glyph_pad: 2.0,
            default_color: 0,
            font_size: 22,
        }
    }
}

impl RenderSettings {
    /// Style every render starts from
    pub fn default_style(&self) -> TextStyle {
        TextStyle::with_color(TextColor::indexed(self.default_color).unwrap_or_default())
    }
}

/// A single positioned drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        line: usize,
        text: String,
        style: TextStyle,
    },
    Icon {
        x: f32,
        y: f32,
        line: usize,
        name: String,
    },
}

impl DrawOp {
    pub fn x(&self) -> f32 {
        match self {
            DrawOp::Text { x, .. } | DrawOp::Icon { x, .. } => *x,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            DrawOp::Text { line, .. } | DrawOp::Icon { line, .. } => *line,
        }
    }
}

/// Lazy draw pass over one wrapped text.
///
/// Walks the text one token at a time, carrying the cursor and style state.
/// Style survives line breaks. Each printable character becomes its own
/// [`DrawOp::Text`].
pub struct Draw<'m, M: TextMeasure + ?Sized> {
    text: String,
    pos: usize,
    x: f32,
    line: usize,
    style: TextStyle,
    measure: &'m M,
    max_width: f32,
    settings: RenderSettings,
}

impl<'m, M: TextMeasure + ?Sized> Draw<'m, M> {
    /// Start a draw pass over text that has already been wrapped
    pub fn new(text: String, max_width: f32, measure: &'m M, settings: &RenderSettings) -> Self {
        Self {
            text,
            pos: 0,
            x: 0.0,
            line: 0,
            style: settings.default_style(),
            measure,
            max_width,
            settings: settings.clone(),
        }
    }

    /// Style currently in effect
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    fn y(&self) -> f32 {
        self.line as f32 * self.settings.line_height
    }

    fn new_line(&mut self) {
        self.x = 0.0;
        self.line += 1;
    }

    /// Break the line first if something `width` wide would not fit. A
    /// line that is still empty never breaks.
    fn make_room(&mut self, width: f32) {
        if self.x > 0.0 && self.x + width > self.max_width {
            self.new_line();
        }
    }
}

impl<'m, M: TextMeasure + ?Sized> Iterator for Draw<'m, M> {
    type Item = DrawOp;

    fn next(&mut self) -> Option<DrawOp> {
        loop {
            let (token, next) = next_token(&self.text, self.pos)?;
            self.pos = next;

            match token {
                Token::Newline => self.new_line(),
                Token::Directive {
                    code: ControlCode::Icon,
                    arg,
                } => {
                    let Some(name) = arg.map(str::to_string) else {
                        continue;
                    };
                    let size = self.settings.icon_size;
                    self.make_room(size);
                    let op = DrawOp::Icon {
                        x: self.x,
                        y: self.y(),
                        line: self.line,
                        name,
                    };
                    self.x += size;
                    return Some(op);
                }
                Token::Directive { code, arg } => self.style.apply(code, arg),
                Token::Glyph(c) => {
                    let mut buf = [0u8; 4];
                    let glyph: &str = c.encode_utf8(&mut buf);
                    let width = self.measure.measure(glyph, &self.style);
                    self.make_room(width);
                    let op = DrawOp::Text {
                        x: self.x,
                        y: self.y(),
                        line: self.line,
                        text: glyph.to_string(),
                        style: self.style.clone(),
                    };
                    self.x += width + self.settings.glyph_pad;
                    return Some(op);
                }
            }
        }
    }
}

/// Wrap `text` to `max_width` and lay it out as draw operations.
///
/// Every call starts from the default style at (0, 0).
pub fn render<'m, M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    measure: &'m M,
    settings: &RenderSettings,
) -> Draw<'m, M> {
    let wrapped = wrap(text, max_width, measure, &settings.default_style());
    Draw::new(wrapped, max_width, measure, settings)
}
