//! Text style state carried through the draw pass

use crate::markup::ControlCode;

/// Palette behind indexed colors `\c[0]` through `\c[7]`
pub const PALETTE: [(u8, u8, u8); 8] = [
    (255, 255, 255), // 0 normal
    (128, 128, 255), // 1 blue
    (255, 128, 128), // 2 red
    (128, 255, 128), // 3 green
    (128, 255, 255), // 4 cyan
    (255, 128, 255), // 5 magenta
    (255, 255, 128), // 6 yellow
    (192, 192, 192), // 7 gray
];

/// Foreground color of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl TextColor {
    /// Indexed color, or `None` outside the palette
    pub fn indexed(index: u8) -> Option<Self> {
        ((index as usize) < PALETTE.len()).then_some(TextColor::Indexed(index))
    }

    /// Parse a six-digit hex argument.
    ///
    /// The digit pairs fill the channels in the order they are written, so
    /// `FF8000` is (255, 128, 0).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(TextColor::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match *self {
            TextColor::Indexed(index) => PALETTE
                .get(index as usize)
                .copied()
                .unwrap_or(PALETTE[0]),
            TextColor::Rgb(r, g, b) => (r, g, b),
        }
    }
}

impl Default for TextColor {
    fn default() -> Self {
        TextColor::Indexed(0)
    }
}

/// Active font and color flags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub color: TextColor,
    /// Font family; `None` uses the default font
    pub font: Option<String>,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub fn with_color(color: TextColor) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Apply a style directive. Arguments that do not parse leave the style
    /// as it was; icon and reserved codes are not style changes and are
    /// ignored here.
    pub fn apply(&mut self, code: ControlCode, arg: Option<&str>) {
        match code {
            ControlCode::Color => {
                if let Some(color) = arg
                    .and_then(|a| a.trim().parse::<u8>().ok())
                    .and_then(TextColor::indexed)
                {
                    self.color = color;
                }
            }
            ControlCode::HexColor => {
                if let Some(color) = arg.and_then(TextColor::from_hex) {
                    self.color = color;
                }
            }
            ControlCode::Bold => self.bold = !self.bold,
            ControlCode::Italic => self.italic = !self.italic,
            ControlCode::Font => {
                if let Some(name) = arg {
                    let name = name.trim();
                    self.font = (!name.is_empty()).then(|| name.to_string());
                }
            }
            ControlCode::Icon | ControlCode::Reserved2 | ControlCode::Reserved8 => {}
        }
    }
}
