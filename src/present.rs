//! macroquad backend: measures with real fonts and executes draw operations
//!
//! Everything here needs a running macroquad context except the color
//! conversions.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::config::JournalConfig;
use crate::journal::{QuestBook, QuestList};
use crate::layout::{DrawOp, RenderSettings, TextColor, TextMeasure, TextStyle};

/// Alpha of completed quest names in the list
pub const DISABLED_ALPHA: u8 = 128;

/// Left inset of quest names in the list
const LIST_TEXT_INSET: f32 = 8.0;

pub fn text_color(color: TextColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::from_rgba(r, g, b, 255)
}

pub fn disabled_color() -> Color {
    let (r, g, b) = TextColor::default().rgb();
    Color::from_rgba(r, g, b, DISABLED_ALPHA)
}

/// Fonts by family name, all used at one pixel size
pub struct FontBook {
    default: Option<Font>,
    fonts: HashMap<String, Font>,
    size: u16,
}

impl FontBook {
    /// Book that draws with macroquad's built-in font until others are added
    pub fn new(size: u16) -> Self {
        Self {
            default: None,
            fonts: HashMap::new(),
            size,
        }
    }

    pub fn set_default(&mut self, mut font: Font) {
        font.set_filter(FilterMode::Nearest);
        self.default = Some(font);
    }

    /// Register a family for `\fn[name]`. An italic face can be registered
    /// as "<name> Italic"; macroquad cannot slant glyphs itself.
    pub fn insert(&mut self, name: &str, mut font: Font) {
        font.set_filter(FilterMode::Nearest);
        self.fonts.insert(name.to_string(), font);
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    fn font_for(&self, style: &TextStyle) -> Option<&Font> {
        let family = style.font.as_deref();
        if style.italic {
            let italic = format!("{} Italic", family.unwrap_or("default"));
            if let Some(font) = self.fonts.get(&italic) {
                return Some(font);
            }
        }
        family
            .and_then(|name| self.fonts.get(name))
            .or(self.default.as_ref())
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        let width = measure_text(text, self.font_for(style), self.size, 1.0).width;
        // bold is a one pixel double strike
        if style.bold {
            width + 1.0
        } else {
            width
        }
    }
}

/// Icon textures keyed by icon name
#[derive(Default)]
pub struct IconAtlas {
    textures: HashMap<String, Texture2D>,
}

impl IconAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, texture: Texture2D) {
        texture.set_filter(FilterMode::Nearest);
        self.textures.insert(name.to_string(), texture);
    }

    pub fn get(&self, name: &str) -> Option<&Texture2D> {
        self.textures.get(name)
    }
}

/// Baseline offset from the top of a line
fn baseline(settings: &RenderSettings) -> f32 {
    (settings.line_height * 0.75).round()
}

/// Execute draw operations with `origin` as the panel's top-left corner
pub fn draw_ops(
    ops: &[DrawOp],
    origin: Vec2,
    fonts: &FontBook,
    icons: &IconAtlas,
    settings: &RenderSettings,
) {
    for op in ops {
        match op {
            DrawOp::Text { x, y, text, style, .. } => {
                let params = || TextParams {
                    font: fonts.font_for(style),
                    font_size: fonts.size,
                    font_scale: 1.0,
                    color: text_color(style.color),
                    ..Default::default()
                };
                let px = (origin.x + x).floor();
                let py = (origin.y + y + baseline(settings)).floor();
                draw_text_ex(text, px, py, params());
                if style.bold {
                    draw_text_ex(text, px + 1.0, py, params());
                }
            }
            DrawOp::Icon { x, y, name, .. } => {
                let Some(texture) = icons.get(name) else {
                    log::debug!("No icon texture named '{}'", name);
                    continue;
                };
                draw_texture_ex(
                    texture,
                    (origin.x + x).floor(),
                    (origin.y + y).floor(),
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(settings.icon_size, settings.icon_size)),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

/// Draw quest names: current quests in the normal color, completed ones
/// dimmed below them
pub fn draw_quest_list(
    list: &QuestList,
    book: &QuestBook,
    origin: Vec2,
    fonts: &FontBook,
    config: &JournalConfig,
) {
    let text_y = (config.list_row_height * 0.5 + fonts.size as f32 * 0.35).round();
    for row in list.rows(config.list_row_height) {
        let Some(quest) = book.get(row.id) else {
            continue;
        };
        let color = if row.completed {
            disabled_color()
        } else {
            text_color(TextColor::default())
        };
        let font = fonts.default.as_ref();
        // names wider than the row are squeezed horizontally to fit
        let width = measure_text(&quest.name, font, fonts.size, 1.0).width;
        let font_scale_aspect = if width > config.list_width {
            config.list_width / width
        } else {
            1.0
        };
        draw_text_ex(
            &quest.name,
            (origin.x + LIST_TEXT_INSET).floor(),
            (origin.y + row.y + text_y).floor(),
            TextParams {
                font,
                font_size: fonts.size,
                font_scale: 1.0,
                font_scale_aspect,
                color,
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color_uses_palette() {
        let color = text_color(TextColor::Indexed(2));
        assert_eq!(color, Color::from_rgba(255, 128, 128, 255));
        let color = text_color(TextColor::Rgb(10, 20, 30));
        assert_eq!(color, Color::from_rgba(10, 20, 30, 255));
    }

    #[test]
    fn test_disabled_color_is_translucent_normal() {
        assert_eq!(disabled_color(), Color::from_rgba(255, 255, 255, 128));
    }
}
