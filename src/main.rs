use macroquad::prelude::*;

use quest_journal::present::{draw_ops, draw_quest_list, FontBook, IconAtlas};
use quest_journal::{Journal, JournalConfig, QuestBook, Tables};

const LIST_PANEL_WIDTH: f32 = 192.0;
const PANEL_PADDING: f32 = 16.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Quest Journal".to_string(),
        window_width: 640,
        window_height: 480,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
    env_logger::init();

    let config = JournalConfig::load_or_default();
    let quests = match quest_journal::journal::load_quest_file(&config.quest_file) {
        Ok(quests) => quests,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let book = match QuestBook::new_game(quests) {
        Ok(book) => book,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    // No game is attached, so codes resolve against empty tables
    let lookup = Tables::new();
    let fonts = FontBook::new(config.render.font_size);
    let icons = IconAtlas::new();

    let mut journal = Journal::new(book, config);
    journal.open(&lookup, &fonts);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Down) {
            journal.select_next(&lookup, &fonts);
        }
        if is_key_pressed(KeyCode::Up) {
            journal.select_prev(&lookup, &fonts);
        }

        clear_background(Color::from_rgba(24, 28, 44, 255));

        let row_height = journal.config.list_row_height;
        let cursor_y = PANEL_PADDING + journal.list().index() as f32 * row_height;
        draw_rectangle(
            PANEL_PADDING,
            cursor_y,
            LIST_PANEL_WIDTH - PANEL_PADDING * 2.0,
            row_height,
            Color::from_rgba(255, 255, 255, 40),
        );
        draw_quest_list(
            journal.list(),
            &journal.book,
            vec2(PANEL_PADDING, PANEL_PADDING),
            &fonts,
            &journal.config,
        );
        draw_line(
            LIST_PANEL_WIDTH,
            0.0,
            LIST_PANEL_WIDTH,
            screen_height(),
            1.0,
            Color::from_rgba(255, 255, 255, 80),
        );
        draw_ops(
            journal.info_ops(),
            vec2(LIST_PANEL_WIDTH + PANEL_PADDING, PANEL_PADDING),
            &fonts,
            &icons,
            &journal.config.render,
        );

        next_frame().await;
    }
}
