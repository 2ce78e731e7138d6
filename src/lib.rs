//! Quest journal with an RPG-style rich-text markup
//!
//! Raw quest text carries backslash escape codes (`\c[2]`, `\n[1]`, `\wa`,
//! `\icon[potion]`, ...). [`markup::expand`] resolves them against game
//! data into a canonical control-code stream, [`layout`] wraps and lays
//! that stream out as draw operations, and [`present`] executes them with
//! macroquad.

pub mod config;
pub mod error;
pub mod journal;
pub mod layout;
pub mod markup;
pub mod present;

pub use config::JournalConfig;
pub use error::JournalError;
pub use journal::{Journal, Quest, QuestBook, QuestKey, QuestList};
pub use layout::{render, wrap, DrawOp, FixedWidth, RenderSettings, TextMeasure, TextStyle};
pub use markup::{expand, DataCategory, DataEntry, Lookup, SystemWord, Tables};
