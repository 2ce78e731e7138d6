//! Errors raised by the journal layer
//!
//! Rendering never fails; only quest bookkeeping and file loading do.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("the quest id provided ({0}) is not valid; check that the quest exists and that the id is correct")]
    InvalidQuestId(usize),

    #[error("the quest name '{0}' was not found; check that the quest exists and that the spelling is correct")]
    QuestNotFound(String),

    #[error("unable to find the quest file {path:?}{hint}", hint = suggestion_hint(.suggestions))]
    QuestFileNotFound {
        path: PathBuf,
        suggestions: Vec<PathBuf>,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("quest file {0:?} contains no quests")]
    NoQuests(PathBuf),

    #[error("failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl JournalError {
    /// Unknown quest name, with line breaks made visible
    pub fn quest_not_found(name: &str) -> Self {
        JournalError::QuestNotFound(name.replace('\n', "<line break>"))
    }
}

fn suggestion_hint(suggestions: &[PathBuf]) -> String {
    if suggestions.is_empty() {
        return "; no similarly named files were found".to_string();
    }
    let list = suggestions
        .iter()
        .map(|p| format!("\"{}\"", p.display()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("; similarly named files: {}", list)
}
