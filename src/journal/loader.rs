//! Flat-file quest definitions
//!
//! ```text
//! Quest Name
//!
//! Text for phase 0, may span
//! several lines.
//!
//! Text for phase 1.
//! mobius_quest_break
//!
//! Next Quest
//! ...
//! ```
//!
//! Blank lines separate paragraphs. The first paragraph of a record is the
//! quest name, each following paragraph is one phase. Whitespace inside a
//! phase collapses to single spaces; use `\br` for a hard break.

use std::path::{Path, PathBuf};

use crate::error::JournalError;

use super::quest::Quest;

/// Line that ends each quest record
pub const QUEST_BREAK: &str = "mobius_quest_break";

/// Parse quest definitions. Ids are assigned in file order starting at 0.
pub fn parse_quests(contents: &str) -> Vec<Quest> {
    let contents = contents.replace("\r\n", "\n");

    let mut records: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in contents.split_inclusive('\n') {
        if line.trim() == QUEST_BREAK {
            records.push(&contents[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }

    let trailing = &contents[start..];
    if !trailing.trim().is_empty() {
        log::warn!("Last quest record has no '{}' line, loading it anyway", QUEST_BREAK);
        records.push(trailing);
    }

    records
        .into_iter()
        .filter_map(parse_record)
        .enumerate()
        .map(|(id, (name, phases))| Quest::new(id, &name, phases))
        .collect()
}

fn parse_record(record: &str) -> Option<(String, Vec<String>)> {
    let mut paragraphs = record
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty());

    let name = paragraphs.next()?;
    Some((name, paragraphs.collect()))
}

/// Load quest definitions from `path`.
///
/// A missing file is reported together with any similarly named files
/// found under the working directory.
pub fn load_quest_file(path: &Path) -> Result<Vec<Quest>, JournalError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let suggestions = std::env::current_dir()
                .map(|dir| find_similar_files(&dir, &stem))
                .unwrap_or_default();
            return Err(JournalError::QuestFileNotFound {
                path: path.to_path_buf(),
                suggestions,
            });
        }
        Err(source) => {
            return Err(JournalError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let quests = parse_quests(&contents);
    if quests.is_empty() {
        return Err(JournalError::NoQuests(path.to_path_buf()));
    }

    log::info!("Loaded {} quests from {:?}", quests.len(), path);
    Ok(quests)
}

/// Recursively collect files under `dir` whose name contains `stem`,
/// ignoring case.
pub fn find_similar_files(dir: &Path, stem: &str) -> Vec<PathBuf> {
    fn scan_dir(dir: &Path, needle: &str, matches: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                scan_dir(&path, needle, matches);
            } else if entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .contains(needle)
            {
                matches.push(path);
            }
        }
    }

    let mut matches = Vec::new();
    if stem.is_empty() {
        return matches;
    }
    scan_dir(dir, &stem.to_lowercase(), &mut matches);
    matches.sort();
    matches
}
