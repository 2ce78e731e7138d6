//! Quest book: every quest plus the current/completed partitions

use serde::{Deserialize, Serialize};

use crate::error::JournalError;

use super::quest::Quest;

/// Quest reference as used by event scripts: an id or an exact name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestKey {
    Id(usize),
    Name(String),
}

impl From<usize> for QuestKey {
    fn from(id: usize) -> Self {
        QuestKey::Id(id)
    }
}

impl From<&str> for QuestKey {
    fn from(name: &str) -> Self {
        QuestKey::Name(name.to_string())
    }
}

impl From<String> for QuestKey {
    fn from(name: String) -> Self {
        QuestKey::Name(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestBook {
    quests: Vec<Quest>,
    /// Ids of known, open quests
    current: Vec<usize>,
    /// Ids of known, completed quests
    completed: Vec<usize>,
}

impl QuestBook {
    /// Build a book; ids are reassigned to match list order
    pub fn from_quests(quests: Vec<Quest>) -> Self {
        let quests = quests
            .into_iter()
            .enumerate()
            .map(|(id, quest)| Quest { id, ..quest })
            .collect();
        let mut book = Self {
            quests,
            current: Vec::new(),
            completed: Vec::new(),
        };
        book.sort_quests();
        book
    }

    /// Book for a fresh game. The first quest starts discovered so the
    /// journal always has something to show.
    pub fn new_game(quests: Vec<Quest>) -> Result<Self, JournalError> {
        let mut book = Self::from_quests(quests);
        book.discover_quest(0)?;
        Ok(book)
    }

    pub fn lookup(&self, key: impl Into<QuestKey>) -> Result<&Quest, JournalError> {
        let index = self.index_of(&key.into())?;
        Ok(&self.quests[index])
    }

    fn index_of(&self, key: &QuestKey) -> Result<usize, JournalError> {
        match key {
            QuestKey::Id(id) if *id < self.quests.len() => Ok(*id),
            QuestKey::Id(id) => Err(JournalError::InvalidQuestId(*id)),
            QuestKey::Name(name) => self
                .quests
                .iter()
                .position(|q| &q.name == name)
                .ok_or_else(|| JournalError::quest_not_found(name)),
        }
    }

    /// Find the quest, apply `change`, then re-sort. Failures are logged and
    /// returned; the lists are re-sorted either way.
    fn make_change(
        &mut self,
        key: QuestKey,
        change: impl FnOnce(&mut Quest),
    ) -> Result<(), JournalError> {
        let result = self.index_of(&key).map(|index| change(&mut self.quests[index]));
        if let Err(e) = &result {
            log::warn!("Quest change ignored: {}", e);
        }
        self.sort_quests();
        result
    }

    pub fn discover_quest(&mut self, key: impl Into<QuestKey>) -> Result<(), JournalError> {
        self.make_change(key.into(), Quest::discover)
    }

    pub fn set_phase(&mut self, key: impl Into<QuestKey>, phase: usize) -> Result<(), JournalError> {
        self.make_change(key.into(), |quest| quest.set_phase(phase))
    }

    pub fn complete_quest(&mut self, key: impl Into<QuestKey>) -> Result<(), JournalError> {
        self.make_change(key.into(), Quest::complete)
    }

    /// Rebuild the current and completed lists in id order
    pub fn sort_quests(&mut self) {
        self.quests.sort_by_key(|q| q.id);
        self.current = self
            .quests
            .iter()
            .filter(|q| q.is_current())
            .map(|q| q.id)
            .collect();
        self.completed = self
            .quests
            .iter()
            .filter(|q| q.known && q.completed)
            .map(|q| q.id)
            .collect();
    }

    pub fn get(&self, id: usize) -> Option<&Quest> {
        self.quests.get(id)
    }

    pub fn all(&self) -> &[Quest] {
        &self.quests
    }

    pub fn current(&self) -> &[usize] {
        &self.current
    }

    pub fn completed(&self) -> &[usize] {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> QuestBook {
        QuestBook::new_game(vec![
            Quest::new(0, "Main Story", vec!["Begin.".into(), "Continue.".into()]),
            Quest::new(0, "The Lost Ring", vec!["Find the ring.".into()]),
            Quest::new(0, "Slime Trouble", vec!["Clear the cave.".into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_game_discovers_first_quest() {
        let book = book();
        assert_eq!(book.current(), &[0]);
        assert!(book.completed().is_empty());
        assert_eq!(book.get(2).map(|q| q.id), Some(2));
    }

    #[test]
    fn test_new_game_needs_a_quest() {
        let err = QuestBook::new_game(Vec::new()).unwrap_err();
        assert!(matches!(err, JournalError::InvalidQuestId(0)));
    }

    #[test]
    fn test_changes_by_name_and_id() {
        let mut book = book();
        book.discover_quest("Slime Trouble").unwrap();
        book.discover_quest(1).unwrap();
        assert_eq!(book.current(), &[0, 1, 2]);

        book.complete_quest("The Lost Ring").unwrap();
        assert_eq!(book.current(), &[0, 2]);
        assert_eq!(book.completed(), &[1]);

        book.set_phase(0, 1).unwrap();
        assert_eq!(book.lookup(0).unwrap().current_info(), Some("Continue."));
    }

    #[test]
    fn test_completed_but_unknown_is_hidden() {
        let mut book = book();
        book.complete_quest(2).unwrap();
        assert!(book.completed().is_empty());
        assert_eq!(book.current(), &[0]);
    }

    #[test]
    fn test_unknown_keys() {
        let mut book = book();
        assert!(matches!(book.discover_quest(7), Err(JournalError::InvalidQuestId(7))));
        assert!(matches!(
            book.complete_quest("Dragon"),
            Err(JournalError::QuestNotFound(name)) if name == "Dragon"
        ));
        assert_eq!(book.current(), &[0]);
    }
}
