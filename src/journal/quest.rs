//! A single quest and its phase text

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: usize,
    pub name: String,
    /// Index into `phases` of the text currently shown
    pub phase: usize,
    /// Discovered quests appear in the journal
    pub known: bool,
    pub completed: bool,
    /// Authored markup for each phase, in order
    pub phases: Vec<String>,
}

impl Quest {
    pub fn new(id: usize, name: &str, phases: Vec<String>) -> Self {
        Self {
            id,
            name: name.to_string(),
            phase: 0,
            known: false,
            completed: false,
            phases,
        }
    }

    pub fn discover(&mut self) {
        self.known = true;
    }

    pub fn set_phase(&mut self, phase: usize) {
        self.phase = phase;
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Markup for the current phase, if the phase has any text
    pub fn current_info(&self) -> Option<&str> {
        self.phases.get(self.phase).map(String::as_str)
    }

    /// Discovered and still open
    pub fn is_current(&self) -> bool {
        self.known && !self.completed
    }
}
