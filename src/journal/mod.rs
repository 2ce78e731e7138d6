//! Quest Journal
//!
//! Quest bookkeeping plus the two panel states: the quest list on the left
//! and the formatted info text of the highlighted quest on the right.

pub mod book;
pub mod list;
pub mod loader;
pub mod quest;

pub use book::{QuestBook, QuestKey};
pub use list::{ListRow, QuestList};
pub use loader::{find_similar_files, load_quest_file, parse_quests, QUEST_BREAK};
pub use quest::Quest;

use crate::config::JournalConfig;
use crate::layout::{DrawOp, RenderCache, TextMeasure};
use crate::markup::{expand, Lookup};

/// Journal screen state, independent of windowing and input
pub struct Journal {
    pub book: QuestBook,
    pub config: JournalConfig,
    list: QuestList,
    cache: RenderCache,
}

impl Journal {
    pub fn new(book: QuestBook, config: JournalConfig) -> Self {
        Self {
            book,
            config,
            list: QuestList::new(),
            cache: RenderCache::new(),
        }
    }

    pub fn list(&self) -> &QuestList {
        &self.list
    }

    /// Refresh the list from the book and lay out the highlighted quest
    pub fn open<M: TextMeasure + ?Sized>(&mut self, lookup: &dyn Lookup, measure: &M) {
        self.book.sort_quests();
        if self.config.show_all_quests {
            let all: Vec<usize> = self.book.all().iter().map(|q| q.id).collect();
            self.list.set_quests(&all, &[]);
        } else {
            self.list
                .set_quests(self.book.current(), self.book.completed());
        }
        self.refresh_info(lookup, measure);
    }

    /// Expanded markup of the highlighted quest's current phase
    pub fn selected_info_text(&self, lookup: &dyn Lookup) -> Option<String> {
        let quest = self.book.get(self.list.selected_id()?)?;
        quest.current_info().map(|info| expand(info, lookup))
    }

    pub fn select<M: TextMeasure + ?Sized>(
        &mut self,
        index: usize,
        lookup: &dyn Lookup,
        measure: &M,
    ) -> bool {
        let moved = self.list.select(index);
        if moved {
            self.refresh_info(lookup, measure);
        }
        moved
    }

    pub fn select_next<M: TextMeasure + ?Sized>(&mut self, lookup: &dyn Lookup, measure: &M) -> bool {
        self.select(self.list.index() + 1, lookup, measure)
    }

    pub fn select_prev<M: TextMeasure + ?Sized>(&mut self, lookup: &dyn Lookup, measure: &M) -> bool {
        self.select(self.list.index().saturating_sub(1), lookup, measure)
    }

    /// Draw operations for the info panel
    pub fn info_ops(&self) -> &[DrawOp] {
        self.cache.ops()
    }

    fn refresh_info<M: TextMeasure + ?Sized>(&mut self, lookup: &dyn Lookup, measure: &M) {
        match self.selected_info_text(lookup) {
            Some(text) => {
                self.cache
                    .refresh(&text, self.config.info_width, measure, &self.config.render);
            }
            None => self.cache.clear(),
        }
    }
}
