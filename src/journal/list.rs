//! Quest list panel state: which quests are listed and which is highlighted

/// One visible row of the quest list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListRow {
    pub id: usize,
    /// Top of the row within the list contents
    pub y: f32,
    /// Completed quests are drawn dimmed below the current ones
    pub completed: bool,
}

/// Current quests first, then completed quests, with a clamped cursor
#[derive(Debug, Clone, Default)]
pub struct QuestList {
    current: Vec<usize>,
    completed: Vec<usize>,
    index: usize,
}

impl QuestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listed quests. Returns false (and keeps the cursor) when
    /// nothing changed.
    pub fn set_quests(&mut self, current: &[usize], completed: &[usize]) -> bool {
        if self.current == current && self.completed == completed {
            return false;
        }
        self.current = current.to_vec();
        self.completed = completed.to_vec();
        self.index = self.index.min(self.item_max() - 1);
        true
    }

    /// Number of selectable rows; never zero so the cursor always has a home
    pub fn item_max(&self) -> usize {
        (self.current.len() + self.completed.len()).max(1)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor, clamped to the list. Returns true if it moved.
    pub fn select(&mut self, index: usize) -> bool {
        let index = index.min(self.item_max() - 1);
        let moved = index != self.index;
        self.index = index;
        moved
    }

    pub fn select_next(&mut self) -> bool {
        self.select(self.index + 1)
    }

    pub fn select_prev(&mut self) -> bool {
        self.select(self.index.saturating_sub(1))
    }

    /// Quest under the cursor, if any quests are listed
    pub fn selected_id(&self) -> Option<usize> {
        if self.index < self.current.len() {
            self.current.get(self.index).copied()
        } else {
            self.completed.get(self.index - self.current.len()).copied()
        }
    }

    pub fn rows(&self, row_height: f32) -> impl Iterator<Item = ListRow> + '_ {
        let current = self.current.iter().map(|&id| (id, false));
        let completed = self.completed.iter().map(|&id| (id, true));
        current
            .chain(completed)
            .enumerate()
            .map(move |(i, (id, completed))| ListRow {
                id,
                y: i as f32 * row_height,
                completed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let list = QuestList::new();
        assert_eq!(list.item_max(), 1);
        assert_eq!(list.selected_id(), None);
        assert_eq!(list.rows(32.0).count(), 0);
    }

    #[test]
    fn test_selection_spans_both_halves() {
        let mut list = QuestList::new();
        assert!(list.set_quests(&[0, 2], &[1]));
        assert_eq!(list.selected_id(), Some(0));
        assert!(list.select_next());
        assert_eq!(list.selected_id(), Some(2));
        assert!(list.select_next());
        assert_eq!(list.selected_id(), Some(1));
        assert!(!list.select_next());
        assert_eq!(list.index(), 2);
        assert!(list.select_prev());
        assert!(list.select(0));
        assert!(!list.select_prev());
    }

    #[test]
    fn test_set_quests_detects_no_change() {
        let mut list = QuestList::new();
        assert!(list.set_quests(&[0, 1], &[]));
        list.select(1);
        assert!(!list.set_quests(&[0, 1], &[]));
        assert_eq!(list.index(), 1);

        assert!(list.set_quests(&[0], &[]));
        assert_eq!(list.index(), 0);
    }

    #[test]
    fn test_rows() {
        let mut list = QuestList::new();
        list.set_quests(&[3], &[1, 2]);
        let rows: Vec<_> = list.rows(32.0).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ListRow { id: 3, y: 0.0, completed: false });
        assert_eq!(rows[2], ListRow { id: 2, y: 64.0, completed: true });
    }
}
