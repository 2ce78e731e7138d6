//! Reference resolution for markup expansion
//!
//! The expander never touches game state directly; everything it substitutes
//! comes through the [`Lookup`] trait. [`Tables`] is a plain in-memory
//! implementation for tools and tests.

use std::collections::HashMap;

/// Data table a `\d` code points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    Armor,
    Item,
    Skill,
    Weapon,
}

impl DataCategory {
    /// Category for the letter used in `\da`, `\di`, `\ds`, `\dw`
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'a' => Some(DataCategory::Armor),
            'i' => Some(DataCategory::Item),
            's' => Some(DataCategory::Skill),
            'w' => Some(DataCategory::Weapon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Armor => "armor",
            DataCategory::Item => "item",
            DataCategory::Skill => "skill",
            DataCategory::Weapon => "weapon",
        }
    }
}

/// A database entry as far as quest text is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub name: String,
    pub icon_name: String,
}

impl DataEntry {
    pub fn new(name: &str, icon_name: &str) -> Self {
        Self {
            name: name.to_string(),
            icon_name: icon_name.to_string(),
        }
    }
}

// ============================================================================
// System Words
// ============================================================================

/// Terms from the system word table, substituted by `\w` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemWord {
    Gold,
    Hp,
    Sp,
    Str,
    Dex,
    Agi,
    Int,
    Atk,
    Pdef,
    Mdef,
    Weapon,
    Armor1,
    Armor2,
    Armor3,
    Armor4,
    Attack,
    Skill,
    Guard,
    Item,
    Equip,
}

impl SystemWord {
    /// Every word in substitution order. A code that is a prefix of another
    /// (`\wa` of `\watk`, `\wagi`, `\warm1`) comes after it.
    pub const ORDERED: [SystemWord; 20] = [
        SystemWord::Armor1,
        SystemWord::Armor2,
        SystemWord::Armor3,
        SystemWord::Armor4,
        SystemWord::Atk,
        SystemWord::Agi,
        SystemWord::Attack,
        SystemWord::Guard,
        SystemWord::Gold,
        SystemWord::Hp,
        SystemWord::Sp,
        SystemWord::Str,
        SystemWord::Skill,
        SystemWord::Dex,
        SystemWord::Int,
        SystemWord::Item,
        SystemWord::Pdef,
        SystemWord::Mdef,
        SystemWord::Weapon,
        SystemWord::Equip,
    ];

    /// Escape code in authored text, without the leading backslash
    pub fn code(&self) -> &'static str {
        match self {
            SystemWord::Gold => "wg",
            SystemWord::Hp => "whp",
            SystemWord::Sp => "wsp",
            SystemWord::Str => "wstr",
            SystemWord::Dex => "wdex",
            SystemWord::Agi => "wagi",
            SystemWord::Int => "wint",
            SystemWord::Atk => "watk",
            SystemWord::Pdef => "wpdef",
            SystemWord::Mdef => "wmdef",
            SystemWord::Weapon => "wweap",
            SystemWord::Armor1 => "warm1",
            SystemWord::Armor2 => "warm2",
            SystemWord::Armor3 => "warm3",
            SystemWord::Armor4 => "warm4",
            SystemWord::Attack => "wa",
            SystemWord::Skill => "ws",
            SystemWord::Guard => "wgu",
            SystemWord::Item => "wi",
            SystemWord::Equip => "we",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemWord::Gold => "gold",
            SystemWord::Hp => "hp",
            SystemWord::Sp => "sp",
            SystemWord::Str => "str",
            SystemWord::Dex => "dex",
            SystemWord::Agi => "agi",
            SystemWord::Int => "int",
            SystemWord::Atk => "atk",
            SystemWord::Pdef => "pdef",
            SystemWord::Mdef => "mdef",
            SystemWord::Weapon => "weapon",
            SystemWord::Armor1 => "armor1",
            SystemWord::Armor2 => "armor2",
            SystemWord::Armor3 => "armor3",
            SystemWord::Armor4 => "armor4",
            SystemWord::Attack => "attack",
            SystemWord::Skill => "skill",
            SystemWord::Guard => "guard",
            SystemWord::Item => "item",
            SystemWord::Equip => "equip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ORDERED.iter().copied().find(|w| w.as_str() == s)
    }
}

// ============================================================================
// Lookup Trait
// ============================================================================

/// Read-only view of the host state that quest text can reference.
///
/// Absent values are `None` and expand to an empty string.
pub trait Lookup {
    /// Current value of game variable `id`, formatted for display
    fn variable(&self, id: usize) -> Option<String>;

    /// Name of actor `id`
    fn actor_name(&self, id: usize) -> Option<String>;

    /// Name of the party member at 1-indexed `position`
    fn party_member_name(&self, position: usize) -> Option<String>;

    fn gold(&self) -> i64;

    fn data_entry(&self, category: DataCategory, id: usize) -> Option<DataEntry>;

    fn system_word(&self, word: SystemWord) -> String;

    /// Currency label shown after the gold amount
    fn gold_word(&self) -> String {
        self.system_word(SystemWord::Gold)
    }
}

/// In-memory lookup tables
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub variables: HashMap<usize, String>,
    pub actors: HashMap<usize, String>,
    /// Party in marching order
    pub party: Vec<String>,
    pub gold: i64,
    pub entries: HashMap<(DataCategory, usize), DataEntry>,
    pub words: HashMap<SystemWord, String>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, id: usize, value: impl ToString) -> Self {
        self.variables.insert(id, value.to_string());
        self
    }

    pub fn with_actor(mut self, id: usize, name: &str) -> Self {
        self.actors.insert(id, name.to_string());
        self
    }

    pub fn with_party(mut self, members: &[&str]) -> Self {
        self.party = members.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_entry(mut self, category: DataCategory, id: usize, entry: DataEntry) -> Self {
        self.entries.insert((category, id), entry);
        self
    }

    pub fn with_word(mut self, word: SystemWord, text: &str) -> Self {
        self.words.insert(word, text.to_string());
        self
    }
}

impl Lookup for Tables {
    fn variable(&self, id: usize) -> Option<String> {
        self.variables.get(&id).cloned()
    }

    fn actor_name(&self, id: usize) -> Option<String> {
        self.actors.get(&id).cloned()
    }

    fn party_member_name(&self, position: usize) -> Option<String> {
        position
            .checked_sub(1)
            .and_then(|index| self.party.get(index))
            .cloned()
    }

    fn gold(&self) -> i64 {
        self.gold
    }

    fn data_entry(&self, category: DataCategory, id: usize) -> Option<DataEntry> {
        self.entries.get(&(category, id)).cloned()
    }

    fn system_word(&self, word: SystemWord) -> String {
        self.words.get(&word).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_order_specific_before_general() {
        let ordered = SystemWord::ORDERED;
        for (i, earlier) in ordered.iter().enumerate() {
            for later in &ordered[i + 1..] {
                assert!(
                    !later.code().starts_with(earlier.code()),
                    "\\{} must be substituted after \\{}",
                    earlier.code(),
                    later.code()
                );
            }
        }
    }

    #[test]
    fn test_word_table_is_complete() {
        let mut codes: Vec<_> = SystemWord::ORDERED.iter().map(|w| w.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 20);
        assert_eq!(SystemWord::from_str("armor3"), Some(SystemWord::Armor3));
        assert_eq!(SystemWord::from_str("mana"), None);
    }

    #[test]
    fn test_party_is_one_indexed() {
        let tables = Tables::new().with_party(&["Aluxes", "Basil"]);
        assert_eq!(tables.party_member_name(1), Some("Aluxes".to_string()));
        assert_eq!(tables.party_member_name(2), Some("Basil".to_string()));
        assert_eq!(tables.party_member_name(0), None);
        assert_eq!(tables.party_member_name(3), None);
    }

    #[test]
    fn test_gold_word_defaults_to_system_word() {
        let tables = Tables::new().with_word(SystemWord::Gold, "G");
        assert_eq!(tables.gold_word(), "G");
    }
}
