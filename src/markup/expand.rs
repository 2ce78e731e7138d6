//! Markup expansion
//!
//! Rewrites authored quest text into the canonical token stream. Rules run
//! in a fixed order and later rules rely on earlier ones having run:
//!
//! 1. `\\` becomes `/`
//! 2. `\v[N]` variables, repeated until the text stops changing
//! 3. `\n[N]` actor names
//! 4. `\np[N]` party member names
//! 5. `\g` gold amount and currency word
//! 6. `\br` line breaks
//! 7. `\c[#RRGGBB]`, `\c[N]`, `\fb`, `\fi`, `\fn[name]`, `\icon[name]` directives
//! 8. `\da[N]`, `\di[N]`, `\ds[N]`, `\dw[N]` data entries (and their `i` icon forms)
//! 9. `\w..` system words, most specific code first

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::lookup::{DataCategory, Lookup, SystemWord};
use super::ControlCode;

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\v\[(\d+)\]").expect("variable pattern should compile"));

type Handler = fn(&Captures<'_>, &dyn Lookup) -> String;

enum Replacement {
    Handler(Handler),
    Word(SystemWord),
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, handler: Handler) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("markup pattern should compile"),
            replacement: Replacement::Handler(handler),
        }
    }

    fn word(word: SystemWord) -> Self {
        let pattern = format!(r"\\{}", regex::escape(word.code()));
        Self {
            name: word.as_str(),
            pattern: Regex::new(&pattern).expect("word pattern should compile"),
            replacement: Replacement::Word(word),
        }
    }

    fn apply(&self, text: &str, lookup: &dyn Lookup) -> String {
        match &self.replacement {
            Replacement::Handler(handler) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| handler(caps, lookup))
                .into_owned(),
            Replacement::Word(word) => {
                let value = strip_control_codes(&lookup.system_word(*word));
                self.pattern
                    .replace_all(text, regex::NoExpand(&value))
                    .into_owned()
            }
        }
    }
}

/// Steps 3 through 9, in application order
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = vec![
        Rule::new("actor", r"\\n\[(\d+)\]", actor_name),
        Rule::new("party", r"\\np\[(\d+)\]", party_member_name),
        Rule::new("gold", r"\\g", gold),
        Rule::new("break", r"\\br", |_, _| "\n".to_string()),
        Rule::new("hex color", r"\\c\[#([0-9A-Fa-f]{6})\]", |caps, _| {
            ControlCode::HexColor.directive(Some(&caps[1]))
        }),
        Rule::new("color", r"\\c\[(\d+)\]", |caps, _| {
            ControlCode::Color.directive(Some(&caps[1]))
        }),
        Rule::new("malformed color", r"\\c\[[^\]\n]*\]", |_, _| String::new()),
        Rule::new("bold", r"\\fb", |_, _| ControlCode::Bold.directive(None)),
        Rule::new("italic", r"\\fi", |_, _| ControlCode::Italic.directive(None)),
        Rule::new("font", r"\\fn\[([^\]\n]*)\]", |caps, _| {
            ControlCode::Font.directive(Some(&caps[1]))
        }),
        Rule::new("icon", r"\\icon\[([^\]\n]*)\]", |caps, _| {
            ControlCode::Icon.directive(Some(&caps[1]))
        }),
        Rule::new("data entry", r"\\d([aisw])(i?)\[(\d+)\]", data_entry),
    ];
    rules.extend(SystemWord::ORDERED.into_iter().map(Rule::word));
    rules
});

/// Drop control characters from host-supplied values so game data is
/// always literal text
fn strip_control_codes(text: &str) -> String {
    text.chars()
        .filter(|&c| ControlCode::from_char(c).is_none())
        .collect()
}

fn parse_id(caps: &Captures<'_>, group: usize) -> Option<usize> {
    caps.get(group)?.as_str().parse().ok()
}

fn actor_name(caps: &Captures<'_>, lookup: &dyn Lookup) -> String {
    parse_id(caps, 1)
        .and_then(|id| lookup.actor_name(id))
        .map(|name| strip_control_codes(&name))
        .unwrap_or_default()
}

fn party_member_name(caps: &Captures<'_>, lookup: &dyn Lookup) -> String {
    parse_id(caps, 1)
        .and_then(|position| lookup.party_member_name(position))
        .map(|name| strip_control_codes(&name))
        .unwrap_or_default()
}

fn gold(_: &Captures<'_>, lookup: &dyn Lookup) -> String {
    format!("{}  {}", lookup.gold(), strip_control_codes(&lookup.gold_word()))
}

fn data_entry(caps: &Captures<'_>, lookup: &dyn Lookup) -> String {
    let category = caps[1].chars().next().and_then(DataCategory::from_code);
    let with_icon = !caps[2].is_empty();

    let entry = category
        .zip(parse_id(caps, 3))
        .and_then(|(category, id)| lookup.data_entry(category, id));

    match entry {
        Some(entry) if with_icon => format!(
            "{}  {}",
            ControlCode::Icon.directive(Some(&strip_control_codes(&entry.icon_name))),
            strip_control_codes(&entry.name)
        ),
        Some(entry) => strip_control_codes(&entry.name),
        None => String::new(),
    }
}

/// Substitute `\v[N]` until a pass changes nothing.
///
/// Nested references (`\v[\v[1]]`, or a variable whose value is itself a
/// `\v[..]` code) resolve over successive passes. A set of texts already seen
/// stops substitution cycles that oscillate between states; a cycle that
/// grows the text on every pass is not detected and will not terminate.
fn resolve_variables(text: String, lookup: &dyn Lookup) -> String {
    let mut current = text;
    let mut seen = HashSet::new();

    loop {
        let next = VARIABLE_RE
            .replace_all(&current, |caps: &Captures<'_>| {
                parse_id(caps, 1)
                    .and_then(|id| lookup.variable(id))
                    .map(|value| strip_control_codes(&value))
                    .unwrap_or_default()
            })
            .into_owned();

        if next == current {
            return current;
        }
        if !seen.insert(current) {
            log::warn!("Variable substitution cycle in quest text, stopping at {:?}", next);
            return next;
        }
        current = next;
    }
}

/// Expand authored quest text into the canonical token stream.
///
/// Never fails: references that cannot be resolved expand to nothing and
/// malformed color codes are dropped. Control characters already in `raw`
/// are kept, so expanding canonical text again leaves it unchanged.
pub fn expand(raw: &str, lookup: &dyn Lookup) -> String {
    let text = raw.replace("\\\\", "/");
    let mut text = resolve_variables(text, lookup);

    for rule in RULES.iter() {
        if rule.pattern.is_match(&text) {
            log::trace!("Applying markup rule '{}'", rule.name);
            text = rule.apply(&text, lookup);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::lookup::{DataEntry, Tables};

    fn tables() -> Tables {
        Tables::new()
            .with_gold(500)
            .with_word(SystemWord::Gold, "G")
            .with_actor(3, "Aria")
            .with_party(&["Aluxes", "Basil"])
            .with_entry(DataCategory::Item, 1, DataEntry::new("Potion", "021-Potion01"))
            .with_entry(DataCategory::Weapon, 4, DataEntry::new("Mythril Sword", "001-Weapon01"))
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = "Find the lost ring near the old well, then return.";
        assert_eq!(expand(text, &tables()), text);
        assert_eq!(expand("", &tables()), "");
    }

    #[test]
    fn test_gold() {
        assert_eq!(expand("\\g", &tables()), "500  G");
    }

    #[test]
    fn test_actor_name() {
        assert_eq!(expand("\\n[3]", &tables()), "Aria");
        assert_eq!(expand("\\n[4]", &tables()), "");
        assert_eq!(expand("\\n[99999999999999999999999]", &tables()), "");
    }

    #[test]
    fn test_party_member_name() {
        assert_eq!(expand("\\np[2] waits.", &tables()), "Basil waits.");
        assert_eq!(expand("\\np[5] waits.", &tables()), " waits.");
    }

    #[test]
    fn test_escaped_backslash_becomes_slash() {
        assert_eq!(expand("a\\\\n[3]", &tables()), "a/n[3]");
    }

    #[test]
    fn test_nested_variables() {
        let lookup = tables().with_variable(1, 5).with_variable(5, "forty");
        assert_eq!(expand("\\v[\\v[1]]", &lookup), "forty");

        let lookup = tables().with_variable(1, "\\v[2]").with_variable(2, 7);
        assert_eq!(expand("Count: \\v[1]", &lookup), "Count: 7");
    }

    #[test]
    fn test_variable_referencing_actor() {
        let lookup = tables().with_variable(1, 3);
        assert_eq!(expand("\\n[\\v[1]]", &lookup), "Aria");
    }

    #[test]
    fn test_variable_cycle_terminates() {
        let lookup = tables()
            .with_variable(1, "\\v[2]")
            .with_variable(2, "\\v[1]");
        let out = expand("\\v[1]", &lookup);
        assert!(out == "\\v[1]" || out == "\\v[2]");

        let lookup = tables().with_variable(1, "\\v[1]");
        assert_eq!(expand("\\v[1]", &lookup), "\\v[1]");
    }

    #[test]
    fn test_line_break() {
        assert_eq!(expand("one\\brtwo", &tables()), "one\ntwo");
    }

    #[test]
    fn test_color_directives() {
        assert_eq!(
            expand("\\c[2]Hello\\c[0]", &tables()),
            "\u{1}[2]Hello\u{1}[0]"
        );
        assert_eq!(expand("\\c[#FF8000]x", &tables()), "\u{3}[FF8000]x");
    }

    #[test]
    fn test_malformed_color_is_removed() {
        assert_eq!(expand("a\\c[abc]b", &tables()), "ab");
        assert_eq!(expand("a\\c[#12345]b", &tables()), "ab");
    }

    #[test]
    fn test_unterminated_code_stays_literal() {
        assert_eq!(expand("\\c[2 oops", &tables()), "\\c[2 oops");
    }

    #[test]
    fn test_style_directives() {
        assert_eq!(
            expand("\\fbBold\\fb \\fiSlant\\fi", &tables()),
            "\u{4}Bold\u{4} \u{5}Slant\u{5}"
        );
        assert_eq!(expand("\\fn[Arial]", &tables()), "\u{6}[Arial]");
        assert_eq!(expand("\\icon[038-Item07]", &tables()), "\u{7}[038-Item07]");
    }

    #[test]
    fn test_data_entries() {
        assert_eq!(expand("Bring a \\di[1].", &tables()), "Bring a Potion.");
        assert_eq!(
            expand("\\dwi[4]", &tables()),
            "\u{7}[001-Weapon01]  Mythril Sword"
        );
        assert_eq!(expand("[\\da[9]]", &tables()), "[]");
        assert_eq!(expand("[\\dsi[9]]", &tables()), "[]");
    }

    #[test]
    fn test_system_words_specific_before_general() {
        let lookup = tables()
            .with_word(SystemWord::Armor1, "Shield")
            .with_word(SystemWord::Attack, "Attack")
            .with_word(SystemWord::Agi, "AGI")
            .with_word(SystemWord::Atk, "ATK")
            .with_word(SystemWord::Guard, "Defend")
            .with_word(SystemWord::Int, "INT")
            .with_word(SystemWord::Item, "Item");

        assert_eq!(expand("\\warm1", &lookup), "Shield");
        assert_eq!(expand("\\wa \\watk \\wagi", &lookup), "Attack ATK AGI");
        assert_eq!(expand("\\wgu \\wg", &lookup), "Defend G");
        assert_eq!(expand("\\wint/\\wi", &lookup), "INT/Item");
    }

    #[test]
    fn test_lookup_values_are_literal_text() {
        let lookup = Tables::new()
            .with_actor(1, "Ar\u{4}ia\u{1}[2]")
            .with_variable(1, "x\u{7}[gem]y")
            .with_word(SystemWord::Gold, "G\u{5}")
            .with_entry(DataCategory::Item, 1, DataEntry::new("Po\u{3}tion", "po\u{6}tion"));

        assert_eq!(expand("\\n[1]", &lookup), "Aria[2]");
        assert_eq!(expand("\\v[1]", &lookup), "x[gem]y");
        assert_eq!(expand("\\wg", &lookup), "G");
        assert_eq!(expand("\\dii[1]", &lookup), "\u{7}[potion]  Potion");
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let raw = "\\c[3]\\n[3]\\c[0] needs \\dii[1] and \\g\\br\\fbhurry\\fb";
        let once = expand(raw, &tables());
        assert_eq!(expand(&once, &tables()), once);
        assert_eq!(
            once,
            "\u{1}[3]Aria\u{1}[0] needs \u{7}[021-Potion01]  Potion and 500  G\n\u{4}hurry\u{4}"
        );
    }
}
