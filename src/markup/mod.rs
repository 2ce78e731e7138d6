//! Quest text markup
//!
//! Authored quest text carries backslash escape codes (`\c[2]`, `\n[1]`,
//! `\dii[4]`, ...). [`expand`] resolves every reference and rewrites the
//! display codes into a canonical stream where each directive is a single
//! reserved control character, optionally followed by a bracketed argument.
//! The layout engine reads that stream back through [`tokens`].

pub mod expand;
pub mod lookup;

pub use expand::expand;
pub use lookup::{DataCategory, DataEntry, Lookup, SystemWord, Tables};

// ============================================================================
// Control Codes
// ============================================================================

/// Reserved control characters of the canonical token stream.
///
/// The whole `U+0001..=U+0008` range is reserved; codes 2 and 8 have no
/// directive assigned and are skipped by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// Indexed text color, argument `[0-7]`
    Color,
    Reserved2,
    /// Explicit color, argument `[RRGGBB]`
    HexColor,
    /// Toggle bold
    Bold,
    /// Toggle italic
    Italic,
    /// Font family, argument `[name]` (empty name restores the default)
    Font,
    /// Inline icon, argument `[icon name]`
    Icon,
    Reserved8,
}

impl ControlCode {
    pub const fn as_char(self) -> char {
        match self {
            ControlCode::Color => '\u{1}',
            ControlCode::Reserved2 => '\u{2}',
            ControlCode::HexColor => '\u{3}',
            ControlCode::Bold => '\u{4}',
            ControlCode::Italic => '\u{5}',
            ControlCode::Font => '\u{6}',
            ControlCode::Icon => '\u{7}',
            ControlCode::Reserved8 => '\u{8}',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\u{1}' => Some(ControlCode::Color),
            '\u{2}' => Some(ControlCode::Reserved2),
            '\u{3}' => Some(ControlCode::HexColor),
            '\u{4}' => Some(ControlCode::Bold),
            '\u{5}' => Some(ControlCode::Italic),
            '\u{6}' => Some(ControlCode::Font),
            '\u{7}' => Some(ControlCode::Icon),
            '\u{8}' => Some(ControlCode::Reserved8),
            _ => None,
        }
    }

    /// Whether the code is followed by a bracketed argument
    pub fn takes_argument(self) -> bool {
        matches!(
            self,
            ControlCode::Color | ControlCode::HexColor | ControlCode::Font | ControlCode::Icon
        )
    }

    /// Build the canonical directive text for this code
    pub fn directive(self, arg: Option<&str>) -> String {
        match arg {
            Some(arg) => format!("{}[{}]", self.as_char(), arg),
            None => self.as_char().to_string(),
        }
    }
}

// ============================================================================
// Token Stream Reader
// ============================================================================

/// One unit of the canonical stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A printable character
    Glyph(char),
    /// An explicit line break
    Newline,
    /// A control code and its argument. `arg` is `None` for codes without
    /// arguments, and for argument codes whose bracket is missing or
    /// unterminated.
    Directive { code: ControlCode, arg: Option<&'a str> },
}

/// Read the token starting at byte offset `pos`, returning it together with
/// the offset just past it.
pub(crate) fn next_token(text: &str, pos: usize) -> Option<(Token<'_>, usize)> {
    let rest = text.get(pos..)?;
    let c = rest.chars().next()?;
    let after = pos + c.len_utf8();

    if c == '\n' {
        return Some((Token::Newline, after));
    }

    let Some(code) = ControlCode::from_char(c) else {
        return Some((Token::Glyph(c), after));
    };

    if !code.takes_argument() {
        return Some((Token::Directive { code, arg: None }, after));
    }

    let tail = &text[after..];
    if let Some(inner) = tail.strip_prefix('[') {
        if let Some(end) = inner.find(']') {
            let arg = &inner[..end];
            // '[' + arg + ']'
            let next = after + 1 + end + 1;
            return Some((Token::Directive { code, arg: Some(arg) }, next));
        }
    }

    Some((Token::Directive { code, arg: None }, after))
}

/// Iterator over the tokens of a canonical stream
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, next) = next_token(self.text, self.pos)?;
        self.pos = next;
        Some(token)
    }
}

/// Tokenize a canonical stream
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Remove every directive, leaving only printable text and line breaks.
/// Directives have no visual width, so this is what gets measured.
pub fn strip_directives(text: &str) -> String {
    tokens(text)
        .filter_map(|token| match token {
            Token::Glyph(c) => Some(c),
            Token::Newline => Some('\n'),
            Token::Directive { .. } => None,
        })
        .collect()
}
