//! Greedy word wrap over the canonical token stream

use crate::markup::{tokens, Token};

use super::measure::TextMeasure;
use super::style::TextStyle;

/// Insert line breaks so no line is wider than `max_width`.
///
/// Existing line breaks are kept; each line is wrapped on its own and words
/// are rejoined with single spaces. Directives are atomic: they stick to the
/// word they touch and have no width. Each run of text is measured in the
/// style active at that point, starting from `style`. A word that is wider
/// than `max_width` by itself gets a line of its own and is allowed to
/// overflow.
pub fn wrap<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    measure: &M,
    style: &TextStyle,
) -> String {
    let mut style = style.clone();
    text.split('\n')
        .map(|line| wrap_line(line, max_width, measure, &mut style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split on whitespace outside directives. A directive argument may itself
/// contain spaces.
fn words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    for token in tokens(line) {
        match token {
            Token::Glyph(c) if c.is_whitespace() => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            Token::Glyph(c) => word.push(c),
            Token::Newline => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            Token::Directive { code, arg } => word.push_str(&code.directive(arg)),
        }
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}

/// Printable width of `text` starting in `style`
fn styled_width<M: TextMeasure + ?Sized>(text: &str, style: &TextStyle, measure: &M) -> f32 {
    let mut style = style.clone();
    let mut run = String::new();
    let mut width = 0.0;
    for token in tokens(text) {
        match token {
            Token::Glyph(c) => run.push(c),
            Token::Newline => {}
            Token::Directive { code, arg } => {
                if !run.is_empty() {
                    width += measure.measure(&run, &style);
                    run.clear();
                }
                style.apply(code, arg);
            }
        }
    }
    if !run.is_empty() {
        width += measure.measure(&run, &style);
    }
    width
}

/// Style in effect after the directives in `text`
fn style_after(text: &str, style: &TextStyle) -> TextStyle {
    let mut style = style.clone();
    for token in tokens(text) {
        if let Token::Directive { code, arg } = token {
            style.apply(code, arg);
        }
    }
    style
}

fn wrap_line<M: TextMeasure + ?Sized>(
    line: &str,
    max_width: f32,
    measure: &M,
    style: &mut TextStyle,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();
    let mut line_style = style.clone();

    for word in words(line) {
        let test_line = if current_line.is_empty() {
            word.clone()
        } else {
            format!("{} {}", current_line, word)
        };

        let line_width = styled_width(&test_line, &line_style, measure);
        if line_width > max_width && !current_line.is_empty() {
            line_style = style_after(&current_line, &line_style);
            lines.push(std::mem::replace(&mut current_line, word));
        } else {
            current_line = test_line;
        }
    }

    *style = style_after(&current_line, &line_style);

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::FixedWidth;

    fn wrap4(text: &str, max_width: f32) -> String {
        wrap(text, max_width, &FixedWidth::new(4.0), &TextStyle::default())
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        assert_eq!(wrap4("one two three", 30.0), "one two\nthree");
    }

    #[test]
    fn test_lines_fit_width() {
        let text = "the quick brown fox jumps over the lazy dog near the river bank";
        let measure = FixedWidth::new(4.0);
        for line in wrap4(text, 60.0).lines() {
            assert!(measure.measure(line, &TextStyle::default()) <= 60.0, "{line:?}");
        }
    }

    #[test]
    fn test_long_word_overflows_on_own_line() {
        assert_eq!(wrap4("a extraordinarily b", 20.0), "a\nextraordinarily\nb");
    }

    #[test]
    fn test_explicit_breaks_are_preserved() {
        assert_eq!(wrap4("one\n\ntwo three", 100.0), "one\n\ntwo three");
        assert_eq!(wrap4("one two\nthree four", 30.0), "one two\nthree\nfour");
        assert_eq!(wrap4("a\n", 30.0), "a\n");
    }

    #[test]
    fn test_directives_have_no_width() {
        let text = "\u{1}[2]one\u{1}[0] \u{4}two\u{4}";
        assert_eq!(wrap4(text, 28.0), text);
    }

    #[test]
    fn test_collapses_runs_of_spaces() {
        assert_eq!(wrap4("  one   two  ", 100.0), "one two");
    }

    #[test]
    fn test_spaced_directive_argument_stays_whole() {
        let text = "\u{6}[Times New Roman]Hi there";
        assert_eq!(wrap4(text, 30.0), "\u{6}[Times New Roman]Hi\nthere");
        assert_eq!(wrap4(text, 40.0), text);
        assert_eq!(
            wrap4("go \u{7}[old key] now", 8.0),
            "go\n\u{7}[old key]\nnow"
        );
    }

    #[test]
    fn test_unterminated_bracket_is_measured_as_text() {
        // no closing bracket, so "[x y ab" is printable text
        assert_eq!(wrap4("\u{1}[x y ab", 24.0), "\u{1}[x y\nab");
    }

    /// Bold glyphs are twice as wide as regular ones
    struct BoldWide;

    impl TextMeasure for BoldWide {
        fn measure(&self, text: &str, style: &TextStyle) -> f32 {
            let advance = if style.bold { 8.0 } else { 4.0 };
            text.chars().count() as f32 * advance
        }
    }

    #[test]
    fn test_runs_measured_in_active_style() {
        let style = TextStyle::default();
        // regular "ab cd" is 20 wide, bold is 40
        assert_eq!(wrap("ab cd", 30.0, &BoldWide, &style), "ab cd");
        assert_eq!(wrap("\u{4}ab cd", 30.0, &BoldWide, &style), "\u{4}ab\ncd");
        assert_eq!(wrap("ab \u{4}c\u{4}d", 30.0, &BoldWide, &style), "ab \u{4}c\u{4}d");
    }

    #[test]
    fn test_style_carries_across_lines() {
        let style = TextStyle::default();
        assert_eq!(
            wrap("\u{4}ab\nab cd", 30.0, &BoldWide, &style),
            "\u{4}ab\nab\ncd"
        );
        assert_eq!(
            wrap("\u{4}aaa bbb cc dd", 36.0, &BoldWide, &style),
            "\u{4}aaa\nbbb\ncc\ndd"
        );
    }
}
