pub mod components;
pub mod layout;
pub mod line_input;
pub mod theme;

/// Strip control characters and terminal escape sequences from text that came
/// from word files or user input, so it cannot move the cursor or recolour the
/// screen when drawn. Tabs and newlines become single spaces.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\u{1b}' => {
                // CSI: ESC [ params final-byte(0x40..=0x7e)
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&c) {
                            break;
                        }
                    }
                } else {
                    chars.next();
                }
            }
            '\t' | '\n' | '\r' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize("ありがとう 감사합니다"), "ありがとう 감사합니다");
    }

    #[test]
    fn escape_sequences_are_removed() {
        assert_eq!(sanitize("\u{1b}[31mred\u{1b}[0m"), "red");
        assert_eq!(sanitize("a\u{1b}cb"), "ab");
    }

    #[test]
    fn control_chars_are_removed_or_spaced() {
        assert_eq!(sanitize("a\u{7}b\u{0}c"), "abc");
        assert_eq!(sanitize("line\nbreak\ttab"), "line break tab");
    }

    #[test]
    fn markup_like_text_is_literal() {
        assert_eq!(sanitize("<b>x</b>"), "<b>x</b>");
    }
}
