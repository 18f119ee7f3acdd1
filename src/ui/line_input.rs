use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::sanitize;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab/BackTab: the caller moves focus elsewhere.
    FocusNext,
    FocusPrev,
}

/// Single-line text field for the participant name and the result e-mail.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    max_chars: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self::with_limit(text, 64)
    }

    pub fn with_limit(text: &str, max_chars: usize) -> Self {
        let text: String = text.chars().take(max_chars).collect();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            max_chars,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    /// Field contents with a block cursor drawn while `focused`.
    pub fn styled_line(&self, focused: bool, theme: &Theme) -> Line<'static> {
        let colors = &theme.colors;
        let text_style = Style::default().fg(colors.fg());
        if !focused {
            return Line::from(Span::styled(sanitize(&self.text), text_style));
        }
        let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
        let (before, at, after) = self.render_parts();
        let at = at.map(|c| sanitize(&c.to_string())).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::styled(sanitize(before), text_style),
            Span::styled(at, cursor_style),
            Span::styled(sanitize(after), text_style),
        ])
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab => return InputResult::FocusNext,
            KeyCode::BackTab => return InputResult::FocusPrev,

            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char_at(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => self.remove_char_at(self.cursor),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl && !ch.is_control() => {
                if self.len() < self.max_chars {
                    let byte_offset = self.char_to_byte(self.cursor);
                    self.text.insert(byte_offset, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn insert_multibyte_at_start_middle_end() {
        let mut input = LineInput::new("김수");
        input.handle(key(KeyCode::Char('진')));
        assert_eq!(input.value(), "김수진");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('*')));
        assert_eq!(input.value(), "*김수진");
        assert_eq!(input.cursor, 1);

        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char(' ')));
        assert_eq!(input.value(), "*김 수진");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn backspace_at_boundaries() {
        let mut input = LineInput::new("가나");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "가");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn delete_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor, 0);

        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut input = LineInput::new("foo bar  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "foo ");

        let mut empty = LineInput::new("");
        empty.handle(ctrl('w'));
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::new("a");
        input.handle(key(KeyCode::Right));
        assert_eq!(input.cursor, 1);
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn ctrl_shortcuts() {
        let mut input = LineInput::new("test");
        input.handle(ctrl('a'));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 4);
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn max_chars_is_enforced() {
        let mut input = LineInput::with_limit("abc", 3);
        input.handle(key(KeyCode::Char('d')));
        assert_eq!(input.value(), "abc");
        let truncated = LineInput::with_limit("abcdef", 4);
        assert_eq!(truncated.value(), "abcd");
    }

    #[test]
    fn render_parts_positions() {
        let mut input = LineInput::new("가나다");
        input.cursor = 1;
        assert_eq!(input.render_parts(), ("가", Some('나'), "다"));
        input.cursor = 3;
        assert_eq!(input.render_parts(), ("가나다", None, ""));
    }

    #[test]
    fn styled_line_shows_cursor_only_when_focused() {
        let theme = Theme::default();
        let input = LineInput::new("ab");
        assert_eq!(input.styled_line(true, &theme).spans.len(), 3);
        assert_eq!(input.styled_line(false, &theme).spans.len(), 1);
    }

    #[test]
    fn control_keys_map_to_results() {
        let mut input = LineInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Tab)), InputResult::FocusNext);
        assert_eq!(input.handle(key(KeyCode::BackTab)), InputResult::FocusPrev);
        assert_eq!(input.value(), "x");
    }
}
