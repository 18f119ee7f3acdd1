use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::SessionMode;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub mode: SessionMode,
    pub label: String,
    pub description: String,
}

/// Mode picker on the start screen.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        let items = SessionMode::ALL
            .iter()
            .enumerate()
            .map(|(i, &mode)| MenuItem {
                key: (i + 1).to_string(),
                mode,
                label: mode_label(mode).to_string(),
                description: mode_description(mode).to_string(),
            })
            .collect();
        Self {
            items,
            selected: 0,
            focused: true,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn select_key(&mut self, key: char) -> bool {
        match self.items.iter().position(|item| item.key.starts_with(key)) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    pub fn selected_mode(&self) -> SessionMode {
        self.items
            .get(self.selected)
            .map(|item| item.mode)
            .unwrap_or(SessionMode::QuizJaKo)
    }
}

pub fn mode_label(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::QuizJaKo => "퀴즈: 일본어 → 한국어",
        SessionMode::QuizKoJa => "퀴즈: 한국어 → 일본어",
        SessionMode::Flashcard => "플래시카드",
    }
}

fn mode_description(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::QuizJaKo => "일본어 단어를 보고 알맞은 뜻을 고르세요",
        SessionMode::QuizKoJa => "한국어 뜻을 보고 알맞은 일본어를 고르세요",
        SessionMode::Flashcard => "카드를 뒤집으며 단어를 익혀요",
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(if self.focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "tango",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "일본어 단어 퀴즈",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let highlight = is_selected && self.focused;

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if highlight { colors.accent() } else { colors.fg() })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.reading()))),
            ];

            if let Some(row) = menu_layout.get(i) {
                Paragraph::new(lines).render(*row, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_mode() {
        let theme = Theme::default();
        let menu = Menu::new(&theme);
        let modes: Vec<SessionMode> = menu.items.iter().map(|i| i.mode).collect();
        assert_eq!(modes, SessionMode::ALL.to_vec());
    }

    #[test]
    fn navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.prev();
        assert_eq!(menu.selected_mode(), SessionMode::Flashcard);
        menu.next();
        assert_eq!(menu.selected_mode(), SessionMode::QuizJaKo);
    }

    #[test]
    fn number_keys_select() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        assert!(menu.select_key('2'));
        assert_eq!(menu.selected_mode(), SessionMode::QuizKoJa);
        assert!(!menu.select_key('9'));
        assert_eq!(menu.selected_mode(), SessionMode::QuizKoJa);
    }
}
