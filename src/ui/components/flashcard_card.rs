use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::flashcard::FlashcardView;
use crate::ui::sanitize;
use crate::ui::theme::Theme;

/// One card: the Japanese side, or the Korean side once flipped.
pub struct FlashcardCard<'a> {
    view: &'a FlashcardView,
    flipped: bool,
    theme: &'a Theme,
}

impl<'a> FlashcardCard<'a> {
    pub fn new(view: &'a FlashcardView, flipped: bool, theme: &'a Theme) -> Self {
        Self {
            view,
            flipped,
            theme,
        }
    }
}

impl Widget for FlashcardCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let side = if self.flipped { " 뒷면 " } else { " 앞면 " };

        let block = Block::bordered()
            .title(side)
            .title_bottom(Line::from(format!(" {} ", self.view.counter_label)).right_aligned())
            .border_style(Style::default().fg(if self.flipped {
                colors.success()
            } else {
                colors.accent()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let (main, sub) = if self.flipped {
            (sanitize(&self.view.back_text), String::new())
        } else {
            let reading = sanitize(&self.view.front_reading);
            let sub = if reading.is_empty() {
                String::new()
            } else {
                format!("({reading})")
            };
            (sanitize(&self.view.front_text), sub)
        };

        Paragraph::new(Line::from(Span::styled(
            main,
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        if !sub.is_empty() {
            Paragraph::new(Line::from(Span::styled(sub, Style::default().fg(colors.reading()))))
                .alignment(Alignment::Center)
                .render(layout[2], buf);
        }
    }
}
