use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::{AnswerFeedback, QuestionView};
use crate::ui::sanitize;
use crate::ui::theme::Theme;

pub fn feedback_text(feedback: &AnswerFeedback) -> String {
    if feedback.is_correct {
        "정답!".to_string()
    } else {
        format!("오답! 정답: {}", sanitize(&feedback.correct_answer))
    }
}

pub struct QuizPanel<'a> {
    question: &'a QuestionView,
    cursor: usize,
    feedback: Option<&'a AnswerFeedback>,
    grid: bool,
    theme: &'a Theme,
}

impl<'a> QuizPanel<'a> {
    pub fn new(
        question: &'a QuestionView,
        cursor: usize,
        feedback: Option<&'a AnswerFeedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            cursor,
            feedback,
            grid: false,
            theme,
        }
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    fn option_style(&self, i: usize, option: &str) -> Style {
        let colors = &self.theme.colors;
        match self.feedback {
            Some(fb) if option == fb.correct_answer => Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
            Some(fb) if option == fb.selected => Style::default()
                .fg(colors.error())
                .add_modifier(Modifier::CROSSED_OUT),
            Some(_) => Style::default().fg(colors.reading()),
            None if i == self.cursor => Style::default()
                .fg(colors.accent())
                .bg(colors.selected_bg())
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(colors.fg()),
        }
    }

    fn option_rects(&self, area: Rect) -> Vec<Rect> {
        let n = self.question.options.len();
        if n == 0 {
            return Vec::new();
        }
        if self.grid && n > 2 {
            let rows = n.div_ceil(2);
            let row_rects = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(3); rows])
                .split(area);
            row_rects
                .iter()
                .flat_map(|row| {
                    Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(*row)
                        .to_vec()
                })
                .take(n)
                .collect()
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(3); n])
                .split(area)
                .to_vec()
        }
    }
}

impl Widget for QuizPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" 문제 {} ", self.question.progress_label))
            .title_bottom(Line::from(format!(" 맞힌 수 {} ", self.question.score_label)).right_aligned())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            sanitize(&self.question.prompt_text),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        if let Some(reading) = &self.question.prompt_reading {
            Paragraph::new(Line::from(Span::styled(
                format!("({})", sanitize(reading)),
                Style::default().fg(colors.reading()),
            )))
            .alignment(Alignment::Center)
            .render(layout[2], buf);
        }

        let rects = self.option_rects(layout[4]);
        for (i, (option, rect)) in self.question.options.iter().zip(rects).enumerate() {
            let style = self.option_style(i, option);
            let text = format!("{}. {}", i + 1, sanitize(option));
            Paragraph::new(Line::from(Span::styled(text, style)))
                .block(Block::bordered().border_style(Style::default().fg(colors.border())))
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }

        if let Some(fb) = self.feedback {
            let color = if fb.is_correct { colors.success() } else { colors.error() };
            Paragraph::new(Line::from(Span::styled(
                feedback_text(fb),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[5], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuestionView {
        QuestionView {
            prompt_text: "水".to_string(),
            prompt_reading: Some("みず".to_string()),
            options: vec!["물".into(), "불".into(), "나무".into(), "흙".into()],
            correct_answer: "물".to_string(),
            progress_label: "1/4".to_string(),
            score_label: "0/0".to_string(),
        }
    }

    // Wide glyphs leave a blank trailing cell; drop blanks before matching.
    fn buffer_text(buf: &Buffer) -> String {
        buf.content()
            .iter()
            .map(|c| c.symbol())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    #[test]
    fn feedback_messages() {
        let right = AnswerFeedback {
            is_correct: true,
            correct_answer: "물".into(),
            selected: "물".into(),
        };
        let wrong = AnswerFeedback {
            is_correct: false,
            correct_answer: "물".into(),
            selected: "불".into(),
        };
        assert_eq!(feedback_text(&right), "정답!");
        assert_eq!(feedback_text(&wrong), "오답! 정답: 물");
    }

    #[test]
    fn renders_prompt_and_reading() {
        let theme = Theme::default();
        let q = question();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        QuizPanel::new(&q, 0, None, &theme).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("みず"));
        assert!(text.contains("1/4"));
    }

    #[test]
    fn grid_places_four_options_in_two_rows() {
        let theme = Theme::default();
        let q = question();
        let panel = QuizPanel::new(&q, 0, None, &theme).grid(true);
        let rects = panel.option_rects(Rect::new(0, 0, 80, 6));
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0].y, rects[1].y);
        assert!(rects[2].y > rects[0].y);
    }
}
