use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::scoring::Rating;
use crate::session::summary::SessionSummary;
use crate::ui::line_input::LineInput;
use crate::ui::sanitize;
use crate::ui::theme::Theme;

/// Where the e-mail step stands, as far as the result screen cares.
pub enum MailStatus<'a> {
    Idle,
    Editing {
        input: &'a LineInput,
        error: Option<&'a str>,
    },
    Sending,
    Done { message: &'a str, failed: bool },
}

pub struct Dashboard<'a> {
    pub summary: &'a SessionSummary,
    pub mail: MailStatus<'a>,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a SessionSummary, mail: MailStatus<'a>, theme: &'a Theme) -> Self {
        Self {
            summary,
            mail,
            theme,
        }
    }

    fn rating_color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.summary.rating {
            Rating::Excellent => colors.success(),
            Rating::Fair => colors.warning(),
            Rating::TryAgain => colors.error(),
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" 결과 ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let who = format!(
            "{} · {} · {}",
            sanitize(&self.summary.participant_name),
            self.summary.direction.label(),
            sanitize(&self.summary.word_set),
        );
        Paragraph::new(Line::from(Span::styled(who, Style::default().fg(colors.reading()))))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let score_line = Line::from(vec![
            Span::styled("점수  ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.score_line(),
                Style::default()
                    .fg(self.rating_color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(score_line)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            self.summary.rating_message(),
            Style::default().fg(self.rating_color()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let mail_line = match &self.mail {
            MailStatus::Idle => Line::from(""),
            MailStatus::Editing { input, error } => {
                let mut spans = vec![Span::styled(
                    "  이메일: ",
                    Style::default().fg(colors.accent()),
                )];
                spans.extend(input.styled_line(true, self.theme).spans);
                if let Some(error) = error {
                    spans.push(Span::styled(
                        format!("  {error}"),
                        Style::default().fg(colors.error()),
                    ));
                }
                Line::from(spans)
            }
            MailStatus::Sending => Line::from(Span::styled(
                "  보내는 중...",
                Style::default().fg(colors.warning()),
            )),
            MailStatus::Done { message, failed } => Line::from(Span::styled(
                format!("  {}", sanitize(message)),
                Style::default().fg(if *failed {
                    colors.error()
                } else {
                    colors.success()
                }),
            )),
        };
        Paragraph::new(mail_line).render(layout[3], buf);

        let help = match self.mail {
            MailStatus::Editing { .. } => "  [Enter] 보내기  [Esc] 취소",
            MailStatus::Sending => "  [r] 다시 도전  [q] 처음으로",
            _ => "  [r] 다시 도전  [m] 메일  [q] 처음으로",
        };
        Paragraph::new(Line::from(Span::styled(help, Style::default().fg(colors.accent()))))
            .render(layout[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Direction as QuizDirection;

    fn render(mail: MailStatus<'_>) -> String {
        let theme = Theme::default();
        let summary = SessionSummary::new(8, 10, "민수", QuizDirection::SourceToTarget, "basic");
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        Dashboard::new(&summary, mail, &theme).render(area, &mut buf);
        buf.content()
            .iter()
            .map(|c| c.symbol())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    #[test]
    fn shows_score_and_help() {
        let text = render(MailStatus::Idle);
        assert!(text.contains("8/10(80%)"));
        assert!(text.contains("[r]"));
    }

    #[test]
    fn editing_shows_address() {
        let input = LineInput::new("a@b.co");
        let text = render(MailStatus::Editing {
            input: &input,
            error: None,
        });
        assert!(text.contains("a@b.co"));
        assert!(text.contains("[Enter]"));
    }
}
