use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bordered one-row gauge with a caption centred over the bar.
pub struct ProgressBar<'a> {
    pub title: String,
    pub caption: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    /// `done` of `total` steps; caption reads "done/total".
    pub fn from_counts(title: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        let ratio = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        };
        Self {
            title: title.to_string(),
            caption: format!("{done}/{total}"),
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }

    pub fn filled_width(&self, width: u16) -> u16 {
        (self.ratio * width as f64).round() as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = self.filled_width(inner.width);
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let caption_width = self.caption.chars().count() as u16;
        let caption_x = inner.x + inner.width.saturating_sub(caption_width) / 2;
        buf.set_string(caption_x, inner.y, &self.caption, Style::default().fg(colors.fg()));
    }
}
