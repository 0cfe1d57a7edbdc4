use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Horizontal bar split into `segments` equal blocks, one per board day.
pub struct ProgressBar<'a> {
    label: String,
    filled: u32,
    segments: u32,
    caption: String,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, filled: u32, segments: u32, caption: String, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            filled: filled.min(segments),
            segments: segments.max(1),
            caption,
            theme,
        }
    }

    /// Width of segment `index` when `width` columns are shared out evenly.
    fn segment_width(&self, index: u32, width: u16) -> u16 {
        let width = width as u32;
        let start = index * width / self.segments;
        let end = (index + 1) * width / self.segments;
        (end - start) as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .title_bottom(Line::from(format!(" {} ", self.caption)).right_aligned())
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let spans: Vec<Span> = (0..self.segments)
            .map(|i| {
                let w = self.segment_width(i, inner.width) as usize;
                let color = if i < self.filled {
                    colors.bar_filled()
                } else {
                    colors.bar_empty()
                };
                // Leave a one-column gap after each segment when there is room.
                let text = if w > 1 {
                    format!("{} ", "█".repeat(w - 1))
                } else {
                    "█".repeat(w)
                };
                Span::styled(text, Style::default().fg(color))
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
