use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::engine::tracker::{Outcome, ProgressState};
use crate::ui::theme::Theme;

pub struct HistorySidebar<'a> {
    state: &'a ProgressState,
    theme: &'a Theme,
}

impl<'a> HistorySidebar<'a> {
    pub fn new(state: &'a ProgressState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for HistorySidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("ui.history_title")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.history.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                t!("ui.history_empty").to_string(),
                Style::default().fg(colors.text_dim()),
            )))
            .render(inner, buf);
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                t!("status.total_achieved", count = self.state.achieved_count()).to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let visible = (inner.height as usize).saturating_sub(lines.len());
        for (day, outcome) in self.state.history_desc().into_iter().take(visible) {
            let (icon, label, color) = match outcome {
                Outcome::Achieved => ("✅", t!("ui.outcome_achieved"), colors.success()),
                Outcome::Failed => ("❌", t!("ui.outcome_failed"), colors.error()),
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{icon} ")),
                Span::styled(
                    format!("{} ", t!("ui.reward_day", day = day)),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(label.to_string(), Style::default().fg(color)),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
