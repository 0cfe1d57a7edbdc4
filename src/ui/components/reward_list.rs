use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::engine::tracker::ProgressState;
use crate::ui::theme::Theme;

pub struct RewardList<'a> {
    state: &'a ProgressState,
    selected: usize,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> RewardList<'a> {
    pub fn new(state: &'a ProgressState, selected: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            selected,
            compact: false,
            theme,
        }
    }

    /// Render every reward on a single line of slot markers.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn compact_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let spans: Vec<Span> = self
            .state
            .rewards
            .iter()
            .enumerate()
            .map(|(i, (day, reward))| {
                let (mark, color) = if reward.checked {
                    ("✓", colors.success())
                } else if self.state.can_claim(day) {
                    ("○", colors.fg())
                } else {
                    ("·", colors.text_dim())
                };
                let mut style = Style::default().fg(color);
                if i == self.selected {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Span::styled(format!(" {}:{day}{mark} ", i + 1), style)
            })
            .collect();
        Line::from(spans)
    }
}

impl Widget for RewardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("ui.rewards_title")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.compact {
            Paragraph::new(self.compact_line()).render(inner, buf);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for (i, (day, reward)) in self.state.rewards.iter().enumerate() {
            let is_selected = i == self.selected;
            let claimable = self.state.can_claim(day);
            let indicator = if is_selected { ">" } else { " " };
            let check = if reward.checked { "[x]" } else { "[ ]" };

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });
            let check_style = Style::default().fg(if reward.checked {
                colors.success()
            } else if claimable {
                colors.fg()
            } else {
                colors.text_dim()
            });

            lines.push(Line::from(vec![
                Span::styled(format!("{indicator}[{}] ", i + 1), label_style),
                Span::styled(t!("ui.reward_day", day = day).to_string(), label_style),
            ]));

            let detail = if reward.has_name() {
                Span::styled(
                    format!("    {check} {}", t!("ui.reward_get", name = reward.name.as_str())),
                    check_style,
                )
            } else {
                Span::styled(
                    format!("    {}", t!("ui.reward_placeholder")),
                    Style::default().fg(colors.text_dim()),
                )
            };
            lines.push(Line::from(detail));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
