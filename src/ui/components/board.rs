use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Widget};
use rust_i18n::t;

use crate::engine::board::{BOARD_COLUMNS, CellMark, board_rows};
use crate::engine::tracker::ProgressState;
use crate::ui::theme::Theme;

pub struct Board<'a> {
    state: &'a ProgressState,
    theme: &'a Theme,
}

impl<'a> Board<'a> {
    pub fn new(state: &'a ProgressState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

fn centered_x(area: Rect, text: &str) -> u16 {
    let width = Span::raw(text).width() as u16;
    area.x + area.width.saturating_sub(width) / 2
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("ui.board_title")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = board_rows();
        let cell_w = inner.width / BOARD_COLUMNS as u16;
        let cell_h = inner.height / rows.len() as u16;
        if cell_w < 4 || cell_h == 0 {
            return;
        }

        for (r, row) in rows.iter().enumerate() {
            for (c, &day) in row.iter().enumerate() {
                let cell = Rect::new(
                    inner.x + c as u16 * cell_w,
                    inner.y + r as u16 * cell_h,
                    cell_w,
                    cell_h,
                );
                // One column gap between cells.
                let fill = Rect::new(cell.x, cell.y, cell.width.saturating_sub(1), cell.height);
                let mark = self.state.cell_mark(day);

                let mut style = Style::default().fg(colors.fg()).bg(colors.cell(mark));
                if mark == CellMark::Current {
                    style = style.add_modifier(Modifier::BOLD);
                }
                buf.set_style(fill, style);

                let symbol = mark.symbol();
                let number = day.to_string();
                if fill.height >= 2 {
                    let top = fill.y + (fill.height - 2) / 2;
                    buf.set_string(centered_x(fill, symbol), top, symbol, style);
                    buf.set_string(centered_x(fill, &number), top + 1, &number, style);
                } else {
                    let label = format!("{symbol}{number}");
                    buf.set_string(centered_x(fill, &label), fill.y, &label, style);
                }
            }
        }
    }
}
