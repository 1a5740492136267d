use quintris_engine::Grid;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Renders the placement grid, optionally with the aim cursor on one cell.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    aim: Option<(usize, usize)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            aim: None,
            block: None,
        }
    }

    pub fn aim(self, aim: (usize, usize)) -> Self {
        Self {
            aim: Some(aim),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let columns = u16::try_from(self.grid.columns()).unwrap_or(u16::MAX);
        columns.saturating_mul(CellDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.grid.rows()).unwrap_or(u16::MAX);
        rows.saturating_mul(CellDisplay::height())
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.columns()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        for (row, row_area) in area.layout_vec(&vertical).into_iter().enumerate() {
            for (column, cell_area) in row_area.layout_vec(&horizontal).into_iter().enumerate() {
                let value = self.grid.get(column, row).unwrap_or(Grid::EMPTY_CELL);
                let mut cell = CellDisplay::from_value(value, true);
                if self.aim == Some((column, row)) {
                    cell = cell.aimed();
                }
                cell.render(cell_area, buf);
            }
        }
    }
}
