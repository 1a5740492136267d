use quintris_engine::{GamePiece, Grid, PATTERN_SIZE};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

#[expect(clippy::cast_possible_truncation)]
const PATTERN_SIDE: u16 = PATTERN_SIZE as u16;

/// Renders one piece in its current rotation, for the piece previews.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: GamePiece,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: GamePiece) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PATTERN_SIDE * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        PATTERN_SIDE * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let pattern_area = area.centered(
            Constraint::Length(PATTERN_SIDE * CellDisplay::width()),
            Constraint::Length(PATTERN_SIDE * CellDisplay::height()),
        );

        let col_constraints = (0..PATTERN_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..PATTERN_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = pattern_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_cell = CellDisplay::from_value(Grid::EMPTY_CELL, false);
        let occupied_cell = CellDisplay::from_kind(self.piece.kind());
        let pattern = self.piece.pattern();

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if pattern[y][x] {
                    Widget::render(&occupied_cell, grid_cell, buf);
                } else {
                    Widget::render(&empty_cell, grid_cell, buf);
                }
            }
        }
    }
}
