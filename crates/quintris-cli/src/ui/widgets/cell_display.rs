use quintris_engine::{Grid, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{color, style};

/// Renders one grid cell as a coloured 2x1 patch.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// Cell for a raw grid value. Empty cells show a dim dot on the board
    /// and nothing in piece previews.
    pub fn from_value(value: u8, dotted_empty: bool) -> Self {
        if value == Grid::EMPTY_CELL {
            if dotted_empty {
                return Self::new(style::EMPTY_DOT, ".");
            }
            return Self::new(style::EMPTY, "");
        }
        match PieceKind::from_index(usize::from(value - 1)) {
            Ok(kind) => Self::from_kind(kind),
            Err(_) => Self::new(style::EMPTY, ""),
        }
    }

    pub fn from_kind(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::Line => style::LINE_CELL,
            PieceKind::C => style::C_CELL,
            PieceKind::Plus => style::PLUS_CELL,
            PieceKind::Dot => style::DOT_CELL,
            PieceKind::Square => style::SQUARE_CELL,
            PieceKind::L => style::L_CELL,
            PieceKind::J => style::J_CELL,
            PieceKind::S => style::S_CELL,
            PieceKind::Z => style::Z_CELL,
            PieceKind::T => style::T_CELL,
            PieceKind::X => style::X_CELL,
            PieceKind::Corner => style::CORNER_CELL,
            PieceKind::Hook => style::HOOK_CELL,
            PieceKind::Diagonal => style::DIAGONAL_CELL,
            PieceKind::U => style::U_CELL,
        };
        Self::new(style, "")
    }

    /// Marks this cell as the aim cursor. The marker ink is white over
    /// empty cells and black over coloured ones.
    pub fn aimed(self) -> Self {
        let fg = if self.style.bg == Some(color::BLACK) {
            color::WHITE
        } else {
            color::BLACK
        };
        Self {
            style: self.style.fg(fg),
            symbol: "[]",
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
