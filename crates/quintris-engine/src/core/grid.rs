use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::OutOfBoundsError;

use super::piece::PieceKind;

/// Cell matrix of the playing field.
///
/// Each cell holds an integer colour value: `0` is empty, a positive value is
/// an occupied cell. Activations keep values within
/// `0..=`[`Grid::MAX_CELL_VALUE`]; [`Grid::set`] itself stores whatever the
/// caller provides and leaves the range to them.
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell
/// - Columns increase rightward, rows increase downward
/// - Accessors take `(column, row)` order
///
/// # Example
///
/// ```
/// use quintris_engine::Grid;
///
/// let mut grid = Grid::new(5, 5);
/// grid.set(2, 3, 7)?;
/// assert_eq!(grid.get(2, 3)?, 7);
/// assert!(grid.get(5, 0).is_err());
/// # Ok::<(), quintris_engine::OutOfBoundsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "10741,00000,..." (one hex digit per cell, rows separated
        // by commas, top row first)
        let mut hex_string = String::with_capacity(self.rows * (self.columns + 1));
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                hex_string.push(',');
            }
            for cell in row {
                write!(&mut hex_string, "{cell:x}").unwrap();
            }
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let mut columns = 0;
        let mut rows = 0;
        let mut cells = Vec::new();
        for (i, part) in s.split(',').enumerate() {
            if i == 0 {
                columns = part.len();
            } else if part.len() != columns {
                return Err(serde::de::Error::custom(format!(
                    "row {i} has {} cells, expected {columns}",
                    part.len()
                )));
            }
            for ch in part.chars() {
                let value = ch.to_digit(16).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell digit at row {i}: {ch:?}"))
                })?;
                cells.push(u8::try_from(value).expect("a hex digit fits in u8"));
            }
            rows = i + 1;
        }
        if columns == 0 {
            return Err(serde::de::Error::custom("grid must have at least one column"));
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }
}

impl Grid {
    /// Board width of the original game.
    pub const DEFAULT_COLUMNS: usize = 5;
    /// Board height of the original game.
    pub const DEFAULT_ROWS: usize = 5;

    /// Value of an empty cell.
    pub const EMPTY_CELL: u8 = 0;
    /// Highest colour value a cell can take; activation wraps past it.
    #[expect(clippy::cast_possible_truncation)]
    pub const MAX_CELL_VALUE: u8 = PieceKind::LEN as u8;

    /// Creates an empty grid with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        assert!(columns > 0 && rows > 0, "grid dimensions must be nonzero");
        Self {
            columns,
            rows,
            cells: vec![Self::EMPTY_CELL; columns * rows],
        }
    }

    /// Returns the grid width in cells.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the grid height in cells.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Length of every candidate line: the shorter of the two dimensions.
    #[must_use]
    pub fn line_length(&self) -> usize {
        self.columns.min(self.rows)
    }

    /// Returns the value of the cell at `(column, row)`.
    pub fn get(&self, column: usize, row: usize) -> Result<u8, OutOfBoundsError> {
        Ok(self.cells[self.index(column, row)?])
    }

    /// Stores `value` in the cell at `(column, row)`.
    pub fn set(&mut self, column: usize, row: usize, value: u8) -> Result<(), OutOfBoundsError> {
        let index = self.index(column, row)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Whether the cell holds a piece colour (any nonzero value).
    pub fn is_occupied(&self, column: usize, row: usize) -> Result<bool, OutOfBoundsError> {
        Ok(self.get(column, row)? != Self::EMPTY_CELL)
    }

    /// Empties every cell, keeping the dimensions.
    pub fn reset(&mut self) {
        self.cells.fill(Self::EMPTY_CELL);
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.columns)
    }

    fn index(&self, column: usize, row: usize) -> Result<usize, OutOfBoundsError> {
        if column >= self.columns || row >= self.rows {
            return Err(OutOfBoundsError::new(column, row, self.columns, self.rows));
        }
        Ok(row * self.columns + column)
    }

    /// Creates a `Grid` from ASCII art representation for testing.
    /// '.' represents an empty cell, a hex digit its colour value.
    /// Rows are specified from top to bottom and must share one width.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(!lines.is_empty(), "ASCII art must contain at least one row");

        let mut columns = 0;
        let mut cells = Vec::new();
        for (y, line) in lines.iter().enumerate() {
            let mut width = 0;
            for ch in line.trim().chars() {
                let value = match ch {
                    '.' => 0,
                    _ => ch
                        .to_digit(16)
                        .unwrap_or_else(|| panic!("invalid cell character {ch:?} at row {y}")),
                };
                cells.push(u8::try_from(value).expect("a hex digit fits in u8"));
                width += 1;
            }
            if y == 0 {
                columns = width;
            } else {
                assert_eq!(
                    width, columns,
                    "each row must have exactly {columns} cells, got {width} at row {y}"
                );
            }
        }

        Self {
            columns,
            rows: lines.len(),
            cells,
        }
    }
}
