use crate::Grid;

/// Cell-clear credit for simultaneous line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 credit
/// - 1 line: 5 credit
/// - 2 lines: 9 credit
/// - 3 lines: 13 credit
/// - 4 lines: 17 credit
///
/// Five or more simultaneous lines fall outside the table and award no
/// credit.
const CELL_CREDIT_TABLE: [usize; 5] = [0, 5, 9, 13, 17];

/// One candidate line on the grid.
///
/// Candidate lines are geometry-independent: the first `N` rows, the first
/// `N` columns, and the two `N`-length diagonals, where `N` is the grid's
/// [`line_length`](Grid::line_length). Every candidate line is exactly `N`
/// cells long, so on a non-square grid a candidate row covers only its first
/// `N` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Horizontal line through the given row.
    Row(usize),
    /// Vertical line through the given column.
    Column(usize),
    /// Top-left to bottom-right diagonal.
    DiagonalMain,
    /// Bottom-left to top-right diagonal.
    DiagonalAnti,
}

impl Line {
    /// Returns the `(column, row)` coordinates covered by this line.
    pub fn cells(self, length: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..length).map(move |i| match self {
            Line::Row(row) => (i, row),
            Line::Column(column) => (column, i),
            Line::DiagonalMain => (i, i),
            Line::DiagonalAnti => (i, length - 1 - i),
        })
    }
}

/// Enumerates every candidate line for the given line length: rows top to
/// bottom, then columns left to right, then the two diagonals.
pub fn candidate_lines(length: usize) -> impl Iterator<Item = Line> {
    (0..length)
        .map(Line::Row)
        .chain((0..length).map(Line::Column))
        .chain([Line::DiagonalMain, Line::DiagonalAnti])
}

/// Result of one line-clear pass over the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearReport {
    lines: Vec<Line>,
    cell_credit: usize,
}

impl ClearReport {
    /// Number of lines cleared in this pass.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The cleared lines, in sweep order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Credit used by scoring in place of the literal cleared-cell count.
    #[must_use]
    pub const fn cell_credit(&self) -> usize {
        self.cell_credit
    }

    /// Whether the pass cleared nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Scans the grid and returns every complete candidate line, in sweep order.
#[must_use]
pub fn completed_lines(grid: &Grid) -> Vec<Line> {
    let length = grid.line_length();
    candidate_lines(length)
        .filter(|line| is_complete(grid, *line, length))
        .collect()
}

fn is_complete(grid: &Grid, line: Line, length: usize) -> bool {
    line.cells(length).all(|(column, row)| {
        grid.is_occupied(column, row)
            .expect("candidate line cells lie inside the grid")
    })
}

/// Clears every complete line and reports what was cleared.
///
/// Completeness is judged against the grid as it stands before any clearing,
/// so lines sharing cells clear independently and each completed line counts
/// on its own.
pub fn clear_full_lines(grid: &mut Grid) -> ClearReport {
    let lines = completed_lines(grid);
    let length = grid.line_length();
    for line in &lines {
        for (column, row) in line.cells(length) {
            grid.set(column, row, Grid::EMPTY_CELL)
                .expect("candidate line cells lie inside the grid");
        }
    }
    let cell_credit = CELL_CREDIT_TABLE
        .get(lines.len())
        .copied()
        .unwrap_or_default();
    ClearReport { lines, cell_credit }
}
