pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cell ({column}, {row}) is outside the {columns}x{rows} grid")]
pub struct OutOfBoundsError {
    column: usize,
    row: usize,
    columns: usize,
    rows: usize,
}

impl OutOfBoundsError {
    pub(crate) fn new(column: usize, row: usize, columns: usize, rows: usize) -> Self {
        Self {
            column,
            row,
            columns,
            rows,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece index {index} is outside the piece catalog")]
pub struct InvalidPieceKindError {
    index: usize,
}

impl InvalidPieceKindError {
    pub(crate) const fn new(index: usize) -> Self {
        Self { index }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("seed must be 32 hexadecimal characters")]
pub struct ParseSeedError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CellActivationError {
    #[display("{_0}")]
    OutOfBounds(OutOfBoundsError),
    #[display("no active game session")]
    SessionNotActive,
}
