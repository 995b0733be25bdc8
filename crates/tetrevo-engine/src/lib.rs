pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

/// Failure of a board or column operation.
///
/// Bounds violations on queries propagate to the caller so that search code
/// can reject out-of-range candidates explicitly. The cell variants signal a
/// structural invariant violation (a write into an occupied cell or a removal
/// of an empty one) and indicate a logic bug upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// A query or placement referenced a row above the top of the grid.
    #[display("row {row} is outside the board")]
    RowOutOfRange { row: i32 },
    /// A query or placement referenced a column outside the grid.
    #[display("column {col} is outside the board")]
    ColumnOutOfRange { col: i32 },
    /// A column write targeted a cell that already holds a value.
    #[display("cell at row {row} is already occupied")]
    CellOccupied { row: usize },
    /// A column removal targeted a cell that holds no value.
    #[display("cell at row {row} is already empty")]
    CellEmpty { row: usize },
}

/// Failure of a drop step on a falling shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StepError {
    /// The shape has been written into the board and must not move again.
    #[display("shape is already placed")]
    AlreadyPlaced,
    #[display("{_0}")]
    Board(#[from] BoardError),
}
