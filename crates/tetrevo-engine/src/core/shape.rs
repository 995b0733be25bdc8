use crate::{BoardError, GameConfig, StepError};

use super::{
    board::Board,
    piece::{Direction, ShapeKind, Turn, rotated_cells},
};

/// Outcome of a single gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropStep {
    /// The shape moved down one row.
    Descended,
    /// The shape reached its resting position and was written into the board.
    Placed,
    /// The shape could not be written because it would rest above the
    /// ceiling. The caller treats this as game over.
    Rejected,
}

/// The active falling piece.
///
/// A shape goes through two states: falling (position and orientation are
/// mutable through the collision-guarded commands) and placed (terminal, no
/// further mutation). The drop distance is memoized and invalidated by any
/// move or rotation; a gravity step only decrements it.
///
/// Shapes do not hold a board reference. Every query and mutation takes the
/// board explicitly, so each game instance stays a self-contained unit.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    cells: Vec<Vec<u8>>,
    x: i32,
    y: i32,
    drop_cache: Option<i32>,
    placed: bool,
}

impl Shape {
    /// Creates the shape at the spawn position (middle column, top row).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(kind: ShapeKind, config: &GameConfig) -> Self {
        Self {
            kind,
            cells: kind.spawn_cells(),
            x: config.cols as i32 / 2,
            y: config.rows as i32 - 1,
            drop_cache: None,
            placed: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// The cell matrix after a quarter turn, without mutating the shape.
    #[must_use]
    pub fn rotated(&self, turn: Turn) -> Vec<Vec<u8>> {
        rotated_cells(&self.cells, turn)
    }

    /// Rows the shape can still descend; memoized until the next move.
    pub fn drop_distance(&mut self, board: &Board) -> Result<i32, BoardError> {
        if let Some(distance) = self.drop_cache {
            return Ok(distance);
        }
        let distance = board.distance_to_collision(&self.cells, self.x, self.y)?;
        self.drop_cache = Some(distance);
        Ok(distance)
    }

    /// Moves one column sideways if the target position is free.
    ///
    /// Returns whether the shape moved. A successful move invalidates the
    /// memoized drop distance.
    pub fn shift(&mut self, board: &Board, direction: Direction) -> bool {
        if self.placed {
            return false;
        }
        if board.has_collision(&self.cells, self.x + direction.dx(), self.y) {
            return false;
        }
        self.x += direction.dx();
        self.drop_cache = None;
        true
    }

    /// Rotates in place if the turned footprint is free.
    ///
    /// Returns whether the shape turned. A successful turn invalidates the
    /// memoized drop distance.
    pub fn turn(&mut self, board: &Board, turn: Turn) -> bool {
        if self.placed {
            return false;
        }
        let rotated = self.rotated(turn);
        if board.has_collision(&rotated, self.x, self.y) {
            return false;
        }
        self.cells = rotated;
        self.drop_cache = None;
        true
    }

    /// One gravity step: descend while distance remains, commit otherwise.
    pub fn step_down(&mut self, board: &mut Board) -> Result<DropStep, StepError> {
        if self.placed {
            return Err(StepError::AlreadyPlaced);
        }
        let distance = self.drop_distance(board)?;
        if distance > 0 {
            self.y -= 1;
            self.drop_cache = Some(distance - 1);
            Ok(DropStep::Descended)
        } else if self.place(board)? {
            Ok(DropStep::Placed)
        } else {
            Ok(DropStep::Rejected)
        }
    }

    /// Drops the shape the remaining distance and writes it into the board.
    ///
    /// Returns whether the board accepted it; `false` means the shape would
    /// rest above the ceiling and nothing was written.
    pub fn place(&mut self, board: &mut Board) -> Result<bool, BoardError> {
        let placed = board.place(&self.cells, self.x, self.y, self.drop_cache)?;
        self.placed = placed;
        Ok(placed)
    }
}
