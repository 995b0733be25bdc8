use serde::{Deserialize, Serialize};

/// Horizontal movement direction for a falling shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Quarter-turn rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// The seven tetromino kinds.
///
/// Each kind resolves once, at construction, to a static table entry holding
/// its spawn cell matrix, display character, cell tag, and the number of
/// distinct orientations reachable by rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [ShapeKind; ShapeKind::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Nonzero cell tag written into the board for this kind.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::T => 3,
            ShapeKind::J => 4,
            ShapeKind::L => 5,
            ShapeKind::S => 6,
            ShapeKind::Z => 7,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
        }
    }

    /// Number of distinct orientations the placement search has to sweep.
    ///
    /// The O piece looks the same in every orientation; I, S and Z repeat
    /// after a half turn; T, J and L need all four.
    #[must_use]
    pub const fn distinct_rotations(self) -> usize {
        match self {
            ShapeKind::O => 1,
            ShapeKind::I | ShapeKind::S | ShapeKind::Z => 2,
            ShapeKind::T | ShapeKind::J | ShapeKind::L => 4,
        }
    }

    /// Spawn-orientation cell matrix in column-major form.
    ///
    /// `cells[dx][dy]` is the cell `dx` columns right of the anchor and `dy`
    /// rows below it; 0 is empty, any other value is the kind's tag.
    #[must_use]
    pub fn spawn_cells(self) -> Vec<Vec<u8>> {
        self.base_cells().iter().map(|col| col.to_vec()).collect()
    }

    const fn base_cells(self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => &[&[1], &[1], &[1], &[1]],
            ShapeKind::O => &[&[2, 2], &[2, 2]],
            ShapeKind::T => &[&[3, 0], &[3, 3], &[3, 0]],
            ShapeKind::J => &[&[0, 0, 4], &[4, 4, 4]],
            ShapeKind::L => &[&[5, 5, 5], &[0, 0, 5]],
            ShapeKind::S => &[&[0, 6], &[6, 6], &[6, 0]],
            ShapeKind::Z => &[&[7, 0], &[7, 7], &[0, 7]],
        }
    }
}

/// Rotates a column-major cell matrix by a quarter turn.
///
/// Pure transform: the input is left untouched and a new matrix with swapped
/// dimensions is returned.
#[must_use]
pub fn rotated_cells(cells: &[Vec<u8>], turn: Turn) -> Vec<Vec<u8>> {
    let width = cells.len();
    let height = cells.first().map_or(0, Vec::len);
    match turn {
        Turn::Right => (0..height)
            .map(|i| (0..width).map(|j| cells[width - 1 - j][i]).collect())
            .collect(),
        Turn::Left => (0..height)
            .map(|i| (0..width).map(|j| cells[j][height - 1 - i]).collect())
            .collect(),
    }
}
