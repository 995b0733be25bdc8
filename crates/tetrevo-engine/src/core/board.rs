use arrayvec::ArrayVec;

use crate::{BoardError, GameConfig};

use super::column::Column;

/// Result of a non-mutating what-if placement evaluation.
///
/// `valid == false` means the shape cannot legally land from the queried
/// position; the remaining fields are then meaningless. This is the normal
/// way the placement search skips a candidate, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionEvaluation {
    pub valid: bool,
    /// Rows that would reach full occupancy.
    pub lines_cleared: u32,
    /// Sum of all column heights after the drop.
    pub total_height: i32,
    /// Sum of all column hole counts after the drop.
    pub hole_count: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: i32,
}

/// The playing grid: one [`Column`] per x position plus a row-fill counter.
///
/// The counter reuses the column structure with cells holding per-row
/// occupancy counts, so full-row removal shares the shift-on-removal logic
/// with the piece columns. Invariant: `row_fill.cells()[r] == cols` exactly
/// when row `r` is full.
///
/// Coordinates are signed so that queries slightly outside the grid (used by
/// collision tests and the drop-distance search) stay representable; row 0 is
/// the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
    row_fill: Column,
    rows: usize,
    cols: usize,
}

impl Board {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        assert!(config.rows >= 4 && config.cols >= 4);
        assert!(config.cols <= usize::from(u8::MAX));
        Self {
            columns: (0..config.cols).map(|_| Column::new(config.rows)).collect(),
            row_fill: Column::new(config.rows),
            rows: config.rows,
            cols: config.cols,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Cell tag at `(x, y)`; 0 when empty.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.columns[x].cells()[y]
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn violates_bounds(&self, cells: &[Vec<u8>], x: i32, y: i32) -> bool {
        x < 0 || x + cells.len() as i32 > self.cols as i32 || y >= self.rows as i32 || y < 0
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn check_columns(&self, cells: &[Vec<u8>], x: i32) -> Result<(), BoardError> {
        if x < 0 {
            return Err(BoardError::ColumnOutOfRange { col: x });
        }
        let end = x + cells.len() as i32;
        if end > self.cols as i32 {
            return Err(BoardError::ColumnOutOfRange { col: end - 1 });
        }
        Ok(())
    }

    /// Returns whether the shape footprint at `(x, y)` would overlap an
    /// occupied cell or breach the grid bounds.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn has_collision(&self, cells: &[Vec<u8>], x: i32, y: i32) -> bool {
        if self.violates_bounds(cells, x, y) {
            return true;
        }
        for (dx, col) in cells.iter().enumerate() {
            for (dy, &value) in col.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let cy = y - dy as i32;
                if cy < 0 {
                    return true;
                }
                if self.columns[x as usize + dx].is_occupied(cy) {
                    return true;
                }
            }
        }
        false
    }

    /// Number of rows the shape at `(x, y)` can still descend before hitting
    /// the floor or a placed cell.
    ///
    /// The result is the tightest per-column constraint; a negative value
    /// signals that the footprint already overlaps at `(x, y)`. Querying with
    /// `y` above the grid is a [`BoardError::RowOutOfRange`] that propagates
    /// to the caller rather than being clamped.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn distance_to_collision(
        &self,
        cells: &[Vec<u8>],
        x: i32,
        y: i32,
    ) -> Result<i32, BoardError> {
        if y > self.rows as i32 {
            return Err(BoardError::RowOutOfRange { row: y });
        }
        self.check_columns(cells, x)?;

        let height = cells.first().map_or(0, |col| col.len() as i32);
        let mut result = y + 1 - height;
        if result < 0 {
            return Ok(result);
        }
        for (dx, col) in cells.iter().enumerate() {
            for (dy, &value) in col.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let distance = self.columns[x as usize + dx].distance_to_next_filled(y - dy as i32);
                if distance < result {
                    result = distance;
                    if result < 0 {
                        return Ok(result);
                    }
                }
            }
        }
        Ok(result)
    }

    /// Drops the shape from `(x, y)` and writes it into the grid.
    ///
    /// A caller that already knows the drop distance can pass it via
    /// `known_distance` to skip the recomputation. Returns `Ok(false)`
    /// without mutating anything when the shape would come to rest above the
    /// ceiling.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn place(
        &mut self,
        cells: &[Vec<u8>],
        x: i32,
        y: i32,
        known_distance: Option<i32>,
    ) -> Result<bool, BoardError> {
        let distance = match known_distance {
            Some(distance) => distance,
            None => self.distance_to_collision(cells, x, y)?,
        };
        let y = y - distance;
        if y >= self.rows as i32 {
            return Ok(false);
        }
        self.check_columns(cells, x)?;
        for (dx, col) in cells.iter().enumerate() {
            let mut values = ArrayVec::<u8, 4>::new();
            let mut indices = ArrayVec::<usize, 4>::new();
            for (dy, &value) in col.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let row = y - dy as i32;
                let row = usize::try_from(row).map_err(|_| BoardError::RowOutOfRange { row })?;
                values.push(value);
                indices.push(row);
                self.row_fill.increment(row)?;
            }
            if !indices.is_empty() {
                self.columns[x as usize + dx].add(&values, &indices)?;
            }
        }
        Ok(true)
    }

    /// Removes every full row and returns how many were removed.
    pub fn remove_full_rows(&mut self) -> Result<usize, BoardError> {
        let full: Vec<usize> = (0..self.rows)
            .rev()
            .filter(|&row| usize::from(self.row_fill.cells()[row]) == self.cols)
            .collect();
        if full.is_empty() {
            return Ok(0);
        }
        for column in &mut self.columns {
            column.remove(&full)?;
        }
        self.row_fill.remove(&full)?;
        Ok(full.len())
    }

    /// Simulates dropping the shape from `(x, y)` without mutating anything.
    ///
    /// Called once per (rotation, column) candidate during the placement
    /// search, so it works on per-column aggregates instead of copying the
    /// grid. Unreachable placements come back as `valid == false`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn evaluate_position(
        &self,
        cells: &[Vec<u8>],
        x: i32,
        y: i32,
    ) -> Result<PositionEvaluation, BoardError> {
        let invalid = PositionEvaluation::default();
        let width = cells.len() as i32;
        if x < 0 || x + width > self.cols as i32 {
            return Ok(invalid);
        }
        let distance = self.distance_to_collision(cells, x, y)?;
        let y = y - distance;
        if distance < 0 || self.violates_bounds(cells, x, y) {
            return Ok(invalid);
        }

        let mut row_fill = self.row_fill.cells().to_vec();
        let mut heights = self.col_heights();
        let mut holes: Vec<u32> = self.columns.iter().map(Column::hole_count).collect();
        for (dx, col) in cells.iter().enumerate() {
            let mut indices = ArrayVec::<usize, 4>::new();
            for (dy, &value) in col.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let row = (y - dy as i32) as usize;
                row_fill[row] += 1;
                indices.push(row);
            }
            if indices.is_empty() {
                continue;
            }
            let cx = x as usize + dx;
            let (max_height, hole_count) = self.columns[cx].evaluate(&indices);
            heights[cx] = max_height + 1;
            holes[cx] = hole_count;
        }

        let lines_cleared = row_fill
            .iter()
            .filter(|&&count| usize::from(count) >= self.cols)
            .count() as u32;
        Ok(PositionEvaluation {
            valid: true,
            lines_cleared,
            total_height: heights.iter().sum(),
            hole_count: holes.iter().sum(),
            bumpiness: heights.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum(),
        })
    }

    /// Height of every column (topmost occupied index plus one).
    #[must_use]
    pub fn col_heights(&self) -> Vec<i32> {
        self.columns.iter().map(|col| col.max_height() + 1).collect()
    }

    /// Total number of holes across all columns.
    #[must_use]
    pub fn hole_count(&self) -> u32 {
        self.columns.iter().map(Column::hole_count).sum()
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> i32 {
        self.columns
            .windows(2)
            .map(|pair| (pair[1].max_height() - pair[0].max_height()).abs())
            .sum()
    }

    /// Clears every cell and counter.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.reset();
        }
        self.row_fill.reset();
    }
}
