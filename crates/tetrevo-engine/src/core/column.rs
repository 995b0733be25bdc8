use crate::BoardError;

/// Per-column cell storage with incremental height and hole bookkeeping.
///
/// A column stores one vertical strip of the grid, bottom to top (index 0 is
/// the floor). Alongside the raw cells it maintains two aggregates that the
/// placement search reads on every candidate:
///
/// - `max_height`: index of the topmost occupied cell, `-1` when empty
/// - `hole_count`: number of empty cells strictly below `max_height`
///
/// Both are updated incrementally on every mutation. They are recomputed from
/// the cells only at construction/reset and for the shifted region after a
/// removal that takes out the stack top.
///
/// The same structure doubles as the board's per-row occupancy counter: cells
/// then hold fill counts instead of piece tags, see [`Column::increment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    cells: Vec<u8>,
    max_height: i32,
    hole_count: u32,
}

impl Column {
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            cells: vec![0; rows],
            max_height: -1,
            hole_count: 0,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Index of the topmost occupied cell, `-1` when the column is empty.
    #[must_use]
    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// Number of empty cells strictly below [`Self::max_height`].
    #[must_use]
    pub fn hole_count(&self) -> u32 {
        self.hole_count
    }

    /// Returns whether the cell at row `y` holds a value.
    ///
    /// Rows outside the column count as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, y: i32) -> bool {
        usize::try_from(y).is_ok_and(|y| self.cells.get(y).is_some_and(|&v| v != 0))
    }

    /// Computes what `max_height` and `hole_count` would become if the cells
    /// at `indices` were filled, without mutating the column.
    ///
    /// `indices` must be currently empty rows in descending order. When the
    /// highest new cell tops the stack, every empty cell in the gap above the
    /// old top that is not being filled becomes a hole; otherwise each new
    /// cell fills an existing hole.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn evaluate(&self, indices: &[usize]) -> (i32, u32) {
        let Some(&top) = indices.first() else {
            return (self.max_height, self.hole_count);
        };
        let top = top as i32;
        let len = indices.len() as u32;
        if top > self.max_height {
            let gap = (top - self.max_height) as u32;
            (top, self.hole_count + gap - len)
        } else {
            (self.max_height, self.hole_count - len)
        }
    }

    /// Writes `values` into the currently-empty rows `indices` (descending
    /// order), updating the aggregates incrementally.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn add(&mut self, values: &[u8], indices: &[usize]) -> Result<(), BoardError> {
        assert_eq!(values.len(), indices.len());
        for &i in indices {
            if i >= self.cells.len() {
                return Err(BoardError::RowOutOfRange { row: i as i32 });
            }
            if self.cells[i] != 0 {
                return Err(BoardError::CellOccupied { row: i });
            }
        }
        let Some(&top) = indices.first() else {
            return Ok(());
        };
        let top = top as i32;
        let len = indices.len() as u32;
        if top > self.max_height {
            self.hole_count += (top - self.max_height) as u32 - len;
            self.max_height = top;
        } else {
            self.hole_count -= len;
        }
        for (&value, &index) in values.iter().zip(indices) {
            self.cells[index] = value;
        }
        Ok(())
    }

    /// Row-counter helper: adds a cell when the row is empty, otherwise bumps
    /// the stored count by one.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn increment(&mut self, index: usize) -> Result<(), BoardError> {
        if index >= self.cells.len() {
            return Err(BoardError::RowOutOfRange { row: index as i32 });
        }
        if self.cells[index] == 0 {
            self.add(&[1], &[index])
        } else {
            self.cells[index] += 1;
            Ok(())
        }
    }

    /// Removes the cells at `indices` (descending order, all occupied) and
    /// compacts the column: every surviving cell above a removed row slides
    /// down by the number of removed rows below it.
    ///
    /// When the stack top itself is removed, the new top and the hole count
    /// for the shifted region are found by scanning; otherwise both
    /// aggregates are adjusted incrementally.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn remove(&mut self, indices: &[usize]) -> Result<(), BoardError> {
        for &i in indices {
            if i >= self.cells.len() {
                return Err(BoardError::RowOutOfRange { row: i as i32 });
            }
            if self.cells[i] == 0 {
                return Err(BoardError::CellEmpty { row: i });
            }
        }
        let (Some(&top), Some(&lowest)) = (indices.first(), indices.last()) else {
            return Ok(());
        };

        // Every removed row held a value, so the old top is at least `top`.
        let old_max = self.max_height;
        for &i in indices {
            self.cells[i] = 0;
        }
        let mut shift = 0;
        for pos in lowest..=old_max as usize {
            if indices.contains(&pos) {
                shift += 1;
            } else if shift > 0 {
                self.cells[pos - shift] = self.cells[pos];
                self.cells[pos] = 0;
            }
        }

        let removed = indices.len() as i32;
        if top as i32 == old_max {
            self.max_height = self.highest_filled_at_or_below(old_max - removed);
            self.hole_count = self.count_holes_below(self.max_height);
        } else {
            self.max_height = old_max - removed;
        }
        Ok(())
    }

    /// Signed gap between row `y` and the next occupied cell at or below it.
    ///
    /// Negative when `y` is at or under an occupied cell (collision).
    #[must_use]
    pub fn distance_to_next_filled(&self, y: i32) -> i32 {
        if y >= self.max_height {
            y - self.max_height - 1
        } else {
            y - self.highest_filled_at_or_below(y) - 1
        }
    }

    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.max_height = -1;
        self.hole_count = 0;
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn highest_filled_at_or_below(&self, start: i32) -> i32 {
        let mut i = start.min(self.cells.len() as i32 - 1);
        while i >= 0 {
            if self.cells[i as usize] != 0 {
                return i;
            }
            i -= 1;
        }
        -1
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count_holes_below(&self, max: i32) -> u32 {
        if max <= 0 {
            return 0;
        }
        self.cells[..max as usize].iter().filter(|&&v| v == 0).count() as u32
    }
}
