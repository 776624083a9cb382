//! Board storage with cached live-neighbor counts.
//!
//! Boards are bounded: cells on the edge simply have fewer neighbors, nothing
//! wraps around.

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{Error, Result};

/// The 8 neighbor offsets, as `(delta_row, delta_col)`.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Converts a 2D coordinate to a 1D vector index.
pub fn get_index(size: usize, row: usize, column: usize) -> usize {
    row * size + column
}

/// Yields the in-bounds neighbors of `(row, col)` on a `size`x`size` board.
pub fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    DIRECTIONS.iter().filter_map(move |&(delta_row, delta_col)| {
        let neighbor_row = row.checked_add_signed(delta_row)?;
        let neighbor_col = col.checked_add_signed(delta_col)?;
        (neighbor_row < size && neighbor_col < size).then_some((neighbor_row, neighbor_col))
    })
}

/// One board position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub is_alive: bool,
    /// Number of alive in-bounds neighbors, always in `0..=8`.
    pub live_neighbors: u8,
}

/// A square board of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead board.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    /// The 0x0 board a server holds before anything is initialized.
    pub fn empty() -> Self {
        Self::new(0)
    }

    /// Builds a board with exactly the given cells alive.
    pub fn from_alive(size: usize, alive: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &(row, col) in alive {
            if row >= size || col >= size {
                return Err(Error::OutOfBounds { row, col, size });
            }
            grid.cells[get_index(size, row, col)].is_alive = true;
        }
        grid.count_neighbors();
        Ok(grid)
    }

    /// Builds a board from a square boolean matrix.
    pub fn from_matrix(rows: Vec<Vec<bool>>) -> Result<Self> {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(Error::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            for (col, alive) in values.into_iter().enumerate() {
                grid.cells[get_index(size, row, col)].is_alive = alive;
            }
        }
        grid.count_neighbors();
        Ok(grid)
    }

    /// Recomputes every count from scratch: each alive cell bumps its
    /// neighbors once. Expects all counts to start at zero.
    pub(crate) fn count_neighbors(&mut self) {
        let size = self.size;
        for row in 0..size {
            for col in 0..size {
                if self.cells[get_index(size, row, col)].is_alive {
                    for (neighbor_row, neighbor_col) in neighbors(size, row, col) {
                        self.cells[get_index(size, neighbor_row, neighbor_col)].live_neighbors += 1;
                    }
                }
            }
        }
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.size && col < self.size {
            self.cells.get(get_index(self.size, row, col))
        } else {
            None
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|cell| cell.is_alive)
    }

    pub fn live_neighbors(&self, row: usize, col: usize) -> Option<u8> {
        self.cell(row, col).map(|cell| cell.live_neighbors)
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive).count()
    }

    /// Iterates over the board one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Sets a cell's state, patching the counts of its neighbors when it flips.
    ///
    /// Only alive flags and counts are written; counts are never read back to
    /// decide anything, so a batch of changes decided up front can be applied
    /// in any order. Returns whether the cell flipped.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<bool> {
        let size = self.size;
        if row >= size || col >= size {
            return Err(Error::OutOfBounds { row, col, size });
        }
        let index = get_index(size, row, col);
        if self.cells[index].is_alive == alive {
            return Ok(false);
        }
        self.cells[index].is_alive = alive;
        for (neighbor_row, neighbor_col) in neighbors(size, row, col) {
            let neighbor = &mut self.cells[get_index(size, neighbor_row, neighbor_col)];
            if alive {
                neighbor.live_neighbors += 1;
            } else {
                neighbor.live_neighbors -= 1;
            }
        }
        Ok(true)
    }

    /// Alive flags as a nested matrix, the shape the HTTP API returns.
    pub fn alive_matrix(&self) -> Vec<Vec<bool>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.is_alive).collect())
            .collect()
    }

    /// Cached counts as a nested matrix.
    pub fn count_matrix(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.live_neighbors).collect())
            .collect()
    }

    /// Counts recomputed from the alive flags alone, ignoring the cache.
    pub fn brute_force_counts(&self) -> Vec<u8> {
        let size = self.size;
        let cells = &self.cells;
        let mut counts = vec![0u8; cells.len()];

        counts.par_iter_mut().enumerate().for_each(|(index, count)| {
            let row = index / size;
            let col = index % size;
            *count = neighbors(size, row, col)
                .filter(|&(r, c)| cells[get_index(size, r, c)].is_alive)
                .count() as u8;
        });

        counts
    }

    /// Whether every cached count matches a full recount.
    pub fn is_consistent(&self) -> bool {
        self.brute_force_counts()
            .iter()
            .zip(&self.cells)
            .all(|(expected, cell)| *expected == cell.live_neighbors)
    }
}

/// Serializes as a matrix of `{ "isAlive", "liveNeighbors" }` records.
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let corner: Vec<_> = neighbors(3, 0, 0).collect();
        assert_eq!(corner.len(), 3);
        assert!(corner.contains(&(0, 1)));
        assert!(corner.contains(&(1, 0)));
        assert!(corner.contains(&(1, 1)));
        assert_eq!(neighbors(3, 1, 1).count(), 8);
        assert_eq!(neighbors(3, 0, 1).count(), 5);
        assert_eq!(neighbors(1, 0, 0).count(), 0);
    }

    #[test]
    fn from_alive_counts_neighbors() {
        let grid = Grid::from_alive(3, &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(grid.live_neighbors(0, 0), Some(1));
        assert_eq!(grid.live_neighbors(0, 1), Some(1));
        assert_eq!(grid.live_neighbors(1, 0), Some(2));
        assert_eq!(grid.live_neighbors(1, 1), Some(2));
        assert_eq!(grid.live_neighbors(0, 2), Some(1));
        assert_eq!(grid.live_neighbors(2, 2), Some(0));
        assert!(grid.is_consistent());
    }

    #[test]
    fn from_alive_rejects_out_of_bounds() {
        let err = Grid::from_alive(3, &[(3, 0)]).unwrap_err();
        assert_eq!(err, Error::OutOfBounds { row: 3, col: 0, size: 3 });
    }

    #[test]
    fn from_matrix_rejects_ragged_rows() {
        let err = Grid::from_matrix(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            Error::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn set_alive_patches_neighbors() {
        let mut grid = Grid::new(3);
        assert!(grid.set_alive(1, 1, true).unwrap());
        assert_eq!(grid.live_neighbors(1, 1), Some(0));
        assert!(grid.brute_force_counts().iter().enumerate().all(|(i, &n)| n == u8::from(i != 4)));

        assert!(!grid.set_alive(1, 1, true).unwrap());
        assert_eq!(grid.live_neighbors(0, 0), Some(1));

        assert!(grid.set_alive(1, 1, false).unwrap());
        assert!(grid.cells().iter().all(|cell| cell.live_neighbors == 0));
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = Grid::empty();
        assert_eq!(grid.rows().count(), 0);
        assert!(grid.alive_matrix().is_empty());
        assert!(grid.is_consistent());
        assert_eq!(grid.cell(0, 0), None);
    }

    #[test]
    fn serializes_cells_in_camel_case() {
        let grid = Grid::from_alive(2, &[(0, 0)]).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json[0][0]["isAlive"], true);
        assert_eq!(json[1][1]["liveNeighbors"], 1);
        assert_eq!(json.as_array().unwrap().len(), 2);
    }
}
