//! One generation step, driven by the cached neighbor counts.

use crate::grid::Grid;

/// Applies Conway's rule to one cell.
pub fn next_state(is_alive: bool, live_neighbors: u8) -> bool {
    match (is_alive, live_neighbors) {
        // Underpopulation.
        (true, n) if n < 2 => false,
        // Survival.
        (true, 2) | (true, 3) => true,
        // Overpopulation.
        (true, _) => false,
        // Reproduction.
        (false, 3) => true,
        (false, _) => false,
    }
}

/// A cell that must flip in the coming step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
}

/// Scans the board once and lists every cell whose state the rule changes.
///
/// All decisions are taken against the counts as they are now; nothing is
/// written.
pub fn pending_changes(grid: &Grid) -> Vec<Change> {
    let mut changes = Vec::new();
    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let alive = next_state(cell.is_alive, cell.live_neighbors);
            if alive != cell.is_alive {
                changes.push(Change { row, col, alive });
            }
        }
    }
    changes
}

impl Grid {
    /// Advances the board one generation in place and returns how many cells
    /// flipped.
    pub fn tick(&mut self) -> usize {
        let changes = pending_changes(self);
        let mut flipped = 0;
        for Change { row, col, alive } in changes {
            // Coordinates come from scanning this same board.
            if let Ok(true) = self.set_alive(row, col, alive) {
                flipped += 1;
            }
        }
        debug_assert!(self.is_consistent());
        flipped
    }

    /// Returns the next generation, leaving `self` untouched.
    pub fn next_generation(&self) -> (Grid, usize) {
        let mut next = self.clone();
        let flipped = next.tick();
        (next, flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn pending_changes_reads_the_pre_step_counts() {
        // An L-tromino becomes a block: one birth, no deaths.
        let grid = Grid::from_alive(4, &[(0, 0), (0, 1), (1, 0)]).unwrap();
        let changes = pending_changes(&grid);
        assert_eq!(changes, vec![Change { row: 1, col: 1, alive: true }]);
    }

    #[test]
    fn tick_reports_flip_count() {
        let mut grid = Grid::from_alive(5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        assert_eq!(grid.tick(), 4);
        assert!(grid.is_alive(1, 2) && grid.is_alive(2, 2) && grid.is_alive(3, 2));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn next_generation_keeps_the_input() {
        let grid = Grid::from_alive(3, &[(1, 1)]).unwrap();
        let (next, flipped) = grid.next_generation();
        assert_eq!(flipped, 1);
        assert!(grid.is_alive(1, 1));
        assert!(!next.is_alive(1, 1));
    }

    #[test]
    fn empty_board_is_a_no_op() {
        let mut grid = Grid::empty();
        assert_eq!(grid.tick(), 0);
        assert_eq!(grid, Grid::empty());
    }
}
