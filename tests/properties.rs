//! Property-based tests for the incremental neighbor counts.
//!
//! Uses proptest to check that cached counts and flips agree with a full
//! recount on arbitrary boards.

use lifestep::{EvolvePolicy, GameStore, Grid, Seed, next_state, pending_changes};
use proptest::prelude::*;

fn board() -> impl Strategy<Value = Grid> {
    (0usize..12).prop_flat_map(|size| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), size), size)
            .prop_map(|rows| Grid::from_matrix(rows).expect("square matrix"))
    })
}

// =============================================================================
// Neighbor counts
// =============================================================================

proptest! {
    /// Counts match a full recount after construction and after every step.
    #[test]
    fn prop_counts_stay_consistent(mut grid in board(), steps in 0usize..6) {
        prop_assert!(grid.is_consistent());
        for _ in 0..steps {
            grid.tick();
            prop_assert!(grid.is_consistent());
            prop_assert!(grid.cells().iter().all(|cell| cell.live_neighbors <= 8));
        }
    }

    /// Flipping cells one at a time keeps the counts exact.
    #[test]
    fn prop_set_alive_is_incremental(
        mut grid in board(),
        flips in prop::collection::vec((0usize..12, 0usize..12, any::<bool>()), 0..20)
    ) {
        let size = grid.size();
        for (row, col, alive) in flips {
            let result = grid.set_alive(row, col, alive);
            prop_assert_eq!(result.is_ok(), row < size && col < size);
            prop_assert!(grid.is_consistent());
        }
    }
}

// =============================================================================
// Rule application
// =============================================================================

proptest! {
    /// Exactly the cells satisfying the birth or death predicate flip.
    #[test]
    fn prop_only_predicate_cells_change(grid in board()) {
        let size = grid.size();
        let changes = pending_changes(&grid);
        let (next, flipped) = grid.next_generation();
        prop_assert_eq!(flipped, changes.len());

        for row in 0..size {
            for col in 0..size {
                let cell = grid.cell(row, col).unwrap();
                let predicted = next_state(cell.is_alive, cell.live_neighbors);
                prop_assert_eq!(next.is_alive(row, col), predicted);
                if cell.is_alive && (cell.live_neighbors == 2 || cell.live_neighbors == 3) {
                    prop_assert!(next.is_alive(row, col));
                }
                if !cell.is_alive && cell.live_neighbors != 3 {
                    prop_assert!(!next.is_alive(row, col));
                }
            }
        }
    }

    /// Applying the queued changes in reverse order gives the same board.
    #[test]
    fn prop_change_order_does_not_matter(grid in board()) {
        let changes = pending_changes(&grid);
        let mut reversed = grid.clone();
        for change in changes.iter().rev() {
            reversed.set_alive(change.row, change.col, change.alive).unwrap();
        }
        let (forward, _) = grid.next_generation();
        prop_assert_eq!(reversed, forward);
    }
}

// =============================================================================
// History navigation
// =============================================================================

#[derive(Debug, Clone)]
enum Action {
    Evolve,
    Back,
    Forward,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Evolve), Just(Action::Back), Just(Action::Forward)]
}

proptest! {
    /// The cursor always stays inside the history, and navigation past either
    /// end leaves it where it was.
    #[test]
    fn prop_cursor_stays_in_bounds(
        seed in any::<u64>(),
        cursor_policy in any::<bool>(),
        actions in prop::collection::vec(action(), 0..30)
    ) {
        let policy = if cursor_policy { EvolvePolicy::Cursor } else { EvolvePolicy::Tip };
        let mut store = GameStore::with_seed(4, Seed::Fixed(seed), policy);

        for action in actions {
            let before = store.current_step();
            let len = store.history().len();
            match action {
                Action::Evolve => {
                    store.evolve_board();
                    prop_assert_eq!(store.current_step(), store.history().len() - 1);
                }
                Action::Back => {
                    store.go_to_prev_board();
                    let expected = if before == 0 { 0 } else { before - 1 };
                    prop_assert_eq!(store.current_step(), expected);
                }
                Action::Forward => {
                    store.go_to_next_board();
                    let expected = if before + 1 == len { before } else { before + 1 };
                    prop_assert_eq!(store.current_step(), expected);
                }
            }
            prop_assert!(store.current_step() < store.history().len());
            prop_assert_eq!(store.can_go_back(), store.current_step() > 0);
            prop_assert!(store.board().is_consistent());
        }
    }
}
