//! Snapshot history with a cursor for stepping backward and forward.

use crate::grid::Grid;

/// Which snapshot a new generation is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvolvePolicy {
    /// Always evolve the newest snapshot, whatever the cursor shows, and
    /// append. History is never truncated.
    #[default]
    Tip,
    /// Evolve the snapshot under the cursor and discard everything after it.
    Cursor,
}

/// An ordered, never-empty list of boards plus the index being displayed.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Grid>,
    cursor: usize,
    policy: EvolvePolicy,
}

impl History {
    pub fn new(initial: Grid, policy: EvolvePolicy) -> Self {
        History {
            snapshots: vec![initial],
            cursor: 0,
            policy,
        }
    }

    /// Drops every snapshot and starts over from `initial`.
    pub fn reset(&mut self, initial: Grid) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    pub fn policy(&self) -> EvolvePolicy {
        self.policy
    }

    /// The board under the cursor.
    pub fn current(&self) -> &Grid {
        &self.snapshots[self.cursor]
    }

    /// The newest board.
    pub fn tip(&self) -> &Grid {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn current_step(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least its initial board.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Appends the next generation and moves the cursor onto it. Returns the
    /// number of cells that flipped.
    pub fn evolve(&mut self) -> usize {
        let (next, flipped) = match self.policy {
            EvolvePolicy::Tip => self.tip().next_generation(),
            EvolvePolicy::Cursor => {
                self.snapshots.truncate(self.cursor + 1);
                self.current().next_generation()
            }
        };
        self.snapshots.push(next);
        self.cursor = self.snapshots.len() - 1;
        flipped
    }

    /// Moves the cursor one snapshot back; no-op at the first one.
    pub fn go_back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor one snapshot forward; no-op at the newest one.
    pub fn go_forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        Grid::from_alive(5, &[(2, 1), (2, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn navigation_is_bounded() {
        let mut history = History::new(blinker(), EvolvePolicy::Tip);
        assert!(!history.go_back());
        assert!(!history.go_forward());
        assert_eq!(history.current_step(), 0);

        history.evolve();
        history.evolve();
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_step(), 2);
        assert!(!history.go_forward());

        assert!(history.go_back());
        assert!(history.go_back());
        assert!(!history.go_back());
        assert_eq!(history.current_step(), 0);
        assert_eq!(history.current(), &blinker());
        assert!(history.can_go_forward());
    }

    #[test]
    fn tip_policy_evolves_from_the_newest_snapshot() {
        let mut history = History::new(blinker(), EvolvePolicy::Tip);
        history.evolve();
        history.evolve();
        history.go_back();
        history.go_back();

        history.evolve();
        assert_eq!(history.len(), 4);
        assert_eq!(history.current_step(), 3);
        // Evolved from the horizontal tip, so the new board is vertical.
        assert!(history.current().is_alive(1, 2));
        assert!(!history.current().is_alive(2, 1));
    }

    #[test]
    fn cursor_policy_truncates_forward_history() {
        let mut history = History::new(blinker(), EvolvePolicy::Cursor);
        history.evolve();
        history.evolve();
        history.go_back();
        history.go_back();

        history.evolve();
        assert_eq!(history.len(), 2);
        assert_eq!(history.current_step(), 1);
        assert!(history.current().is_alive(1, 2));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn reset_keeps_a_single_snapshot() {
        let mut history = History::new(blinker(), EvolvePolicy::Tip);
        history.evolve();
        history.reset(Grid::new(3));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_step(), 0);
        assert_eq!(history.current().size(), 3);
        assert!(!history.can_go_back());
    }
}
