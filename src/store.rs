//! State container for interactive front ends.
//!
//! A [`GameStore`] owns the board size, the random source and the
//! [`History`]. Front ends drive it through the `evolve_board` /
//! `go_to_*_board` / `initialize_board` operations and learn about changes by
//! subscribing a listener, which is called with a [`GameView`] after every
//! transition that actually changed something.

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use crate::grid::Grid;
use crate::history::{EvolvePolicy, History};
use crate::init::{DEFAULT_SIZE, Seed, random_grid};

/// Read-only picture of the store handed to listeners and renderers.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub board: &'a Grid,
    pub size: usize,
    pub current_step: usize,
    pub history_len: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Handle returned by [`GameStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameView<'_>) + Send + Sync>;

pub struct GameStore<R = StdRng> {
    size: usize,
    rng: R,
    history: History,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl GameStore<StdRng> {
    pub fn with_seed(size: usize, seed: Seed, policy: EvolvePolicy) -> Self {
        Self::new(size, seed.rng(), policy)
    }
}

impl<R: Rng> GameStore<R> {
    /// Creates a store whose history starts with a freshly seeded board.
    pub fn new(size: usize, mut rng: R, policy: EvolvePolicy) -> Self {
        let size = if size == 0 { DEFAULT_SIZE } else { size };
        let initial = random_grid(size, &mut rng);
        GameStore {
            size,
            rng,
            history: History::new(initial, policy),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// The board currently displayed.
    pub fn board(&self) -> &Grid {
        self.history.current()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn current_step(&self) -> usize {
        self.history.current_step()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            board: self.history.current(),
            size: self.size,
            current_step: self.history.current_step(),
            history_len: self.history.len(),
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
        }
    }

    /// Replaces the whole history with one freshly seeded board.
    pub fn initialize_board(&mut self) {
        let board = random_grid(self.size, &mut self.rng);
        info!(
            "initialized {}x{} board with {} live cells",
            self.size,
            self.size,
            board.population()
        );
        self.history.reset(board);
        self.notify();
    }

    /// Changes the board size, re-initializing when it differs from the
    /// current one. Zero selects the default size.
    pub fn set_size(&mut self, size: usize) {
        let size = if size == 0 { DEFAULT_SIZE } else { size };
        if size != self.size {
            self.size = size;
            self.initialize_board();
        }
    }

    /// Appends the next generation to the history and displays it.
    pub fn evolve_board(&mut self) {
        let flipped = self.history.evolve();
        debug!(
            "step {}: {} cells flipped, {} alive",
            self.history.current_step(),
            flipped,
            self.history.current().population()
        );
        self.notify();
    }

    /// Shows the previous snapshot; no-op at the first one.
    pub fn go_to_prev_board(&mut self) {
        if self.history.go_back() {
            debug!("back to step {}", self.history.current_step());
            self.notify();
        }
    }

    /// Shows the next snapshot; no-op at the newest one.
    pub fn go_to_next_board(&mut self) {
        if self.history.go_forward() {
            debug!("forward to step {}", self.history.current_step());
            self.notify();
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameView<'_>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let view = GameView {
            board: self.history.current(),
            size: self.size,
            current_step: self.history.current_step(),
            history_len: self.history.len(),
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&view);
        }
    }
}
