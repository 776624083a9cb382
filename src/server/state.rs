//! Simulation state owned by the server.

use log::{debug, info};
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use super::ServerConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::init::{random_grid, resolve_size};

/// The board plus the random source that seeds it.
pub struct Simulation {
    pub grid: Grid,
    rng: StdRng,
}

/// Application state shared between all handlers
pub struct AppState {
    /// Held for the whole of each request, so requests never interleave
    pub sim: Mutex<Simulation>,
    pub config: ServerConfig,
}

impl AppState {
    /// Starts out with the empty board until a client initializes one.
    pub fn new(config: ServerConfig) -> Self {
        let sim = Simulation {
            grid: Grid::empty(),
            rng: config.seed.rng(),
        };
        AppState {
            sim: Mutex::new(sim),
            config,
        }
    }

    /// Replaces the board with a freshly seeded one and returns it.
    pub async fn initialize(&self, requested: Option<i64>) -> Result<Grid> {
        let size = resolve_size(requested);
        if size > self.config.max_size {
            return Err(Error::SizeTooLarge {
                requested: size,
                max: self.config.max_size,
            });
        }

        let mut sim = self.sim.lock().await;
        let grid = random_grid(size, &mut sim.rng);
        info!(
            "initialized {}x{} board with {} live cells",
            size,
            size,
            grid.population()
        );
        sim.grid = grid.clone();
        Ok(grid)
    }

    /// Advances the board one generation in place and returns the result.
    pub async fn evolve(&self) -> Grid {
        let mut sim = self.sim.lock().await;
        let flipped = sim.grid.tick();
        debug!(
            "evolved: {} cells flipped, {} alive",
            flipped,
            sim.grid.population()
        );
        sim.grid.clone()
    }

    pub async fn board(&self) -> Grid {
        self.sim.lock().await.grid.clone()
    }
}
