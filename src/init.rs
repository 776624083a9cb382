//! Random board seeding.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::Grid;

/// Board side length used when none, or a non-positive one, is requested.
pub const DEFAULT_SIZE: usize = 10;

/// Maps a requested size to the board size actually used.
pub fn resolve_size(requested: Option<i64>) -> usize {
    match requested {
        Some(size) if size > 0 => size as usize,
        _ => DEFAULT_SIZE,
    }
}

/// Where the random source for initialization comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Seed {
    #[default]
    Entropy,
    Fixed(u64),
}

impl Seed {
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or(Seed::Entropy, Seed::Fixed)
    }

    pub fn rng(self) -> StdRng {
        match self {
            Seed::Entropy => StdRng::from_os_rng(),
            Seed::Fixed(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Creates a board where each cell is alive with probability 1/2, with
/// neighbor counts filled in by a single pass over the alive cells.
pub fn random_grid<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size);
    for cell in grid.cells_mut() {
        cell.is_alive = rng.random_bool(0.5);
    }
    grid.count_neighbors();
    grid
}
