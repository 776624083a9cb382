//! Conway's Game of Life on a bounded square board.
//!
//! Every [`Cell`] caches its live-neighbor count. A generation is computed by
//! scanning those counts once for the cells that must flip, then flipping
//! them one by one while patching only the 8 neighbors of each flipped cell.
//!
//! Two front ends sit on the same core: [`server`] mutates a single board in
//! place behind an HTTP API, and [`GameStore`] keeps a navigable history of
//! boards for interactive viewers.

pub mod error;
pub mod evolve;
pub mod grid;
pub mod history;
pub mod init;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use evolve::{Change, next_state, pending_changes};
pub use grid::{Cell, Grid};
pub use history::{EvolvePolicy, History};
pub use init::{DEFAULT_SIZE, Seed, random_grid, resolve_size};
pub use store::{GameStore, GameView, SubscriptionId};
