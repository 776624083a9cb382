//! HTTP front end for a single in-place simulation.
//!
//! Built on Axum. The board lives in an [`AppState`] owned by the server and
//! handed to handlers through `State`; a mutex serializes requests so
//! concurrent initialize/evolve calls never interleave.
//!
//! ## Usage
//!
//! ```no_run
//! use lifestep::server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server(ServerConfig::default()).await
//! }
//! ```

mod app;
mod routes;
mod state;

use std::net::{Ipv4Addr, SocketAddr};

use crate::init::Seed;

pub use routes::{ApiError, api_router};
pub use app::{router, run_server};
pub use state::AppState;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Largest board a client may request by default.
pub const DEFAULT_MAX_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Requests for a larger board are rejected.
    pub max_size: usize,
    pub seed: Seed,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_size: DEFAULT_MAX_SIZE,
            seed: Seed::Entropy,
        }
    }
}
