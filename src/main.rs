//! Conway's Game of Life: an HTTP API server and interactive viewers.

#[cfg(feature = "window")]
mod bevy_renderer;
#[cfg(feature = "terminal")]
mod terminal_renderer;

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
#[cfg(any(feature = "terminal", feature = "window"))]
use clap::ValueEnum;
use lifestep::server::{DEFAULT_MAX_SIZE, DEFAULT_PORT, ServerConfig, run_server};
use lifestep::Seed;
#[cfg(any(feature = "terminal", feature = "window"))]
use lifestep::{DEFAULT_SIZE, EvolvePolicy, GameStore};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Step through generations in the terminal
    #[cfg(feature = "terminal")]
    Terminal(ViewerArgs),
    /// Step through generations in a 2D window using Bevy
    #[cfg(feature = "window")]
    Window(WindowArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address of the interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Largest board side a client may request
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,

    /// Seed the random source for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(any(feature = "terminal", feature = "window"))]
#[derive(Args, Clone)]
pub struct ViewerArgs {
    /// Board side length
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Seed the random source for reproducible boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which snapshot "evolve" starts from after stepping back
    #[arg(long, value_enum, default_value_t = Policy::Tip)]
    pub evolve_policy: Policy,

    /// Generations per second while autoplaying
    #[arg(long, default_value_t = 4.0)]
    pub fps: f32,
}

#[cfg(any(feature = "terminal", feature = "window"))]
impl ViewerArgs {
    pub fn store(&self) -> GameStore {
        GameStore::with_seed(
            self.size,
            Seed::from_option(self.seed),
            self.evolve_policy.into(),
        )
    }
}

#[cfg(feature = "window")]
#[derive(Args, Clone)]
pub struct WindowArgs {
    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Color of live cells (name or "r,g,b")
    #[arg(long, default_value = "green")]
    pub alive_color: String,

    /// Color of dead cells (name or "r,g,b")
    #[arg(long, default_value = "white")]
    pub dead_color: String,

    /// Width and height of the window in pixels
    #[arg(long, default_value_t = 640.0)]
    pub window_size: f32,
}

#[cfg(any(feature = "terminal", feature = "window"))]
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Evolve from the newest board and append
    Tip,
    /// Evolve from the displayed board, dropping later ones
    Cursor,
}

#[cfg(any(feature = "terminal", feature = "window"))]
impl From<Policy> for EvolvePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Tip => EvolvePolicy::Tip,
            Policy::Cursor => EvolvePolicy::Cursor,
        }
    }
}

fn init_logger(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    init_logger("info");
    let config = ServerConfig {
        bind: SocketAddr::new(args.host, args.port),
        max_size: args.max_size,
        seed: Seed::from_option(args.seed),
    };
    let runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
    runtime.block_on(run_server(config))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args),
        #[cfg(feature = "terminal")]
        Command::Terminal(args) => {
            // Log lines would tear through the alternate screen.
            init_logger("warn");
            terminal_renderer::run(args).context("terminal renderer error")
        }
        #[cfg(feature = "window")]
        Command::Window(args) => {
            // Bevy installs its own log subscriber.
            bevy_renderer::run(args);
            Ok(())
        }
    }
}
