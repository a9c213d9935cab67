//! CLI module for the ice cream cart
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - check-config: Print the resolved configuration

mod args;
mod commands;
mod errors;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use args::{Cli, Command};
pub use commands::{check_config, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "icecream_cart=info,tower_http=info";

/// Install the tracing subscriber, then parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    init_tracing();
    commands::run()
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
