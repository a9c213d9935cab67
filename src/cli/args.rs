//! CLI argument definitions using clap
//!
//! Commands:
//! - icecream-cart serve [--port <port>] [--in-memory [--seed]]
//! - icecream-cart check-config [--in-memory]

use clap::{Parser, Subcommand};

/// Ice cream cart inventory service
#[derive(Parser, Debug)]
#[command(name = "icecream-cart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port to bind, overriding APP_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Keep products in memory instead of Postgres
        #[arg(long)]
        in_memory: bool,

        /// Load the sample flavours into the in-memory store
        #[arg(long, requires = "in_memory")]
        seed: bool,
    },

    /// Resolve configuration from the environment and print it
    CheckConfig {
        /// Skip the database variables
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
