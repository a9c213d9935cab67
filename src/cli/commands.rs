//! CLI command implementations

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::rest_api::IceCreamFacade;
use crate::store::{InMemoryStore, PgStore, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            port,
            in_memory,
            seed,
        } => serve(port, in_memory, seed),
        Command::CheckConfig { in_memory } => check_config(in_memory),
    }
}

/// Start the HTTP server and block until shutdown.
///
/// Configuration is resolved before the runtime is created, so a missing
/// variable fails fast without binding a port.
pub fn serve(port: Option<u16>, in_memory: bool, seed: bool) -> CliResult<()> {
    let mut config = AppConfig::from_env(in_memory)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        // The pool must be built inside the runtime.
        let store = build_store(&config, seed);
        let facade = Arc::new(IceCreamFacade::new(store, config.store_timeout));

        HttpServer::new(config.http, facade)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

fn build_store(config: &AppConfig, seed: bool) -> Arc<dyn RecordStore> {
    match &config.database {
        Some(db) => {
            info!(database = %db.redacted(), "using postgres store");
            Arc::new(PgStore::connect_lazy(db, config.store_timeout))
        }
        None if seed => {
            info!("using in-memory store with sample flavours");
            Arc::new(InMemoryStore::with_sample_data())
        }
        None => {
            info!("using empty in-memory store");
            Arc::new(InMemoryStore::new())
        }
    }
}

/// Resolve configuration and print it with secrets redacted.
pub fn check_config(in_memory: bool) -> CliResult<()> {
    let config = AppConfig::from_env(in_memory)?;

    println!("listen:        {}", config.http.socket_addr());
    if config.http.cors_origins.is_empty() {
        println!("cors origins:  *");
    } else {
        println!("cors origins:  {}", config.http.cors_origins.join(", "));
    }
    match &config.database {
        Some(db) => println!("database:      {}", db.redacted()),
        None => println!("database:      in-memory"),
    }
    println!("store timeout: {}ms", config.store_timeout.as_millis());

    Ok(())
}
