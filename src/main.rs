//! relay-gate binary.
//!
//! Startup order: parse config → derive policy → bind → serve. Every
//! startup failure is fatal: log and exit non-zero, no retry.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use relay_gate::config::load_config;
use relay_gate::engine::{NullEngine, RelayPolicy};
use relay_gate::lifecycle::{spawn_signal_listener, Shutdown};
use relay_gate::observability::init_logging;
use relay_gate::Server;

/// Admission-controlled front end for a relay protocol engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Optional TOML file seeding the configuration; the environment
    /// always applies on top.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn fatal(message: &str, error: impl std::fmt::Display) -> ! {
    tracing::error!(error = %error, "{message}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging();

    tracing::info!("relay-gate v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fatal("Failed to load configuration", e),
    };

    tracing::info!(
        bind_address = %config.bind_address(),
        max_connections = config.max_connections,
        timeout_secs = config.timeout_secs,
        require_auth = config.require_auth,
        "Configuration loaded"
    );

    let policy = match RelayPolicy::from_config(&config) {
        Ok(policy) => policy,
        Err(errors) => fatal(
            "Invalid authentication configuration",
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    };

    let server = match Server::bind(&config, policy).await {
        Ok(server) => server,
        Err(e) => fatal("Failed to start", e),
    };

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    // The relay protocol implementation is an external collaborator; until
    // one is linked in, admitted connections are refused after admission.
    let engine = Arc::new(NullEngine);

    if let Err(e) = server.run(engine, shutdown).await {
        fatal("Server error", e);
    }

    tracing::info!("Shutdown complete");
}
