//! Esports Data Proxy
//!
//! Serves `/api/teams` and `/api/upcoming-matches` from the upstream esports
//! API and the frontend bundle from `./public`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use esports_proxy::config::read_config;
use esports_proxy::config::validation::validate_config;
use esports_proxy::lifecycle::startup;
use esports_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "esports-proxy", version)]
#[command(about = "Proxy for esports team and match data", long_about = None)]
struct Cli {
    /// Optional TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the static frontend directory.
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Do not serve static files.
    #[arg(long)]
    no_static: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env is fine; a broken one is not.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env file: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let mut config = match read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(dir) = cli.public_dir {
        config.static_files.dir = dir;
    }
    if cli.no_static {
        config.static_files.enabled = false;
    }

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("esports-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "Invalid configuration");
        }
        return ExitCode::FAILURE;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_ms = config.upstream.request_timeout_ms,
        static_enabled = config.static_files.enabled,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Proxy failed");
            ExitCode::FAILURE
        }
    }
}
