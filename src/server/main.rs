//! HTTP server for nearby-neighbourhood searches.
//!
//! Serves the landing page and `/api/search`, backed by the Kakao Local API.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dongne::api::{self, AppState};
use dongne::config::{Config, API_KEY_ENV};
use dongne::geocoding::KakaoClient;
use dongne::NeighborhoodFinder;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "dongne-server")]
#[command(about = "Nearby neighbourhood search server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load configuration, report whether the API key was found, and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let dotenv_path = dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dongne=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    if let Some(Command::CheckConfig) = args.command {
        return check_config(&config, dotenv_path);
    }

    info!("Dongne Server");
    info!("Configuration: {:?}", config);

    let finder = match KakaoClient::new(&config.kakao) {
        Ok(client) => {
            info!("Using Kakao Local API at {}", config.kakao.base_url);
            Some(NeighborhoodFinder::new(
                Arc::new(client),
                config.search.clone(),
            ))
        }
        Err(e) => {
            warn!("{} ({} is not set); searches will fail", e, API_KEY_ENV);
            None
        }
    };

    let state = Arc::new(AppState {
        finder,
        default_distance_km: config.search.default_distance_km,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    });

    let app = api::router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check_config(config: &Config, dotenv_path: Option<PathBuf>) -> Result<()> {
    match dotenv_path {
        Some(path) => println!("Loaded {}", path.display()),
        None => println!("No .env file found; using process environment only"),
    }

    match config.masked_api_key() {
        Some(masked) => {
            println!("OK: {} found ({})", API_KEY_ENV, masked);
            Ok(())
        }
        None => {
            anyhow::bail!(
                "{} not found; set it in the environment, a .env file, or [kakao] api_key",
                API_KEY_ENV
            )
        }
    }
}
