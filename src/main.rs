//! Beacon: a pod-to-pod communication demo service.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from the environment, spawns the periodic broadcaster, sets
//! up the Axum router, and starts the HTTP server. On shutdown the broadcast
//! task is aborted after the server has drained.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beacon::broadcast::Broadcaster;
use beacon::config::{AppConfig, DEFAULT_LOG_FILTER, DEFAULT_LOG_FORMAT};
use beacon::http::start_server;
use beacon::routes::create_router;
use beacon::state::AppState;
use beacon::store::MessageStore;
use beacon::templates::init_templates;

/// Beacon: a pod-to-pod communication demo service
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
struct Args {
    /// Log level filter (e.g., "beacon=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| DEFAULT_LOG_FORMAT.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match log_format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        pod = %config.pod.name,
        service = %config.pod.service_name,
        namespace = %config.pod.namespace,
        port = config.http.port,
        messaging = config.enable_messaging,
        "Loaded configuration"
    );

    // Initialize Tera templates
    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // Message store shared by the HTTP handlers and the broadcaster
    let store = MessageStore::new();

    // Spawn the periodic broadcaster, keeping its handle for shutdown
    let broadcast_handle = if config.enable_messaging {
        Some(Broadcaster::new(&config, store.clone())?.spawn())
    } else {
        tracing::info!("Messaging disabled, not broadcasting");
        None
    };

    // Create application state and router
    let state = AppState::new(config.clone(), tera, store);
    let app = create_router(state);

    // Serve until SIGTERM/SIGINT, then drain
    start_server(app, &config).await?;

    // The broadcast loop never exits on its own
    if let Some(handle) = broadcast_handle {
        handle.abort();
    }
    tracing::info!("Shutdown complete");

    Ok(())
}
