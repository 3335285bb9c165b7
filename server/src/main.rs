mod config;
mod constants;
mod error;
mod routes;
mod state;

use config::{data_dir, AppConfig};
use constants::paths::CONFIG_FILE;
use state::AppState;

/// Errors that stop the server from starting
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Failed to create generation backend: {0}")]
    Generation(#[from] component_generation::GenerationError),
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Component builder starting...");

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let lookup = |key: &str| std::env::var(key).ok();
    let app_data_dir = data_dir(lookup);

    let mut config = match AppConfig::load(&app_data_dir).await {
        Ok(config) => {
            log::info!("Loaded app configuration from {:?}", app_data_dir);
            config
        }
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    };

    // Write defaults on first run so they can be edited
    if !app_data_dir.join(CONFIG_FILE).exists() {
        if let Err(e) = config.save(&app_data_dir).await {
            log::warn!("Failed to write default config: {}", e);
        }
    }

    config.apply_env(lookup);

    let state = AppState::from_config(&config)?;
    let app = routes::router(state);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    log::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    log::info!("Component builder stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
