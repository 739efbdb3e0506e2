//! Okta Voice OTP web server.
//!
//! Listens for Okta telephony inline hooks and places voice calls through 8x8.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voiceotp::web::WEBHOOK_PATH;
use voiceotp::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case in production; real environment
    // variables take precedence over it
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!(dotenv_loaded = dotenv_path.is_some(), "web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        voice_provider_configured = config.voice_provider_configured(),
        okta_secret_configured = config.okta_secret.is_some(),
        voice_profile = %config.voice_profile,
        otp_repetitions = config.otp_repetitions,
        voice_base_url = %config.voice_base_url,
        "config_loaded"
    );

    if !config.voice_provider_configured() {
        warn!("voice_provider_not_configured");
    }
    if config.okta_secret.is_none() {
        warn!("okta_auth_not_configured");
    }

    let port = config.port;
    let state = AppState::new(config).context("Failed to build voice client")?;
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, webhook_path = WEBHOOK_PATH, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
