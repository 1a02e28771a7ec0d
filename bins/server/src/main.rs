//! Rategate API Server
//!
//! Main entry point for the currency rates gateway.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rategate_api::{AppState, create_router, errors::error_responder};
use rategate_core::currency::CurrencyService;
use rategate_repository::CurrencyRepository;
use rategate_shared::AppConfig;
use rategate_upstream::OpenExchangeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    init_tracing(config.logging.json);
    info!(config = ?config.redacted(), "Configuration loaded");

    // Currency table for the exchange calculator
    let repository = CurrencyRepository::from_config(&config.currencies);
    info!(currencies = ?repository.codes(), "Currency table ready");

    // Upstream rate provider
    let provider = OpenExchangeClient::from_config(&config.provider)?;
    info!(
        url = %provider.url(),
        base = %provider.base(),
        "Rate provider configured"
    );

    let shutdown = CancellationToken::new();

    // Create application state
    let state = AppState {
        currency_service: Arc::new(CurrencyService::new(
            Arc::new(provider),
            Arc::new(repository),
        )),
        error_responder: error_responder(config.logging.log_errors),
        shutdown: shutdown.clone(),
        base_currency: Arc::from(config.provider.base_currency.to_uppercase()),
    };

    // Create router
    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        () = shutdown_signal() => {
            info!("Shutdown signal received");
            shutdown.cancel();

            let drain = Duration::from_secs(config.server.shutdown_timeout_secs);
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => result?,
                Err(_) => warn!(
                    timeout_secs = config.server.shutdown_timeout_secs,
                    "In-flight requests did not finish before shutdown timeout"
                ),
            }
        }
    }

    info!("Server stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rategate=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
