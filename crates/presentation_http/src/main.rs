//! Weathervane HTTP Server
//!
//! Main entry point for the prediction API server.

use std::{sync::Arc, time::Duration};

use application::{LiveWeatherService, PredictionService};
use infrastructure::{AppConfig, BincodeArtifactStore, LiveWeatherAdapter, init_tracing};
use presentation_http::{routes, state::AppState, templates};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_format)?;

    info!("Weathervane v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        artifacts = %config.data.artifacts_dir.display(),
        "Configuration loaded"
    );

    // Load the trained artifact pair. A missing pair is a refusal to
    // start; the error message names the train command.
    let store = BincodeArtifactStore::new(config.data.clone());
    let predictor = PredictionService::load(&store)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let predictor = Arc::new(predictor);

    let model = predictor.model_info().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        classes = model.classes.len(),
        trees = model.n_trees,
        "Model loaded"
    );

    // Live weather is best-effort; the adapter only fails if the HTTP
    // client cannot be constructed.
    let adapter = match config.weather.clone() {
        Some(weather_config) => LiveWeatherAdapter::with_config(weather_config),
        None => LiveWeatherAdapter::new(),
    }
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    let live = Arc::new(LiveWeatherService::new(
        Arc::new(adapter),
        Arc::clone(&predictor),
    ));

    let state = AppState {
        predictor,
        live,
        templates: Arc::new(templates::build_templates()?),
    };

    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown.
}
