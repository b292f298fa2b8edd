mod api;
mod middleware;

use std::sync::Arc;

use hospi_core::SearchFilters;
use hospi_search::{FixedPosition, ResultSynthesizer, SearchController};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = hospi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        model = %config.gemini_model,
        "starting hospi-server"
    );
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; searches will fail until it is configured");
    }

    let synthesizer = ResultSynthesizer::from_config(&config)?;
    let controller = Arc::new(SearchController::new(
        synthesizer,
        SearchFilters::new(
            config.default_query.clone(),
            config.default_location.clone(),
        ),
    ));

    // Geolocation and the mount search run independently; the mount search
    // only sees coordinates if they resolved first.
    let geolocation = FixedPosition(config.user_coordinates);
    tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.locate(&geolocation).await }
    });
    tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller.mount().await;
        }
    });

    let app = build_app(AppState { controller }, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
