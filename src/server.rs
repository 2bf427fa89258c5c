//! Bootstrap: state, router, listener, browser, graceful shutdown.

use crate::browser;
use crate::error::AppError;
use crate::routes::app;
use crate::settings::Settings;
use crate::state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn log_settings(settings: &Settings) {
    match std::env::current_dir() {
        Ok(cwd) => tracing::info!("Working directory: {}", cwd.display()),
        Err(e) => tracing::warn!("Working directory unavailable: {}", e),
    }
    tracing::info!("Server configuration:");
    tracing::info!("- Port: {}", settings.port);
    tracing::info!("- Database: {}", settings.db);
    tracing::info!("- Static root: {}", settings.root.display());
    tracing::info!(
        "- API Description: {}",
        settings.api.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
    );
    tracing::info!(
        "- Extension: {}",
        settings.extension.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
    );
    tracing::info!("- Show Responses: {}", settings.show_responses);
}

/// Run until Ctrl-C.
pub async fn run(settings: Settings) -> Result<(), AppError> {
    tracing::info!("Server starting...");
    log_settings(&settings);

    let addr = settings.listen_addr();
    let url = settings.browser_url();
    let open_browser = !settings.no_browser;
    let state = AppState::from_settings(settings).await?;
    let app = app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    if open_browser {
        browser::launch(&url);
    }
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
