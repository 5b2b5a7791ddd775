use anyhow::Context;
use tokio::net::TcpListener;

use lienstrat_server::{logging, router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("loading settings")?;
    logging::init(&settings);

    let state = AppState::from_settings(&settings).context("building hosted model client")?;
    let app = router(state, &settings);

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    tracing::info!(
        addr = %settings.bind_addr,
        project = %settings.project_name,
        version = %settings.version,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
