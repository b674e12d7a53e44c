use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitae::{
    api,
    app_state::AppState,
    config::{Config, LogFormat},
};

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    let bind_addr = config.bind_addr().to_string();
    let app = api::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!(%bind_addr, "api listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
