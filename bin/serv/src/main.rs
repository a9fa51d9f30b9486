use anyhow::Context;
use rcl_api::{config::ApiConfig, metrics, state::ApiState, tracing::init_tracing};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.environment);

    let metrics_handle = metrics::init_metrics().context("failed to install metrics recorder")?;
    let bind_addr = config.bind_addr.clone();
    let state = ApiState::new(config)
        .await
        .context("failed to load study state")?
        .with_metrics(metrics_handle);

    let app = rcl_api::router::router()
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Server running on http://{bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
