use std::env;

use anyhow::Result;
use roam_api::build_app;
use roam_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("roam_api");

    let bind = env::var("ROAM_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app()?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "roam trip planner started");

    axum::serve(listener, app).await?;
    Ok(())
}
