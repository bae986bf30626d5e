use anyhow::Context;
use valentine_week_api::{build_router, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valentine_week_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let addr = config.listen_addr();
    let default_user = config.default_user_id.clone();

    let app = build_router(AppState::new(config));

    tracing::info!(default_user = %default_user, "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
