use anyhow::Context;
use valentine_week_api::{config::StaticConfig, static_site};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valentine_week_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let config = StaticConfig::from_env()?;
    if !config.dir.is_dir() {
        tracing::warn!(dir = %config.dir.display(), "Static directory does not exist");
    }

    let app = static_site::router(&config.dir);
    let addr = config.listen_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        dir = %config.dir.display(),
        "Valentine's Week web app running at http://localhost:{}",
        config.port
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
