use std::{process::ExitCode, time::Duration};

use valentine_week_api::{
    client::ProgressClient,
    smoke::{self, SmokeOptions},
};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8001/api";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let backend_url =
        std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
    let step_delay = std::env::var("SMOKE_STEP_DELAY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or_else(|| SmokeOptions::default().step_delay);

    let mut client = ProgressClient::new(backend_url);
    if let Ok(user) = std::env::var("SMOKE_USER_ID") {
        client = client.with_user(user);
    }

    let outcomes = smoke::run_all(&client, &SmokeOptions { step_delay }).await;

    if outcomes.iter().all(|o| o.passed) {
        println!("ALL TESTS PASSED - Valentine's Week App backend is working correctly!");
        ExitCode::SUCCESS
    } else {
        println!("SOME TESTS FAILED - Check the detailed results above");
        ExitCode::FAILURE
    }
}
