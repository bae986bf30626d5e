//! Runs the smoke checks against the router bound to a real TCP socket.

use std::time::Duration;

use valentine_week_api::{
    build_router,
    client::ProgressClient,
    config::Config,
    smoke::{self, SmokeOptions},
    AppState,
};

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(AppState::new(Config::default()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn fast() -> SmokeOptions {
    SmokeOptions {
        step_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_smoke_suite_passes() {
    let client = ProgressClient::new(spawn_server().await);
    let outcomes = smoke::run_all(&client, &fast()).await;

    let names: Vec<_> = outcomes.iter().map(|o| o.name).collect();
    assert_eq!(
        names,
        vec![
            "API Root",
            "Progress Reset",
            "Initial Progress",
            "Sequential Completion",
            "Progress Persistence",
            "Invalid Day Rejection",
        ]
    );
    for outcome in &outcomes {
        assert!(outcome.passed, "{} failed", outcome.name);
    }
}

#[tokio::test]
async fn test_smoke_suite_per_user() {
    let base = spawn_server().await;
    let alice = ProgressClient::new(base.clone()).with_user("alice");
    let bob = ProgressClient::new(base).with_user("bob");

    let outcomes = smoke::run_all(&alice, &fast()).await;
    assert!(outcomes.iter().all(|o| o.passed));

    let progress = bob.progress().await.unwrap();
    assert_eq!(progress.user_id, "bob");
    assert!(smoke::verify_initial(&progress).is_ok());
}

#[tokio::test]
async fn test_client_surfaces_rejections() {
    let client = ProgressClient::new(spawn_server().await);
    let err = client.complete_day(3).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));

    let err = client.complete_day(42).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn test_smoke_stops_when_server_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProgressClient::new(format!("http://{}/api", addr));
    let outcomes = smoke::run_all(&client, &fast()).await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].name, "API Root");
    assert!(!outcomes[0].passed);
}
