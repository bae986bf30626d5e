use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod smoke;
pub mod static_site;

use auth::middleware::USER_ID_HEADER;
use config::Config;
use services::progress_store::ProgressStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ProgressStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: ProgressStore::with_max_users(config.max_tracked_users),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api", get(handlers::health::api_root))
        .route("/api/", get(handlers::health::api_root))
        .route("/api/days", get(handlers::days::list_days));

    let progress_routes = Router::new()
        .route("/api/progress", get(handlers::progress::get_progress))
        .route(
            "/api/progress/reset",
            post(handlers::progress::reset_progress),
        )
        .route(
            "/api/progress/complete",
            post(handlers::progress::complete_day),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::identify_user,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(progress_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, USER_ID_HEADER.clone()])
}
