//! Static front-end asset server.
//!
//! Serves a directory as-is. Every response, including 404s, is stamped
//! with permissive CORS headers and told not to be cached, so a rebuilt
//! bundle is picked up on the next reload.

use axum::{
    http::{header, HeaderValue},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate";

pub fn router(dir: impl AsRef<Path>) -> Router {
    let files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        ))
        .service(ServeDir::new(dir).append_index_html_on_directories(true));

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Happy Valentine's Week</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('roses');").unwrap();
        dir
    }

    fn assert_static_headers(resp: &axum::response::Response) {
        let headers = resp.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(headers[header::CACHE_CONTROL], CACHE_CONTROL_VALUE);
    }

    #[tokio::test]
    async fn test_serves_file_with_headers() {
        let dir = site();
        let resp = router(dir.path())
            .oneshot(Request::get("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_static_headers(&resp);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"console.log('roses');");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = site();
        let resp = router(dir.path())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("Valentine"));
    }

    #[tokio::test]
    async fn test_missing_file_still_has_headers() {
        let dir = site();
        let resp = router(dir.path())
            .oneshot(Request::get("/nope.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_static_headers(&resp);
    }
}
