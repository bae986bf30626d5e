use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::progress::ProgressError;
use crate::services::progress_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::InvalidDay(_) => AppError::Validation(err.to_string()),
            ProgressError::DayLocked(_) => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Progress(e) => e.into(),
            StoreError::UserLimitReached(_) => AppError::Unavailable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Service unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "code": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_day_maps_to_unprocessable() {
        let resp = AppError::from(ProgressError::InvalidDay(9)).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_locked_day_maps_to_conflict() {
        let resp = AppError::from(ProgressError::DayLocked(4)).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let resp = AppError::from(StoreError::Progress(ProgressError::DayLocked(2))).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::from(StoreError::UserLimitReached(10)).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
