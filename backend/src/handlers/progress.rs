use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::ProgressUser;
use crate::dto::{CompleteDayRequest, ProgressResponse, ResetResponse};
use crate::error::{AppError, AppResult};
use crate::models::progress::DayNumber;
use crate::AppState;

/// GET /api/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<ProgressUser>,
) -> Json<ProgressResponse> {
    let progress = state.store.get(&user.id).await;
    Json(ProgressResponse::from(&progress))
}

/// POST /api/progress/reset
pub async fn reset_progress(
    State(state): State<AppState>,
    Extension(user): Extension<ProgressUser>,
) -> AppResult<Json<ResetResponse>> {
    let progress = state.store.reset(&user.id).await?;
    Ok(Json(ResetResponse {
        message: "Progress reset successfully".into(),
        progress: ProgressResponse::from(&progress),
    }))
}

/// POST /api/progress/complete
pub async fn complete_day(
    State(state): State<AppState>,
    Extension(user): Extension<ProgressUser>,
    body: Result<Json<CompleteDayRequest>, JsonRejection>,
) -> AppResult<Json<ProgressResponse>> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    if let Err(e) = body.validate() {
        tracing::warn!(user_id = %user.id, day = body.day_number, "Rejected day_number");
        return Err(AppError::Validation(e.to_string()));
    }
    // In range after validate(); this only narrows the type.
    let day = DayNumber::try_from(body.day_number)?;

    let progress = state.store.complete_day(&user.id, day).await.map_err(|e| {
        tracing::warn!(user_id = %user.id, day = day.get(), error = %e, "Day completion rejected");
        AppError::from(e)
    })?;

    Ok(Json(ProgressResponse::from(&progress)))
}
