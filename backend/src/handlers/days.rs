use axum::Json;

use crate::models::day::{ValentineDay, VALENTINE_WEEK};

/// GET /api/days
pub async fn list_days() -> Json<&'static [ValentineDay]> {
    Json(VALENTINE_WEEK.as_slice())
}
