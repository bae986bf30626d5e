//! # Valentine's Week — Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Request validation is expressed via `validator` derive macros

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::progress::{DayEntry, ProgressState};

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Progress
// ============================================================================

/// POST /api/progress/complete
///
/// `max` mirrors `DAY_COUNT`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CompleteDayRequest {
    #[validate(range(min = 1, max = 8, message = "day_number must be between 1 and 8"))]
    pub day_number: i64,
}

/// One day in a progress response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayResponse {
    pub day_number: u8,
    pub day_name: String,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub completion_time: Option<DateTime<Utc>>,
}

impl From<&DayEntry> for DayResponse {
    fn from(entry: &DayEntry) -> Self {
        Self {
            day_number: entry.day_number,
            day_name: entry.day_name().to_string(),
            is_unlocked: entry.is_unlocked,
            is_completed: entry.is_completed,
            completion_time: entry.completion_time,
        }
    }
}

/// GET /api/progress, POST /api/progress/complete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressResponse {
    pub user_id: String,
    pub days: Vec<DayResponse>,
    pub replay_mode: bool,
    pub all_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProgressState> for ProgressResponse {
    fn from(state: &ProgressState) -> Self {
        Self {
            user_id: state.user_id.clone(),
            days: state.days.iter().map(DayResponse::from).collect(),
            replay_mode: state.replay_mode(),
            all_completed: state.all_completed(),
            created_at: state.created_at,
            updated_at: state.updated_at,
        }
    }
}

/// POST /api/progress/reset
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub progress: ProgressResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_request_range() {
        assert!(CompleteDayRequest { day_number: 1 }.validate().is_ok());
        assert!(CompleteDayRequest { day_number: 8 }.validate().is_ok());
        assert!(CompleteDayRequest { day_number: 0 }.validate().is_err());
        assert!(CompleteDayRequest { day_number: 9 }.validate().is_err());
    }

    #[test]
    fn test_complete_request_range_matches_day_count() {
        use crate::models::day::DAY_COUNT;
        use crate::models::progress::DayNumber;

        for n in -1..=(DAY_COUNT as i64 + 1) {
            let valid = CompleteDayRequest { day_number: n }.validate().is_ok();
            assert_eq!(valid, DayNumber::try_from(n).is_ok(), "day_number {}", n);
        }
    }

    #[test]
    fn test_complete_request_missing_field_fails() {
        let result = serde_json::from_str::<CompleteDayRequest>("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_progress_response_shape() {
        let state = ProgressState::new("default_user", Utc::now());
        let json = serde_json::to_value(ProgressResponse::from(&state)).unwrap();

        assert_eq!(json["user_id"], "default_user");
        assert_eq!(json["replay_mode"], false);
        assert_eq!(json["all_completed"], false);
        assert_eq!(json["days"].as_array().unwrap().len(), 8);
        assert_eq!(json["days"][0]["day_number"], 1);
        assert_eq!(json["days"][0]["day_name"], "Rose Day");
        assert_eq!(json["days"][0]["is_unlocked"], true);
        assert!(json["days"][0]["completion_time"].is_null());
        assert!(json.get("phase").is_none());
    }
}
