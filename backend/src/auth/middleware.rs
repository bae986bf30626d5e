use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::AppState;

pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

const MAX_USER_ID_LEN: usize = 128;

/// The user whose progress a request reads or mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUser {
    pub id: String,
}

/// Resolves the caller from `X-User-Id`, falling back to the configured
/// default user when the header is absent.
pub async fn identify_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let id = match req.headers().get(&USER_ID_HEADER) {
        Some(value) => {
            let id = value
                .to_str()
                .map_err(|_| AppError::Validation("X-User-Id must be visible ASCII".into()))?;
            validate_user_id(id)?;
            id.to_string()
        }
        None => state.config.default_user_id.clone(),
    };

    req.extensions_mut().insert(ProgressUser { id });
    Ok(next.run(req).await)
}

fn validate_user_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::Validation("X-User-Id must not be empty".into()));
    }
    if id.len() > MAX_USER_ID_LEN {
        return Err(AppError::Validation(format!(
            "X-User-Id must be at most {} bytes",
            MAX_USER_ID_LEN
        )));
    }
    if !id.chars().all(|c| c.is_ascii_graphic()) {
        return Err(AppError::Validation("X-User-Id must be visible ASCII".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("alice").is_ok());
        assert!(validate_user_id("user-42_test").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("has space").is_err());
        assert!(validate_user_id(&"a".repeat(MAX_USER_ID_LEN)).is_ok());
        assert!(validate_user_id(&"a".repeat(MAX_USER_ID_LEN + 1)).is_err());
    }
}
