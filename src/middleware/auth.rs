use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

pub const API_KEY_HEADER: &str = "api-key";

/// Rejects the request with 401 unless `api-key` matches the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let supplied = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match supplied {
        Some(key) if key == state.api_key.as_str() => Ok(next.run(request).await),
        _ => Err(AppError::Unauthorized),
    }
}
