use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing or invalid api-key header")]
    Unauthorized,

    #[error("item {0} not found")]
    NotFound(String),

    /// Update request carried neither a name nor a quantity.
    #[error("no fields supplied for item {0}")]
    Validation(i64),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("failed to read item document: {0}")]
    ReadDocument(#[source] std::io::Error),

    #[error("item document is malformed: {0}")]
    ParseDocument(#[from] serde_json::Error),

    #[error("failed to write item document: {0}")]
    WriteDocument(#[source] std::io::Error),

    #[error("image search failed: {0}")]
    ExternalService(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            // 404 for a missing update field is what existing clients see.
            Self::NotFound(_) | Self::Validation(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::InvalidBody(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ReadDocument(_)
            | Self::ParseDocument(_)
            | Self::WriteDocument(_)
            | Self::ExternalService(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message shown to the caller; never carries internal detail.
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthorized => "Unauthorized: Invalid API key".to_string(),
            Self::NotFound(_) => "Item not found".to_string(),
            Self::Validation(_) => {
                "Please specify a name or a quantity to change and the changed value".to_string()
            }
            Self::BadRequest(msg) => msg.clone(),
            Self::InvalidBody(_) => "Invalid request body".to_string(),
            Self::InvalidQuery(_) => "Invalid query parameters".to_string(),
            Self::ReadDocument(_) => "Internal server error while reading file".to_string(),
            Self::ParseDocument(_) => "Error parsing JSON data".to_string(),
            Self::WriteDocument(_) => "Internal server error while writing file".to_string(),
            Self::ExternalService(_) => "Internal server error".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::ExternalService(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
