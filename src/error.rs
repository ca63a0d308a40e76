use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Team has no resolvable schedule page (non-2xx from the source), or a
    /// requested chart file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Source page layout changed, expected structure missing.
    #[error("parse error: {0}")]
    Parse(String),

    /// A single row's date cell was unreadable. Recovered by the caller:
    /// the row is skipped, the fetch continues.
    #[error("unparseable date cell: {0}")]
    DateParse(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
