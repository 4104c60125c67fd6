use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API-level failure taxonomy. Every variant renders as
/// `{"success": false, "error": <message>}` with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Usuario no encontrado con el documento de identidad proporcionado")]
    NotFound,

    #[error("Usuario no tiene foto y no se proporcionó imagen para generar una nueva")]
    MissingUpload,

    #[error("Gemini no retornó ninguna imagen (Empty Response)")]
    EmptyGeneration,

    #[error("Failed to upload image to S3")]
    Storage(#[source] anyhow::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingUpload => StatusCode::BAD_REQUEST,
            ApiError::EmptyGeneration | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}
