use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::email::EmailError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("email provider API key is not configured")]
    MissingApiKey,

    #[error(transparent)]
    Email(#[from] EmailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            // Validation failures are surfaced verbatim to the caller
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
            ),
            // Security-sensitive failures log full detail and return a
            // generic message
            AppError::MissingApiKey => {
                tracing::error!("BREVO_API_KEY is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AppError::Email(e) => {
                tracing::error!(error = %e, "Error sending email");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao enviar email. Por favor, tente novamente.".to_string(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
