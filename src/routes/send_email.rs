//! The contact form relay endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    email::{ContactMessage, build_contact_email},
    error::AppError,
    routes::AppState,
    sanitize::{
        MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, is_valid_email, sanitize_email,
        sanitize_input,
    },
};

#[derive(Debug, Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// POST /api/send-email
///
/// Rate-limits by client IP, validates and sanitizes the submission, then
/// forwards it to the email provider.
pub async fn action(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let identifier = client_identifier(&headers);
    if !state.rate_limiter.check(&identifier) {
        tracing::warn!(%identifier, "contact form rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    if !state.email.is_configured() {
        return Err(AppError::MissingApiKey);
    }

    let input: ContactFormData = serde_json::from_str(&body)
        .map_err(|_| AppError::Validation("Invalid request body".to_string()))?;
    let contact = validate_and_sanitize(&input)?;

    let email = build_contact_email(&state.config.email, &contact);
    state.email.send(&email).await?;

    tracing::info!(%identifier, "contact form relayed");
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Email enviado com sucesso!"
        })),
    ))
}

/// OPTIONS /api/send-email - CORS pre-flight, 200 with no body
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/send-email
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Client identifier from forwarded-IP headers, falling back to a literal
/// "unknown" sentinel.
fn client_identifier(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn validate_and_sanitize(input: &ContactFormData) -> Result<ContactMessage, AppError> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Missing required fields: name, email, and message are required".to_string(),
        ));
    }

    let email = sanitize_email(&input.email);
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }

    // Oversize rejection checks the original, pre-sanitized lengths
    if input.name.chars().count() > MAX_NAME_LEN
        || input.message.chars().count() > MAX_MESSAGE_LEN
    {
        return Err(AppError::Validation("Input too long".to_string()));
    }

    let phone = input
        .phone
        .as_deref()
        .filter(|phone| !phone.trim().is_empty())
        .map(|phone| sanitize_input(phone, MAX_PHONE_LEN));

    Ok(ContactMessage {
        name: sanitize_input(&input.name, MAX_NAME_LEN),
        email,
        phone,
        message: sanitize_input(&input.message, MAX_MESSAGE_LEN),
    })
}
