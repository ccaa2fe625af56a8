use crate::{
    error::EmailApiError,
    types::{EmailRequest, EmailResponse, ErrorResponse},
};

const SEND_PATH: &str = "/api/v1/emails/send";
const HEALTH_PATH: &str = "/api/v1/emails/health";

/// HTTP client for the Email Dispatcher API.
#[derive(Debug, Clone)]
pub struct DispatcherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DispatcherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Send an email through the dispatcher.
    ///
    /// Non-2xx responses are decoded into the dispatcher's error shape and
    /// rethrown as [`EmailApiError`]; anything lower-level becomes a
    /// status-0 network error.
    pub async fn send_email(&self, request: &EmailRequest) -> Result<EmailResponse, EmailApiError> {
        let url = format!("{}{}", self.base_url, SEND_PATH);
        let response = self
            .http
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| EmailApiError::network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<EmailResponse>()
                .await
                .map_err(|e| EmailApiError::network(e.to_string()));
        }

        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(EmailApiError {
                status: body.status,
                error: body.error,
                message: body.message,
                details: body.details,
            }),
            Err(e) => Err(EmailApiError::network(e.to_string())),
        }
    }

    /// Check the health of the email service.
    ///
    /// Unauthenticated probe; any failure, including transport errors,
    /// collapses to `false`.
    pub async fn health(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "email service health probe failed");
                false
            }
        }
    }
}
