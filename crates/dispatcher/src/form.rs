//! Contact form state machine.
//!
//! Everything the website form does apart from rendering: field state, the
//! submission status transitions, localized user-facing messages and the
//! delayed auto-reset back to idle.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::{
    client::DispatcherClient,
    error::EmailApiError,
    types::{EmailRequest, Recipient, Sender},
};

/// How long a success message stays on screen before the form returns to
/// idle.
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(5);

const RECIPIENT_EMAIL: &str = "pedroacordi2@gmail.com";
const RECIPIENT_NAME: &str = "Contato Escritório Contábil Acordi";
const SENDER_EMAIL: &str = "paasoares@minha.fag.edu.br";
const SENDER_NAME: &str = "Website Escritório Contábil Acordi";

const SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso! Entraremos em contato em breve.";
const AUTH_ERROR_MESSAGE: &str = "Erro de autenticação. Por favor, contate o suporte.";
const UNAVAILABLE_MESSAGE: &str =
    "Serviço de email temporariamente indisponível. Tente novamente mais tarde.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.clear_status();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.clear_status();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        self.clear_status();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = value.into();
        self.clear_status();
    }

    // Any field edit while a status is showing dismisses it
    fn clear_status(&mut self) {
        if self.status != FormStatus::Idle {
            self.status = FormStatus::Idle;
        }
    }

    /// Submit the form through the dispatcher.
    ///
    /// No-op while a submission is already in flight (the disabled submit
    /// control). On success the fields are cleared; on failure the status
    /// carries a localized message chosen from the error's status code.
    pub async fn submit(&mut self, client: &DispatcherClient) {
        if self.status == FormStatus::Loading {
            return;
        }
        self.status = FormStatus::Loading;

        let request = self.build_request();
        match client.send_email(&request).await {
            Ok(_) => {
                self.status = FormStatus::Success(SUCCESS_MESSAGE.to_string());
                self.name.clear();
                self.email.clear();
                self.phone.clear();
                self.message.clear();
            }
            Err(error) => {
                tracing::error!(
                    status = error.status,
                    message = %error.message,
                    "Error submitting form"
                );
                self.status = FormStatus::Error(error_message(&error));
            }
        }
    }

    /// Return a success status to idle after the on-screen delay.
    pub async fn reset_after(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
        if matches!(self.status, FormStatus::Success(_)) {
            self.status = FormStatus::Idle;
        }
    }

    fn build_request(&self) -> EmailRequest {
        let phone_display = if self.phone.is_empty() {
            "Não informado"
        } else {
            self.phone.as_str()
        };

        let html_content = format!(
            "<h2>Nova mensagem recebida do site</h2>\n\
             <p><strong>Nome:</strong> {name}</p>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             <p><strong>Telefone:</strong> {phone}</p>\n\
             <p><strong>Mensagem:</strong></p>\n\
             <p>{message}</p>",
            name = self.name,
            email = self.email,
            phone = phone_display,
            message = self.message.replace('\n', "<br>"),
        );

        let text_content = format!(
            "Nova mensagem recebida do site\n\n\
             Nome: {name}\n\
             Email: {email}\n\
             Telefone: {phone}\n\n\
             Mensagem:\n\
             {message}",
            name = self.name,
            email = self.email,
            phone = phone_display,
            message = self.message,
        );

        let mut params = HashMap::new();
        params.insert("customerName".to_string(), Value::String(self.name.clone()));
        params.insert(
            "customerEmail".to_string(),
            Value::String(self.email.clone()),
        );
        params.insert(
            "customerPhone".to_string(),
            Value::String(self.phone.clone()),
        );

        EmailRequest {
            to: vec![Recipient {
                email: RECIPIENT_EMAIL.to_string(),
                name: Some(RECIPIENT_NAME.to_string()),
            }],
            subject: format!("Nova mensagem de contato: {}", self.name),
            html_content,
            reply_to: Sender {
                email: self.email.clone(),
                name: self.name.clone(),
            },
            text_content: Some(text_content),
            sender: Sender {
                email: SENDER_EMAIL.to_string(),
                name: SENDER_NAME.to_string(),
            },
            params: Some(params),
            tags: Some(vec!["contact-form".to_string(), "website".to_string()]),
        }
    }
}

fn error_message(error: &EmailApiError) -> String {
    match error.status {
        401 => AUTH_ERROR_MESSAGE.to_string(),
        400 => error
            .details
            .as_ref()
            .filter(|details| !details.is_empty())
            .map(|details| details.join(", "))
            .unwrap_or_else(|| error.message.clone()),
        502 => UNAVAILABLE_MESSAGE.to_string(),
        _ => error.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_identities_and_tags() {
        let mut form = ContactForm::new();
        form.set_name("Maria");
        form.set_email("maria@example.com");
        form.set_message("Olá");

        let request = form.build_request();
        assert_eq!(request.to[0].email, RECIPIENT_EMAIL);
        assert_eq!(request.sender.email, SENDER_EMAIL);
        assert_eq!(request.reply_to.email, "maria@example.com");
        assert_eq!(request.subject, "Nova mensagem de contato: Maria");
        assert_eq!(
            request.tags,
            Some(vec!["contact-form".to_string(), "website".to_string()])
        );
        assert!(request.html_content.contains("Não informado"));
    }

    #[test]
    fn error_message_selection_by_status() {
        let auth = EmailApiError {
            status: 401,
            error: "Unauthorized".to_string(),
            message: "bad key".to_string(),
            details: None,
        };
        assert_eq!(error_message(&auth), AUTH_ERROR_MESSAGE);

        let validation = EmailApiError {
            status: 400,
            error: "Bad Request".to_string(),
            message: "m".to_string(),
            details: Some(vec!["email invalid".to_string(), "name missing".to_string()]),
        };
        assert_eq!(error_message(&validation), "email invalid, name missing");

        let validation_no_details = EmailApiError {
            status: 400,
            error: "Bad Request".to_string(),
            message: "m".to_string(),
            details: None,
        };
        assert_eq!(error_message(&validation_no_details), "m");

        let upstream = EmailApiError {
            status: 502,
            error: "Bad Gateway".to_string(),
            message: "provider down".to_string(),
            details: None,
        };
        assert_eq!(error_message(&upstream), UNAVAILABLE_MESSAGE);

        let other = EmailApiError::network("connection refused");
        assert_eq!(error_message(&other), "connection refused");
    }

    #[tokio::test]
    async fn submit_is_a_no_op_while_loading() {
        // Unroutable client: any actual request would error and flip the
        // status, so staying in Loading proves the guard short-circuited.
        let client = DispatcherClient::new("http://127.0.0.1:9", "key");
        let mut form = ContactForm::new();
        form.set_name("Maria");
        form.status = FormStatus::Loading;

        form.submit(&client).await;
        assert_eq!(*form.status(), FormStatus::Loading);
        assert_eq!(form.name(), "Maria");
    }
}
