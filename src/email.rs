//! Brevo transactional email client and the contact notification templates.

use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("email provider rejected the message with status {status}")]
    Rejected { status: u16 },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// Payload for Brevo's `POST /v3/smtp/email`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpEmail {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub reply_to: EmailAddress,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// A contact form submission after validation and sanitization.
///
/// `name`, `phone` and `message` are already HTML-escaped; `email` is
/// normalized but not escaped (see `sanitize::sanitize_email`).
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Build the notification email sent to the firm for one submission.
///
/// Fixed sender identity, configured recipient, reply-to pointing at the
/// submitter so the firm can answer directly.
pub fn build_contact_email(config: &EmailConfig, contact: &ContactMessage) -> SmtpEmail {
    let phone_html = match &contact.phone {
        Some(phone) => format!(
            "\n                <div class=\"field\">\n                  <div class=\"label\">Telefone:</div>\n                  <div class=\"value\">{phone}</div>\n                </div>\n                "
        ),
        None => String::new(),
    };

    let html_content = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <style>
      body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background: #283b47; color: white; padding: 20px; text-align: center; }}
      .content {{ background: #f9f9f9; padding: 30px; border: 1px solid #ddd; }}
      .field {{ margin-bottom: 20px; }}
      .label {{ font-weight: bold; color: #283b47; }}
      .value {{ margin-top: 5px; }}
      .footer {{ text-align: center; padding: 20px; color: #666; font-size: 12px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h2>Novo Contato do Site</h2>
      </div>
      <div class="content">
        <div class="field">
          <div class="label">Nome:</div>
          <div class="value">{name}</div>
        </div>
        <div class="field">
          <div class="label">E-mail:</div>
          <div class="value">{email}</div>
        </div>{phone_html}
        <div class="field">
          <div class="label">Mensagem:</div>
          <div class="value">{message}</div>
        </div>
      </div>
      <div class="footer">
        Enviado através do formulário de contato do site Escritório Contábil Acordi
      </div>
    </div>
  </body>
</html>"#,
        name = contact.name,
        email = contact.email,
        phone_html = phone_html,
        message = contact.message.replace('\n', "<br>"),
    );

    let phone_text = match &contact.phone {
        Some(phone) => format!("Telefone: {phone}\n"),
        None => String::new(),
    };

    let text_content = format!(
        "Novo Contato do Site\n\n\
         Nome: {name}\n\
         E-mail: {email}\n\
         {phone_text}Mensagem:\n\
         {message}\n\n\
         ---\n\
         Enviado através do formulário de contato do site Escritório Contábil Acordi",
        name = contact.name,
        email = contact.email,
        phone_text = phone_text,
        message = contact.message,
    );

    SmtpEmail {
        sender: EmailAddress::new(&config.sender_email, &config.sender_name),
        to: vec![EmailAddress::new(
            &config.recipient_email,
            &config.recipient_name,
        )],
        reply_to: EmailAddress::new(&contact.email, &contact.name),
        subject: format!("Novo contato do site - {}", contact.name),
        html_content,
        text_content,
    }
}

/// HTTP client for the Brevo transactional email API.
#[derive(Debug, Clone)]
pub struct BrevoClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl BrevoClient {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Forward one email to the provider.
    ///
    /// The provider's error body is logged server-side only; callers get a
    /// generic `EmailError` with no upstream detail.
    pub async fn send(&self, email: &SmtpEmail) -> Result<(), EmailError> {
        let url = format!("{}/v3/smtp/email", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("accept", "application/json")
            .header("api-key", &self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Brevo API error");
            return Err(EmailError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(subject = %email.subject, "email sent successfully");
        Ok(())
    }
}
