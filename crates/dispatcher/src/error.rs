use thiserror::Error;

/// The one typed error the dispatcher client raises for every failure
/// category.
///
/// HTTP error responses carry the dispatcher's own status/error/message/
/// details; transport failures and undecodable bodies collapse to a zero
/// status with a generic "Network Error" code, so callers can branch on
/// `status` alone.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct EmailApiError {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub details: Option<Vec<String>>,
}

impl EmailApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            error: "Network Error".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
