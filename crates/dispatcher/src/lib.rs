//! Client for the self-hosted Email Dispatcher API, plus the contact form
//! state machine that drives it.
//!
//! This is the browser-side submission path of the Acordi website: the form
//! builds an [`EmailRequest`], the client POSTs it to the dispatcher, and
//! every failure surfaces as a single typed [`EmailApiError`] so callers can
//! branch on the status code alone.

mod client;
mod error;
mod form;
mod types;

pub use client::DispatcherClient;
pub use error::EmailApiError;
pub use form::{ContactForm, FormStatus, STATUS_RESET_DELAY};
pub use types::{EmailRequest, EmailResponse, ErrorResponse, Recipient, Sender};
