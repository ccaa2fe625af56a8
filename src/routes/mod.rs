use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::{config::Config, email::BrevoClient, rate_limit::RateLimit};

mod health;
mod send_email;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub rate_limiter: Arc<dyn RateLimit>,
    pub email: BrevoClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/send-email",
            post(send_email::action)
                .options(send_email::preflight)
                .fallback(send_email::method_not_allowed),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::security_headers_middleware,
        ))
        .with_state(state)
}
