//! Web server implementation using Axum

use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    email::BrevoClient,
    rate_limit::{FixedWindowLimiter, RateLimit},
    routes::{AppState, router},
};

/// Start the web server
pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    if config.email.api_key.is_empty() {
        tracing::warn!(
            "email provider API key is not configured; submissions will fail with a server configuration error"
        );
    }

    let rate_limiter: Arc<dyn RateLimit> = Arc::new(FixedWindowLimiter::new(
        config.rate_limit.max_requests,
        Duration::from_secs(config.rate_limit.window_secs),
    ));
    let email = BrevoClient::new(&config.email);

    let state = AppState {
        config,
        rate_limiter,
        email,
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
