use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};

use crate::routes::AppState;

/// Middleware to set security and CORS headers on every response
///
/// The fixed security headers and the CORS method/header advertisements are
/// set unconditionally; `Access-Control-Allow-Origin` is echoed only when
/// the request's Origin is on the configured allow-list.
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "x-xss-protection",
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("POST"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type"),
    );

    if let Some(origin) = origin {
        let allowed = state
            .config
            .cors
            .allowed_origins
            .iter()
            .any(|allowed| allowed == &origin);
        if allowed {
            if let Ok(value) = HeaderValue::from_str(&origin) {
                headers.insert("access-control-allow-origin", value);
            }
        }
    }

    response
}
