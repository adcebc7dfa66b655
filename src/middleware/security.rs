// src/middleware/security.rs
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::AppState;

const CDNJS: &str = "https://cdnjs.cloudflare.com";

/// CSP for both the public site and the dashboard. Images may come from the
/// backend's upload origin; the rich text editor is served from cdnjs.
pub fn content_security_policy(image_origin: &str) -> String {
    [
        "default-src 'self'".to_string(),
        format!("script-src 'self' {}", CDNJS),
        // The editor sets inline styles on its own markup.
        format!("style-src 'self' 'unsafe-inline' {}", CDNJS),
        format!("img-src 'self' data: https: {}", image_origin),
        format!("font-src 'self' {}", CDNJS),
        "connect-src 'self'".to_string(),
        "frame-ancestors 'none'".to_string(),
        "base-uri 'self'".to_string(),
        "form-action 'self'".to_string(),
    ]
    .join("; ")
}

pub async fn security_headers(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Prevent clickjacking
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    );

    // Prevent MIME sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    match HeaderValue::from_str(&content_security_policy(&state.config.image_origin())) {
        Ok(csp) => {
            headers.insert(header::CONTENT_SECURITY_POLICY, csp);
        }
        Err(e) => tracing::warn!("Skipping invalid CSP header: {}", e),
    }

    headers.insert(
        header::HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=(), payment=(), usb=()"),
    );

    // Only enable behind HTTPS
    if state.config.enable_hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    headers.remove(header::SERVER);

    response
}
