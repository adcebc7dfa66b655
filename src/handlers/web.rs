// src/handlers/web.rs
use axum::{
    extract::{ConnectInfo, Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use validator::Validate;

use crate::forms::NoticeKind;
use crate::middleware::rate_limit::extract_client_id;
use crate::models::ContactMessage;
use crate::templates;
use crate::templates::home::HomeView;
use crate::AppState;

pub const LOAD_FAILED: &str = "Failed to load data. Please try again later.";

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub contact: Option<String>,
}

/// Outcome of a contact form submission, carried back to `/` in the query.
fn contact_notice(status: &str) -> Option<(NoticeKind, &'static str)> {
    match status {
        "sent" => Some((
            NoticeKind::Success,
            "Thank you for reaching out! We appreciate your message and will get back to you shortly.",
        )),
        "failed" => Some((
            NoticeKind::Error,
            "There was an error sending your message. Please try again.",
        )),
        "invalid" => Some((
            NoticeKind::Error,
            "Please enter your name, a valid email address and a message.",
        )),
        "limited" => Some((
            NoticeKind::Error,
            "Too many messages. Please try again later.",
        )),
        _ => None,
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> (StatusCode, Html<String>) {
    let data = match state.backend.frontend_data().await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Failed to load site content: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Html(templates::home::render_error(LOAD_FAILED)),
            );
        }
    };

    let view = HomeView {
        image_base: &state.config.public_backend_url,
        contact_notice: query.contact.as_deref().and_then(contact_notice),
    };
    (StatusCode::OK, Html(templates::home::render(&data, &view)))
}

pub async fn contact(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Form(message): Form<ContactMessage>,
) -> Redirect {
    let client_id = extract_client_id(&headers, peer.map(|ConnectInfo(addr)| addr.ip()));
    if state.contact_limiter.check(&client_id).await.is_err() {
        return Redirect::to("/?contact=limited#contact");
    }

    let message = ContactMessage {
        name: message.name.trim().to_string(),
        number: message.number.trim().to_string(),
        email: message.email.trim().to_string(),
        message: message.message.trim().to_string(),
    };
    if message.validate().is_err() {
        return Redirect::to("/?contact=invalid#contact");
    }

    match state.backend.send_contact_message(&message).await {
        Ok(()) => {
            tracing::info!("📨 Contact message forwarded from {}", message.email);
            Redirect::to("/?contact=sent#contact")
        }
        Err(e) => {
            tracing::warn!("Contact message failed: {}", e);
            Redirect::to("/?contact=failed#contact")
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
