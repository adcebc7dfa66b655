// src/auth/auth_session.rs
use axum::{
    extract::{ConnectInfo, Form, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::net::SocketAddr;
use std::sync::Arc;
use time::Duration as TimeDuration;
use validator::Validate;

use super::SESSION_COOKIE;
use crate::middleware::rate_limit::extract_client_id;
use crate::models::Credentials;
use crate::services::backend::BackendError;
use crate::templates;
use crate::AppState;

pub async fn login_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.session_store.get_session(cookie.value()).await.is_some() {
            return Redirect::to("/dashboard").into_response();
        }
    }
    Html(templates::login::render(None, "")).into_response()
}

pub async fn login_form_handler(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Result<(CookieJar, Redirect), (StatusCode, Html<String>)> {
    let client_id = extract_client_id(&headers, peer.map(|ConnectInfo(addr)| addr.ip()));
    if state.login_limiter.check(&client_id).await.is_err() {
        return Err(render_login_error(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many login attempts. Please try again later.",
            &credentials.email,
        ));
    }

    if credentials.validate().is_err() {
        return Err(render_login_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter email and password",
            &credentials.email,
        ));
    }

    let login = match state.backend.login(&credentials).await {
        Ok(login) => login,
        Err(BackendError::Rejected(message)) => {
            tracing::warn!("🔒 Login rejected for {}", credentials.email);
            return Err(render_login_error(
                StatusCode::UNAUTHORIZED,
                &message,
                &credentials.email,
            ));
        }
        Err(e) => {
            tracing::error!("Login request failed: {}", e);
            return Err(render_login_error(
                StatusCode::BAD_GATEWAY,
                "Login failed. Please try again.",
                &credentials.email,
            ));
        }
    };

    let email = if login.email.is_empty() {
        credentials.email.clone()
    } else {
        login.email
    };
    let session_id = state
        .session_store
        .create_session(login.token, login.name, email.clone())
        .await;
    tracing::info!("✅ Operator {} logged in", email);

    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .max_age(TimeDuration::hours(state.session_store.ttl().num_hours()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.enable_hsts)
        .build();

    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.session_store.delete_session(cookie.value()).await;
        tracing::info!("👋 Operator logged out");
    }

    // Remove cookie
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::seconds(0))
        .build();

    (jar.add(cookie), Redirect::to("/"))
}

fn render_login_error(status: StatusCode, message: &str, email: &str) -> (StatusCode, Html<String>) {
    (status, Html(templates::login::render(Some(message), email)))
}
