// src/auth/middleware.rs
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::SESSION_COOKIE;
use crate::AppState;

/// Guards the dashboard. A live session is attached to the request for
/// [`super::OperatorSession`]; anything else is sent to the login page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.session_store.get_session(cookie.value()).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            tracing::debug!("No session for {}, redirecting to login", request.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}
