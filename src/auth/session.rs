// src/auth/session.rs
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

fn generate_session_id() -> String {
    let mut random_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut random_bytes);
    hex::encode(random_bytes)
}

/// A logged-in operator. The bearer token never leaves the server.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

// In-memory session store; sessions do not survive a restart.
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create_session(&self, token: String, name: String, email: String) -> String {
        let session_id = generate_session_id();
        let session = Session {
            token,
            name,
            email,
            expires_at: Utc::now() + self.ttl,
        };

        self.sessions.write().await.insert(session_id.clone(), session);
        session_id
    }

    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(session_id)?;

        if session.expires_at < Utc::now() {
            return None;
        }

        Some(session.clone())
    }

    pub async fn delete_session(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Returns how many sessions were purged.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        before - sessions.len()
    }
}

/// The session `require_session` attached to the request.
#[derive(Debug, Clone)]
pub struct OperatorSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for OperatorSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(OperatorSession)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
