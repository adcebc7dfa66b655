// src/auth/mod.rs
pub mod auth_session;
pub mod middleware;
pub mod session;

pub use session::{OperatorSession, Session};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";
