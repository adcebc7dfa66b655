// src/main.rs
mod auth;
mod config;
mod forms;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod templates;
mod utils;

use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::middleware::rate_limit::RateLimiter;
use crate::routes::create_router;
use crate::services::backend::{ContentBackend, HttpBackend};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn ContentBackend>,
    pub session_store: Arc<SessionStore>,
    pub login_limiter: Arc<RateLimiter>,
    pub contact_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn ContentBackend>) -> Self {
        Self {
            session_store: Arc::new(SessionStore::new(config.session_ttl_hours)),
            login_limiter: Arc::new(RateLimiter::for_login()),
            contact_limiter: Arc::new(RateLimiter::for_contact()),
            config,
            backend,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("goals_site=info,tower_http=info")),
        )
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .init();

    tracing::info!("🚀 Starting Goals site...");

    let config = Config::from_env()?;
    tracing::info!("🔌 Content backend: {}", config.backend_url);
    if config.public_backend_url != config.backend_url {
        tracing::info!("🖼️  Public image host: {}", config.public_backend_url);
    }

    let backend = HttpBackend::new(&config)?;
    let state = Arc::new(AppState::new(config.clone(), Arc::new(backend)));

    tracing::info!("🔧 Starting background tasks...");

    // Session cleanup task
    let session_store = state.session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            let purged = session_store.cleanup_expired().await;
            tracing::debug!("Session cleanup completed, {} purged", purged);
        }
    });

    // Rate limiter cleanup task
    let limiters = [state.login_limiter.clone(), state.contact_limiter.clone()];
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300)); // 5 minutes
        loop {
            interval.tick().await;
            for limiter in &limiters {
                limiter.cleanup().await;
            }
            tracing::debug!("Rate limiter cleanup completed");
        }
    });

    let app = create_router(state);

    let addr = config.server_addr()?;
    tracing::info!("✅ Goals site listening on {}", addr);
    tracing::info!("🌐 Site: http://{}", addr);
    tracing::info!("🛠️  Dashboard: http://{}/dashboard", addr);
    if config.enable_hsts {
        tracing::info!("🔒 HSTS enabled");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
