// src/middleware/rate_limit.rs
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Fixed-window request counter keyed by client.
#[derive(Clone)]
pub struct RateLimiter {
    name: &'static str,
    requests: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
    max_requests: usize,
    window: Duration,
}

struct RateLimitEntry {
    count: usize,
    window_start: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited;

impl RateLimiter {
    pub fn new(name: &'static str, max_requests: usize, window_secs: u64) -> Self {
        Self {
            name,
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// 5 attempts per 15 minutes.
    pub fn for_login() -> Self {
        Self::new("login", 5, 900)
    }

    /// 10 messages per 10 minutes.
    pub fn for_contact() -> Self {
        Self::new("contact", 10, 600)
    }

    pub async fn check(&self, key: &str) -> Result<(), RateLimited> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        let entry = requests
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // Reset window if expired
        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            tracing::warn!("⛔ {} rate limit exceeded for client: {}", self.name, key);
            return Err(RateLimited);
        }

        entry.count += 1;
        Ok(())
    }

    /// Drops entries whose window has passed (run from a background task).
    pub async fn cleanup(&self) {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        requests.retain(|_, entry| now.duration_since(entry.window_start) <= self.window);
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.requests.read().await.len()
    }
}

/// Client identifier: the proxy-reported address when present, the peer
/// address otherwise.
pub fn extract_client_id(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            // Take the first IP (client's original IP)
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.trim().to_string();
        }
    }

    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
