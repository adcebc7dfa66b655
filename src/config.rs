// src/config.rs
use anyhow::Context;
use std::net::SocketAddr;
use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL the server talks to.
    pub backend_url: Url,
    /// Base URL browsers load uploaded images from.
    pub public_backend_url: Url,
    pub session_ttl_hours: i64,
    pub max_upload_bytes: usize,
    pub backend_timeout_secs: u64,
    pub enable_hsts: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = parse_base_url(
            &std::env::var("BACKEND_URL").context("BACKEND_URL environment variable must be set")?,
        )?;
        let public_backend_url = match std::env::var("PUBLIC_BACKEND_URL") {
            Ok(raw) if !raw.trim().is_empty() => parse_base_url(&raw)?,
            _ => backend_url.clone(),
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a port number")?,
            backend_url,
            public_backend_url,
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "720".to_string()) // 30 days
                .parse()
                .context("SESSION_TTL_HOURS must be an integer")?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".to_string()) // 10MB
                .parse()
                .context("MAX_UPLOAD_BYTES must be an integer")?,
            backend_timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("BACKEND_TIMEOUT_SECS must be an integer")?,
            enable_hsts: std::env::var("ENABLE_HSTS").unwrap_or_default() == "true",
        })
    }

    pub fn server_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))
    }

    /// Request body ceiling. Images over `max_upload_bytes` are refused by the
    /// form parser; the body itself may carry them again as base64 data URLs
    /// (4 bytes per 3) next to the text fields.
    pub fn request_body_limit(&self) -> usize {
        self.max_upload_bytes.div_ceil(3) * 4 + FORM_FIELDS_ALLOWANCE
    }

    /// Origin (scheme://host[:port]) of the public image host, for the CSP.
    pub fn image_origin(&self) -> String {
        self.public_backend_url
            .origin()
            .ascii_serialization()
    }
}

/// Room for text fields and data URL prefixes on top of the image bytes.
const FORM_FIELDS_ALLOWANCE: usize = 1024 * 1024;

/// Parses a base URL and normalises it to end with a slash so that
/// `Url::join` appends instead of replacing the last path segment.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let trimmed = raw.trim();
    let normalised = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&normalised).with_context(|| format!("Invalid URL: {}", raw))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("Backend URL must use http or https: {}", raw);
    }
    Ok(url)
}

#[cfg(test)]
pub fn test_config() -> Config {
    let backend_url = parse_base_url("http://backend.test").unwrap();
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        public_backend_url: backend_url.clone(),
        backend_url,
        session_ttl_hours: 720,
        max_upload_bytes: 10 * 1024 * 1024,
        backend_timeout_secs: 5,
        enable_hsts: false,
    }
}
