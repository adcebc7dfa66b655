// src/services/backend.rs
//! Client for the remote content backend.
//!
//! Everything the site shows or edits lives behind this API. Handlers only
//! see the [`ContentBackend`] trait so the HTTP client can be swapped for an
//! in-memory double in tests.

use axum::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::Config;
use crate::models::{
    AccountResponse, AccountUpdate, ContactMessage, Credentials, HomePageData, LoginResponse,
    Section,
};

const MAX_LOGGED_BODY: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("{0}")]
    Rejected(String),
}

/// A file travelling to the backend as one multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart body of a section save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPayload {
    pub fields: Vec<(&'static str, String)>,
    pub files: Vec<FilePart>,
}

impl SectionPayload {
    pub fn text(&mut self, field: &'static str, value: impl Into<String>) {
        self.fields.push((field, value.into()));
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.field == name)
    }

    fn into_form(self) -> Result<Form, BackendError> {
        let mut form = Form::new();
        for (field, value) in self.fields {
            form = form.text(field, value);
        }
        for file in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// How a section save reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// `POST /api/<section>`; the backend creates or overwrites the row.
    Upsert,
    /// `PUT /api/<section>/<id>`.
    Update(i64),
}

/// What the backend reported after a save, when it said anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReceipt {
    pub id: Option<i64>,
    pub message: Option<String>,
}

#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Aggregate content of the public site. No authentication.
    async fn frontend_data(&self) -> Result<HomePageData, BackendError>;

    /// Current record of one section, `None` when nothing was saved yet.
    async fn fetch_section(&self, section: Section, token: &str)
        -> Result<Option<Value>, BackendError>;

    async fn save_section(
        &self,
        section: Section,
        target: SaveTarget,
        token: &str,
        payload: SectionPayload,
    ) -> Result<SaveReceipt, BackendError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError>;

    async fn account_email(&self, token: &str) -> Result<Option<String>, BackendError>;

    /// Returns the backend's confirmation message.
    async fn update_account(
        &self,
        token: &str,
        update: &AccountUpdate,
    ) -> Result<Option<String>, BackendError>;

    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), BackendError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .user_agent(concat!("goals-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }

    fn section_url(&self, section: Section, target: SaveTarget) -> Result<Url, BackendError> {
        match target {
            SaveTarget::Upsert => self.url(&format!("api/{}", section.endpoint())),
            SaveTarget::Update(id) => self.url(&format!("api/{}/{}", section.endpoint(), id)),
        }
    }
}

#[async_trait]
impl ContentBackend for HttpBackend {
    async fn frontend_data(&self) -> Result<HomePageData, BackendError> {
        let response = self
            .client
            .get(self.url("api/frontend-data")?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(log_transport)?;

        let body = read_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn fetch_section(
        &self,
        section: Section,
        token: &str,
    ) -> Result<Option<Value>, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("api/{}", section.endpoint()))?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(log_transport)?;

        let body = read_json(response).await?;
        Ok(extract_record(body))
    }

    async fn save_section(
        &self,
        section: Section,
        target: SaveTarget,
        token: &str,
        payload: SectionPayload,
    ) -> Result<SaveReceipt, BackendError> {
        let url = self.section_url(section, target)?;
        let request = match target {
            SaveTarget::Upsert => self.client.post(url),
            SaveTarget::Update(_) => self.client.put(url),
        };

        debug!(
            "Saving {} with {} fields and {} files",
            section,
            payload.fields.len(),
            payload.files.len()
        );

        let response = request
            .bearer_auth(token)
            .multipart(payload.into_form()?)
            .send()
            .await
            .map_err(log_transport)?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Backend rejected {} save with {}", section, status);
            return Err(status_error(status, &body));
        }

        // Some endpoints answer with an empty or non-JSON body on success.
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        Ok(SaveReceipt {
            id: extract_record(parsed.clone()).and_then(|record| record_id(&record)),
            message: parsed
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        let response = self
            .client
            .post(self.url("api/login")?)
            .json(credentials)
            .send()
            .await
            .map_err(log_transport)?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = parsed
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Invalid email or password");
            return Err(BackendError::Rejected(message.to_string()));
        }

        let login: LoginResponse = serde_json::from_value(parsed)?;
        if login.token.is_empty() {
            let message = if login.message.is_empty() {
                "Invalid email or password".to_string()
            } else {
                login.message
            };
            return Err(BackendError::Rejected(message));
        }
        Ok(login)
    }

    async fn account_email(&self, token: &str) -> Result<Option<String>, BackendError> {
        let response = self
            .client
            .get(self.url("api/updateEp")?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(log_transport)?;

        let body = read_json(response).await?;
        let account: AccountResponse = serde_json::from_value(body)?;
        Ok(account
            .data
            .map(|data| data.email)
            .filter(|email| !email.is_empty()))
    }

    async fn update_account(
        &self,
        token: &str,
        update: &AccountUpdate,
    ) -> Result<Option<String>, BackendError> {
        let response = self
            .client
            .post(self.url("api/updateEp")?)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(log_transport)?;

        let status = response.status();
        let body = response.text().await?;
        let account: AccountResponse = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() {
            return Err(match account.error {
                Some(error) => BackendError::Rejected(error),
                None => status_error(status, &body),
            });
        }
        Ok(account.message)
    }

    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("api/contactMessage")?)
            .json(message)
            .send()
            .await
            .map_err(log_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(())
    }
}

/// Unwraps the shapes section endpoints answer with: a bare object, a
/// one-element array, or either of those under `data`.
pub fn extract_record(value: Value) -> Option<Value> {
    match value {
        Value::Array(rows) => rows.into_iter().next().and_then(extract_record),
        Value::Object(mut map) => {
            if map.len() <= 3 && map.contains_key("data") {
                let data = map.remove("data").unwrap_or(Value::Null);
                return extract_record(data);
            }
            if map.is_empty() {
                None
            } else {
                Some(Value::Object(map))
            }
        }
        _ => None,
    }
}

pub fn record_id(record: &Value) -> Option<i64> {
    match record.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

fn status_error(status: reqwest::StatusCode, body: &str) -> BackendError {
    BackendError::Status {
        status: status.as_u16(),
        body: body.chars().take(MAX_LOGGED_BODY).collect(),
    }
}

fn log_transport(err: reqwest::Error) -> BackendError {
    error!("Backend unreachable: {}", err);
    BackendError::Transport(err)
}
