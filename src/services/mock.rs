// src/services/mock.rs
//! In-memory [`ContentBackend`] for router tests. Records every write.
use axum::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::backend::{BackendError, ContentBackend, SaveReceipt, SaveTarget, SectionPayload};
use crate::models::{
    AccountUpdate, ContactMessage, Credentials, HomePageData, LoginResponse, Section,
};

pub const OPERATOR_EMAIL: &str = "ops@goals.app";
pub const OPERATOR_PASSWORD: &str = "correct-horse";
pub const OPERATOR_TOKEN: &str = "token-from-login";

#[derive(Debug, Clone)]
pub struct RecordedSave {
    pub section: Section,
    pub target: SaveTarget,
    pub token: String,
    pub payload: SectionPayload,
}

#[derive(Default)]
pub struct MockBackend {
    frontend: Option<Value>,
    sections: HashMap<Section, Value>,
    fail_fetches: bool,
    fail_saves: bool,
    fail_contact: bool,
    pub fetches: Mutex<Vec<(Section, String)>>,
    pub saves: Mutex<Vec<RecordedSave>>,
    pub messages: Mutex<Vec<ContactMessage>>,
    pub account_updates: Mutex<Vec<AccountUpdate>>,
}

fn unavailable() -> BackendError {
    BackendError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frontend(mut self, data: Value) -> Self {
        self.frontend = Some(data);
        self
    }

    pub fn with_section(mut self, section: Section, record: Value) -> Self {
        self.sections.insert(section, record);
        self
    }

    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn failing_contact(mut self) -> Self {
        self.fail_contact = true;
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|saves| saves.len()).unwrap_or_default()
    }

    pub fn last_save(&self) -> Option<RecordedSave> {
        self.saves.lock().ok().and_then(|saves| saves.last().cloned())
    }
}

#[async_trait]
impl ContentBackend for MockBackend {
    async fn frontend_data(&self) -> Result<HomePageData, BackendError> {
        let data = self.frontend.clone().ok_or_else(unavailable)?;
        Ok(serde_json::from_value(data)?)
    }

    async fn fetch_section(
        &self,
        section: Section,
        token: &str,
    ) -> Result<Option<Value>, BackendError> {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push((section, token.to_string()));
        }
        if self.fail_fetches {
            return Err(unavailable());
        }
        Ok(self.sections.get(&section).cloned())
    }

    async fn save_section(
        &self,
        section: Section,
        target: SaveTarget,
        token: &str,
        payload: SectionPayload,
    ) -> Result<SaveReceipt, BackendError> {
        if let Ok(mut saves) = self.saves.lock() {
            saves.push(RecordedSave {
                section,
                target,
                token: token.to_string(),
                payload,
            });
        }
        if self.fail_saves {
            return Err(unavailable());
        }
        Ok(SaveReceipt {
            id: Some(1),
            message: Some("Saved".to_string()),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        if credentials.email == OPERATOR_EMAIL && credentials.password == OPERATOR_PASSWORD {
            Ok(LoginResponse {
                id: Some(1),
                name: "Operator".to_string(),
                email: OPERATOR_EMAIL.to_string(),
                token: OPERATOR_TOKEN.to_string(),
                message: String::new(),
            })
        } else {
            Err(BackendError::Rejected("Invalid email or password".to_string()))
        }
    }

    async fn account_email(&self, _token: &str) -> Result<Option<String>, BackendError> {
        Ok(Some(OPERATOR_EMAIL.to_string()))
    }

    async fn update_account(
        &self,
        _token: &str,
        update: &AccountUpdate,
    ) -> Result<Option<String>, BackendError> {
        if let Ok(mut updates) = self.account_updates.lock() {
            updates.push(update.clone());
        }
        Ok(None)
    }

    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), BackendError> {
        if self.fail_contact {
            return Err(unavailable());
        }
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.clone());
        }
        Ok(())
    }
}
