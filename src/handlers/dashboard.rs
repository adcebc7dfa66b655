// src/handlers/dashboard.rs
//! Section editors and operator settings. Every route here sits behind
//! `require_session`.
use axum::{
    extract::{Form, Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::auth::{OperatorSession, Session};
use crate::forms::{EditorEvent, EditorState, Notice, SectionForm, Submission};
use crate::models::AccountUpdate;
use crate::services::backend::{record_id, BackendError};
use crate::templates;
use crate::utils::validation::first_messages;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EditorQuery {
    /// Set by the redirect after a successful save.
    #[serde(default)]
    pub saved: Option<String>,
}

pub async fn edit_section<F: SectionForm>(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Query(query): Query<EditorQuery>,
) -> Html<String> {
    let mut editor = load_editor::<F>(&state, &session).await;
    if query.saved.is_some() && editor.notice.is_none() {
        let id = editor.editing_id;
        editor = editor.apply(EditorEvent::Saved { id });
    }
    Html(render::<F>(&state, &session, &editor))
}

pub async fn save_section<F: SectionForm>(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    multipart: Multipart,
) -> Response {
    let section = F::SECTION;

    let mut submission =
        match Submission::from_multipart(multipart, state.config.max_upload_bytes).await {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!("Unreadable {} submission: {}", section, e);
                let (status, event) = if e.is_too_large() {
                    (StatusCode::PAYLOAD_TOO_LARGE, EditorEvent::TooLarge)
                } else {
                    (StatusCode::BAD_REQUEST, EditorEvent::SaveFailed)
                };
                // Nothing of the submission is usable; fall back to the saved record.
                let editor = load_editor::<F>(&state, &session).await.apply(event);
                return (status, Html(render::<F>(&state, &session, &editor))).into_response();
            }
        };

    let id = submission.editing_id();
    let form = F::from_submission(&mut submission);
    let mut editor = EditorState::default().apply(EditorEvent::Submitted { form, id });

    let errors = editor.form.validate();
    if !errors.is_empty() {
        tracing::warn!("{} submission rejected: {} invalid fields", section, errors.len());
        editor = editor.apply(EditorEvent::Rejected(errors));
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render::<F>(&state, &session, &editor)),
        )
            .into_response();
    }

    let target = F::save_target(editor.editing_id);
    match state
        .backend
        .save_section(section, target, &session.token, editor.form.payload())
        .await
    {
        Ok(receipt) => {
            tracing::info!(
                "💾 {} saved by {} (record {:?}): {}",
                section,
                session.email,
                receipt.id.or(editor.editing_id),
                receipt.message.as_deref().unwrap_or("ok")
            );
            Redirect::to(&format!("{}?saved=1", section.dashboard_path())).into_response()
        }
        Err(e) => {
            tracing::warn!("Saving {} failed: {}", section, e);
            editor = editor.apply(EditorEvent::SaveFailed);
            (StatusCode::BAD_GATEWAY, Html(render::<F>(&state, &session, &editor))).into_response()
        }
    }
}

async fn load_editor<F: SectionForm>(state: &AppState, session: &Session) -> EditorState<F> {
    let editor = EditorState::<F>::default();
    let section = F::SECTION;

    match state.backend.fetch_section(section, &session.token).await {
        Ok(Some(record)) => {
            let id = record_id(&record);
            match serde_json::from_value::<F::Record>(record) {
                Ok(record) => editor.apply(EditorEvent::Loaded {
                    form: F::from_record(&record),
                    id,
                }),
                Err(e) => {
                    tracing::warn!("Undecodable {} record: {}", section, e);
                    editor.apply(EditorEvent::LoadFailed)
                }
            }
        }
        Ok(None) => editor,
        Err(e) => {
            tracing::warn!("Loading {} failed: {}", section, e);
            editor.apply(EditorEvent::LoadFailed)
        }
    }
}

fn render<F: SectionForm>(state: &AppState, session: &Session, editor: &EditorState<F>) -> String {
    templates::dashboard::render_editor(
        editor,
        &state.config.public_backend_url,
        session.display_name(),
    )
}

pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
) -> Html<String> {
    let email = match state.backend.account_email(&session.token).await {
        Ok(Some(email)) => email,
        Ok(None) => session.email.clone(),
        Err(e) => {
            tracing::warn!("Loading account failed: {}", e);
            session.email.clone()
        }
    };

    Html(templates::settings::render(&email, None, &[], session.display_name()))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Form(update): Form<AccountUpdate>,
) -> (StatusCode, Html<String>) {
    let update = AccountUpdate {
        email: update.email.trim().to_string(),
        password: update.password,
    };

    if let Err(errors) = update.validate() {
        let messages = first_messages(&errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::settings::render(
                &update.email,
                None,
                &messages,
                session.display_name(),
            )),
        );
    }

    let (status, notice) = match state.backend.update_account(&session.token, &update).await {
        Ok(message) => {
            tracing::info!("🔑 Account settings updated for {}", update.email);
            (
                StatusCode::OK,
                Notice::success(message.unwrap_or_else(|| "Update successful!".to_string())),
            )
        }
        Err(BackendError::Rejected(message)) => (StatusCode::BAD_REQUEST, Notice::error(message)),
        Err(e) => {
            tracing::warn!("Account update failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Notice::error("Failed to update. Please try again."),
            )
        }
    };

    (
        status,
        Html(templates::settings::render(
            &update.email,
            Some(&notice),
            &[],
            session.display_name(),
        )),
    )
}
