// src/forms/mod.rs
//! View-models of the dashboard editors.
//!
//! Every section editor follows the same cycle: load the record, map it onto
//! a form, accept a multipart submission, validate it, and turn it back into
//! a multipart payload for the backend. The per-section pieces live in the
//! submodules; the shared machinery is here.

pub mod achieve;
pub mod banner;
pub mod feature;
pub mod footer;
pub mod header;
pub mod mobile_mockup;
pub mod rich_text;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

use crate::models::Section;
use crate::services::backend::{FilePart, SaveTarget, SectionPayload};
use crate::utils::image::{decode_data_url, encode_data_url, resolve_image_url};

pub use achieve::AchieveForm;
pub use banner::BannerForm;
pub use feature::FeatureForm;
pub use footer::FooterForm;
pub use header::HeaderForm;
pub use mobile_mockup::MobileMockupForm;

/// Shown above the submit button whenever a submission was rejected.
pub const FIX_ERRORS_SUMMARY: &str = "Please fix the errors above before submitting the form.";

/// Hidden input carrying the id of the record being edited.
pub const EDITING_ID_FIELD: &str = "editing_id";

/// Validation failures keyed by backend field name, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure; the first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Adds `message` when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if crate::utils::validation::is_blank(value) {
            self.add(field, message);
        }
    }

    /// Adds `message` when a non-empty `value` fails `is_valid`.
    pub fn check_optional(
        &mut self,
        field: &'static str,
        value: &str,
        is_valid: fn(&str) -> bool,
        message: &str,
    ) {
        if !value.is_empty() && !is_valid(value) {
            self.add(field, message);
        }
    }

    /// Image slots must hold an image; `required` slots must hold something.
    pub fn check_image(&mut self, field: &'static str, slot: &ImageSlot, required: Option<&str>) {
        let wrong_type = match slot {
            ImageSlot::Selected(upload) => !upload.is_image(),
            ImageSlot::Rejected { .. } => true,
            _ => false,
        };
        if wrong_type {
            self.add(field, "Please upload an image file");
            return;
        }
        if let Some(message) = required {
            if !slot.is_present() {
                self.add(field, message);
            }
        }
    }
}

/// An image file the operator picked but that is not uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        // Browsers may send a full client path.
        let base_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name)
            .trim();
        Self {
            file_name: if base_name.is_empty() {
                "upload".to_string()
            } else {
                base_name.to_string()
            },
            content_type: content_type.trim().to_ascii_lowercase(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Inline preview, built without any network round trip.
    pub fn data_url(&self) -> String {
        encode_data_url(&self.content_type, &self.bytes)
    }

    fn to_part(&self, field: &'static str) -> FilePart {
        FilePart {
            field,
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Where an image field's value currently comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSlot {
    #[default]
    Empty,
    /// Filename (or full URL) persisted by the backend.
    Stored(String),
    /// Newly selected file, sent with the next save.
    Selected(UploadedImage),
    /// A picked file that is not an image. The earlier value stays in place
    /// and is carried into the re-rendered form.
    Rejected {
        upload: UploadedImage,
        previous: Box<ImageSlot>,
    },
}

impl ImageSlot {
    pub fn from_stored(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            ImageSlot::Empty
        } else {
            ImageSlot::Stored(value.to_string())
        }
    }

    pub fn is_present(&self) -> bool {
        match self {
            ImageSlot::Empty => false,
            ImageSlot::Rejected { previous, .. } => previous.is_present(),
            _ => true,
        }
    }

    /// URL to show in the editor: a data URL for fresh uploads, the backend
    /// location for stored files.
    pub fn preview_url(&self, image_base: &Url, upload_dir: &str) -> Option<String> {
        match self {
            ImageSlot::Empty => None,
            ImageSlot::Stored(name) => resolve_image_url(image_base, upload_dir, name),
            ImageSlot::Selected(upload) if upload.is_image() => Some(upload.data_url()),
            ImageSlot::Selected(_) => None,
            ImageSlot::Rejected { previous, .. } => previous.preview_url(image_base, upload_dir),
        }
    }

    /// Adds the slot to a payload. Only fresh uploads travel; the backend
    /// keeps the stored file otherwise.
    pub fn append_to(&self, field: &'static str, payload: &mut SectionPayload) {
        if let ImageSlot::Selected(upload) = self {
            payload.files.push(upload.to_part(field));
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("unreadable multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("images total {total} bytes, over the {limit} byte limit")]
    TooLarge { total: usize, limit: usize },
}

impl SubmissionError {
    pub fn is_too_large(&self) -> bool {
        match self {
            SubmissionError::TooLarge { .. } => true,
            SubmissionError::Multipart(e) => e.status() == StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// A parsed multipart submission from a dashboard form.
#[derive(Debug, Default)]
pub struct Submission {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedImage>,
}

impl Submission {
    /// Reads every part. New files plus carried-over uploads may not exceed
    /// `image_limit` bytes in total.
    pub async fn from_multipart(
        mut multipart: Multipart,
        image_limit: usize,
    ) -> Result<Self, SubmissionError> {
        let mut submission = Submission::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;
                    // An untouched file input still sends an empty part.
                    if bytes.is_empty() {
                        continue;
                    }
                    submission.files.insert(
                        name,
                        UploadedImage::new(&file_name, &content_type, bytes.to_vec()),
                    );
                }
                None => {
                    let value = field.text().await?;
                    submission.texts.insert(name, value);
                }
            }
        }

        let total = submission.image_bytes();
        if total > image_limit {
            return Err(SubmissionError::TooLarge {
                total,
                limit: image_limit,
            });
        }

        Ok(submission)
    }

    /// Size of the new files plus the decoded size of pending uploads.
    fn image_bytes(&self) -> usize {
        let selected: usize = self.files.values().map(|upload| upload.bytes.len()).sum();
        let pending: usize = self
            .texts
            .iter()
            .filter(|(name, _)| name.ends_with("__pending"))
            .filter_map(|(_, value)| value.split_once(','))
            .map(|(_, data)| data.len() / 4 * 3)
            .sum();
        selected + pending
    }

    /// Removes and returns a text field, empty when absent.
    pub fn text(&mut self, name: &str) -> String {
        self.texts.remove(name).unwrap_or_default()
    }

    /// Rebuilds an image slot from, in order of preference: a new file, a
    /// pending upload carried over from a rejected submission, or the stored
    /// filename. A new file that is not an image keeps the older value.
    pub fn image(&mut self, field: &str) -> ImageSlot {
        let pending = self.text(&pending_field(field));
        let pending_name = self.text(&pending_name_field(field));
        let stored = self.text(&stored_field(field));

        let previous = match decode_data_url(&pending) {
            Some((content_type, bytes)) => {
                let name = if pending_name.is_empty() {
                    field
                } else {
                    pending_name.as_str()
                };
                ImageSlot::Selected(UploadedImage::new(name, &content_type, bytes))
            }
            None => ImageSlot::from_stored(&stored),
        };

        match self.files.remove(field) {
            Some(upload) if upload.is_image() => ImageSlot::Selected(upload),
            Some(upload) => ImageSlot::Rejected {
                upload,
                previous: Box::new(previous),
            },
            None => previous,
        }
    }

    pub fn editing_id(&mut self) -> Option<i64> {
        self.text(EDITING_ID_FIELD).trim().parse().ok()
    }

    #[cfg(test)]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.texts.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, upload: UploadedImage) -> Self {
        self.files.insert(name.to_string(), upload);
        self
    }
}

pub fn pending_field(field: &str) -> String {
    format!("{}__pending", field)
}

pub fn pending_name_field(field: &str) -> String {
    format!("{}__pending_name", field)
}

pub fn stored_field(field: &str) -> String {
    format!("{}__stored", field)
}

/// Rendering context handed to a form's field markup.
pub struct FormView<'a> {
    pub errors: &'a FieldErrors,
    pub image_base: &'a Url,
    pub upload_dir: &'static str,
}

/// The contract every section editor implements.
pub trait SectionForm: Default + Clone + Send + Sync + 'static {
    type Record: DeserializeOwned + Default + Send;

    const SECTION: Section;

    /// Maps the server record onto the form.
    fn from_record(record: &Self::Record) -> Self;

    fn from_submission(submission: &mut Submission) -> Self;

    /// Every violation at once; empty means the form may be saved.
    fn validate(&self) -> FieldErrors;

    /// Text fields always, image parts only for new uploads.
    fn payload(&self) -> SectionPayload;

    /// Markup of the form's inputs.
    fn render_fields(&self, view: &FormView<'_>) -> String;

    fn save_target(_editing_id: Option<i64>) -> SaveTarget {
        SaveTarget::Upsert
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown at the top of an editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Editor page state, advanced by [`EditorEvent`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState<F> {
    pub form: F,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
    pub editing_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum EditorEvent<F> {
    /// The record arrived (or there is none yet).
    Loaded { form: F, id: Option<i64> },
    LoadFailed,
    /// The operator submitted the form.
    Submitted { form: F, id: Option<i64> },
    Rejected(FieldErrors),
    /// Backend accepted the save.
    Saved { id: Option<i64> },
    SaveFailed,
    /// The submission was over the upload limit and could not be read.
    TooLarge,
}

impl<F: SectionForm> Default for EditorState<F> {
    fn default() -> Self {
        Self {
            form: F::default(),
            errors: FieldErrors::new(),
            notice: None,
            editing_id: None,
        }
    }
}

impl<F: SectionForm> EditorState<F> {
    pub fn apply(mut self, event: EditorEvent<F>) -> Self {
        let title = F::SECTION.title();
        match event {
            EditorEvent::Loaded { form, id } => {
                self.form = form;
                self.editing_id = id;
                self.errors = FieldErrors::new();
            }
            EditorEvent::LoadFailed => {
                self.notice = Some(Notice::error(format!(
                    "Failed to load {}. Please try again.",
                    title.to_lowercase()
                )));
            }
            EditorEvent::Submitted { form, id } => {
                self.form = form;
                self.editing_id = id.or(self.editing_id);
                self.errors = FieldErrors::new();
                self.notice = None;
            }
            EditorEvent::Rejected(errors) => {
                self.errors = errors;
            }
            EditorEvent::Saved { id } => {
                self.editing_id = id.or(self.editing_id);
                self.errors = FieldErrors::new();
                self.notice = Some(Notice::success(format!("{} saved successfully!", title)));
            }
            EditorEvent::TooLarge => {
                self.notice = Some(Notice::error(
                    "The upload is too large. Please choose smaller images and try again.",
                ));
            }
            EditorEvent::SaveFailed => {
                self.notice = Some(Notice::error(format!(
                    "Failed to save {}. Please try again.",
                    title.to_lowercase()
                )));
            }
        }
        self
    }
}

#[cfg(test)]
pub fn png(name: &str) -> UploadedImage {
    UploadedImage::new(name, "image/png", b"\x89PNG\r\n".to_vec())
}
