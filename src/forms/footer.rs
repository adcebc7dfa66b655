// src/forms/footer.rs
use super::feature::COLOR_MESSAGE;
use super::rich_text::RichText;
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{FooterData, Section};
use crate::services::backend::SectionPayload;
use crate::templates::dashboard::{color_field, image_field, link_field, rich_text_field};
use crate::utils::validation::{is_hex_color, is_web_address};

/// The three text blocks, as (field, color field, label).
pub const BLOCKS: [(&str, &str, &str); 3] = [
    ("first_text", "first_text_color", "What We Do"),
    ("second_text", "second_text_color", "Who We Are"),
    ("third_text", "third_text_color", "Why Use Goals"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterForm {
    pub logo: ImageSlot,
    pub color: String,
    pub login_link: String,
    pub app_store_link: String,
    pub google_play_link: String,
    pub texts: [RichText; 3],
    pub text_colors: [String; 3],
}

impl SectionForm for FooterForm {
    type Record = FooterData;

    const SECTION: Section = Section::Footer;

    fn from_record(record: &FooterData) -> Self {
        Self {
            logo: ImageSlot::from_stored(&record.logo),
            color: record.color.clone(),
            login_link: record.login_link.clone(),
            app_store_link: record.app_store_link.clone(),
            google_play_link: record.google_play_link.clone(),
            texts: [
                RichText::new(record.first_text.clone()),
                RichText::new(record.second_text.clone()),
                RichText::new(record.third_text.clone()),
            ],
            text_colors: [
                record.first_text_color.clone(),
                record.second_text_color.clone(),
                record.third_text_color.clone(),
            ],
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            logo: submission.image("logo"),
            color: submission.text("color").trim().to_string(),
            login_link: submission.text("login_link"),
            app_store_link: submission.text("app_store_link"),
            google_play_link: submission.text("google_play_link"),
            texts: BLOCKS.map(|(field, _, _)| RichText::new(submission.text(field))),
            text_colors: BLOCKS.map(|(_, color, _)| submission.text(color).trim().to_string()),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.check_image("logo", &self.logo, Some("Please upload a logo image"));
        errors.check_optional("color", &self.color, is_hex_color, COLOR_MESSAGE);

        if self.login_link.trim().is_empty() {
            errors.add("login_link", "Login link is required");
        } else if !is_web_address(self.login_link.trim()) {
            errors.add("login_link", "Please enter a valid URL");
        }
        errors.check_optional(
            "app_store_link",
            self.app_store_link.trim(),
            is_web_address,
            "Please enter a valid App Store URL",
        );
        errors.check_optional(
            "google_play_link",
            self.google_play_link.trim(),
            is_web_address,
            "Please enter a valid Google Play URL",
        );

        for ((field, color_field, label), (text, color)) in
            BLOCKS.iter().zip(self.texts.iter().zip(&self.text_colors))
        {
            if text.is_blank() {
                errors.add(*field, format!("{} content is required", label));
            }
            errors.check_optional(*color_field, color, is_hex_color, COLOR_MESSAGE);
        }
        errors
    }

    fn payload(&self) -> SectionPayload {
        let mut payload = SectionPayload::default();
        payload.text("color", self.color.trim());
        payload.text("login_link", self.login_link.trim());
        payload.text("app_store_link", self.app_store_link.trim());
        payload.text("google_play_link", self.google_play_link.trim());
        for ((field, color_field, _), (text, color)) in
            BLOCKS.iter().zip(self.texts.iter().zip(&self.text_colors))
        {
            payload.text(*field, text.as_str());
            payload.text(*color_field, color.trim());
        }
        self.logo.append_to("logo", &mut payload);
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        let mut html = image_field(view, "logo", "Logo", &self.logo);
        html.push_str(&color_field(view, "color", "Background color", &self.color));
        html.push_str(&link_field(view, "login_link", "Login link", &self.login_link));
        html.push_str(&link_field(view, "app_store_link", "App Store link", &self.app_store_link));
        html.push_str(&link_field(
            view,
            "google_play_link",
            "Google Play link",
            &self.google_play_link,
        ));
        for ((field, color_name, label), (text, color)) in
            BLOCKS.iter().zip(self.texts.iter().zip(&self.text_colors))
        {
            html.push_str(&rich_text_field(view, field, label, text));
            html.push_str(&color_field(
                view,
                color_name,
                &format!("{} text color", label),
                color,
            ));
        }
        html
    }
}
