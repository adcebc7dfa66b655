// src/forms/banner.rs
use super::header::check_http_links;
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{BannerData, Section};
use crate::services::backend::SectionPayload;
use crate::templates::dashboard::{image_field, link_field, text_field, textarea_field};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerForm {
    pub background: ImageSlot,
    pub mobile: ImageSlot,
    pub title: String,
    pub subtitle: String,
    pub login_link: String,
    pub app_store_link: String,
    pub google_play_link: String,
}

impl SectionForm for BannerForm {
    type Record = BannerData;

    const SECTION: Section = Section::Banner;

    fn from_record(record: &BannerData) -> Self {
        Self {
            background: ImageSlot::from_stored(&record.img1),
            mobile: ImageSlot::from_stored(&record.img2),
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            login_link: record.login_link.clone(),
            app_store_link: record.app_store_link.clone(),
            google_play_link: record.google_play_link.clone(),
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            background: submission.image("img1"),
            mobile: submission.image("img2"),
            title: submission.text("title"),
            subtitle: submission.text("subtitle"),
            login_link: submission.text("login_link"),
            app_store_link: submission.text("app_store_link"),
            google_play_link: submission.text("google_play_link"),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check_image("img1", &self.background, Some("Background image is required"));
        errors.check_image("img2", &self.mobile, Some("Mobile image is required"));
        errors.require("title", &self.title, "Title is required");
        check_http_links(
            &mut errors,
            &self.login_link,
            &self.app_store_link,
            &self.google_play_link,
        );
        errors
    }

    fn payload(&self) -> SectionPayload {
        let mut payload = SectionPayload::default();
        payload.text("title", self.title.trim());
        payload.text("subtitle", self.subtitle.trim());
        payload.text("login_link", self.login_link.trim());
        payload.text("app_store_link", self.app_store_link.trim());
        payload.text("google_play_link", self.google_play_link.trim());
        self.background.append_to("img1", &mut payload);
        self.mobile.append_to("img2", &mut payload);
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        [
            image_field(view, "img1", "Background image", &self.background),
            image_field(view, "img2", "Mobile image", &self.mobile),
            text_field(view, "title", "Title", &self.title),
            textarea_field(view, "subtitle", "Subtitle", &self.subtitle),
            link_field(view, "login_link", "Login link", &self.login_link),
            link_field(view, "app_store_link", "App Store link", &self.app_store_link),
            link_field(view, "google_play_link", "Google Play link", &self.google_play_link),
        ]
        .concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::png;

    fn loaded() -> BannerForm {
        BannerForm::from_record(&BannerData {
            id: Some(1),
            img1: "bg.png".into(),
            img2: "mobile.png".into(),
            title: "Turn Goals into Done".into(),
            subtitle: "Plan, track and finish.".into(),
            login_link: "https://app.goals.app".into(),
            app_store_link: "https://apps.apple.com/app/goals".into(),
            google_play_link: String::new(),
        })
    }

    #[test]
    fn test_record_mapping() {
        let form = loaded();
        assert_eq!(form.background, ImageSlot::Stored("bg.png".into()));
        assert_eq!(form.mobile, ImageSlot::Stored("mobile.png".into()));
        assert_eq!(form.title, "Turn Goals into Done");
        assert_eq!(form.subtitle, "Plan, track and finish.");
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = BannerForm::default().validate();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("img1"), Some("Background image is required"));
        assert_eq!(errors.get("img2"), Some("Mobile image is required"));
    }

    #[test]
    fn test_links() {
        let form = BannerForm {
            google_play_link: "play.google.com".into(),
            ..loaded()
        };
        assert_eq!(
            form.validate().get("google_play_link"),
            Some("Google Play link must be a valid URL (start with http:// or https://)")
        );
    }

    #[test]
    fn test_payload_field_names() {
        let form = BannerForm {
            mobile: ImageSlot::Selected(png("phone.png")),
            ..loaded()
        };
        let payload = form.payload();

        assert_eq!(payload.field("title"), Some("Turn Goals into Done"));
        assert_eq!(payload.field("app_store_link"), Some("https://apps.apple.com/app/goals"));
        assert!(!payload.has_file("img1"));
        assert!(payload.has_file("img2"));
    }
}
