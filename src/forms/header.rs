// src/forms/header.rs
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{HeaderData, Section};
use crate::services::backend::SectionPayload;
use crate::templates::dashboard::{image_field, link_field, text_field};
use crate::utils::validation::{is_anchor_link, is_http_url};

const ANCHOR_MESSAGE: &str = "Item link must include a # character";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderForm {
    pub img: ImageSlot,
    pub item_name1: String,
    pub itemlink1: String,
    pub item_name2: String,
    pub itemlink2: String,
    pub login_link: String,
    pub app_store_link: String,
    pub google_play_link: String,
}

/// Login and store buttons shared by the header and the banner.
pub(crate) fn check_http_links(
    errors: &mut FieldErrors,
    login_link: &str,
    app_store_link: &str,
    google_play_link: &str,
) {
    errors.check_optional(
        "login_link",
        login_link,
        is_http_url,
        "Login link must be a valid URL (start with http:// or https://)",
    );
    errors.check_optional(
        "app_store_link",
        app_store_link,
        is_http_url,
        "App Store link must be a valid URL (start with http:// or https://)",
    );
    errors.check_optional(
        "google_play_link",
        google_play_link,
        is_http_url,
        "Google Play link must be a valid URL (start with http:// or https://)",
    );
}

impl SectionForm for HeaderForm {
    type Record = HeaderData;

    const SECTION: Section = Section::Header;

    fn from_record(record: &HeaderData) -> Self {
        Self {
            img: ImageSlot::from_stored(&record.img),
            item_name1: record.item_name1.clone(),
            itemlink1: record.itemlink1.clone(),
            item_name2: record.item_name2.clone(),
            itemlink2: record.itemlink2.clone(),
            login_link: record.login_link.clone(),
            app_store_link: record.app_store_link.clone(),
            google_play_link: record.google_play_link.clone(),
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            img: submission.image("img"),
            item_name1: submission.text("item_name1"),
            itemlink1: submission.text("itemlink1"),
            item_name2: submission.text("item_name2"),
            itemlink2: submission.text("itemlink2"),
            login_link: submission.text("login_link"),
            app_store_link: submission.text("app_store_link"),
            google_play_link: submission.text("google_play_link"),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.check_image("img", &self.img, None);
        errors.require("item_name1", &self.item_name1, "Item name is required");
        errors.check_optional("itemlink1", &self.itemlink1, is_anchor_link, ANCHOR_MESSAGE);

        if !self.item_name2.trim().is_empty() && self.itemlink2.trim().is_empty() {
            errors.add(
                "itemlink2",
                "Item link is required when item name is provided",
            );
        }
        errors.check_optional("itemlink2", &self.itemlink2, is_anchor_link, ANCHOR_MESSAGE);

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
        payload.text("item_name1", self.item_name1.trim());
        payload.text("itemlink1", self.itemlink1.trim());
        payload.text("item_name2", self.item_name2.trim());
        payload.text("itemlink2", self.itemlink2.trim());
        payload.text("login_link", self.login_link.trim());
        payload.text("app_store_link", self.app_store_link.trim());
        payload.text("google_play_link", self.google_play_link.trim());
        self.img.append_to("img", &mut payload);
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        [
            image_field(view, "img", "Logo", &self.img),
            text_field(view, "item_name1", "Item name 1", &self.item_name1),
            text_field(view, "itemlink1", "Item link 1", &self.itemlink1),
            text_field(view, "item_name2", "Item name 2", &self.item_name2),
            text_field(view, "itemlink2", "Item link 2", &self.itemlink2),
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

    fn valid() -> HeaderForm {
        HeaderForm {
            img: ImageSlot::from_stored("logo.png"),
            item_name1: "Features".into(),
            itemlink1: "#features".into(),
            item_name2: "Contact".into(),
            itemlink2: "#contact".into(),
            login_link: "https://app.goals.app/login".into(),
            app_store_link: String::new(),
            google_play_link: "http://play.google.com/store".into(),
        }
    }

    #[test]
    fn test_valid_header_passes() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn test_item_name_required() {
        let form = HeaderForm {
            item_name1: " ".into(),
            ..valid()
        };
        assert_eq!(form.validate().get("item_name1"), Some("Item name is required"));
    }

    #[test]
    fn test_nav_links_need_anchor() {
        let form = HeaderForm {
            itemlink1: "features".into(),
            itemlink2: String::new(),
            ..valid()
        };
        let errors = form.validate();
        assert_eq!(errors.get("itemlink1"), Some(ANCHOR_MESSAGE));
        assert_eq!(
            errors.get("itemlink2"),
            Some("Item link is required when item name is provided")
        );

        let form = HeaderForm {
            item_name2: String::new(),
            itemlink2: String::new(),
            ..valid()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_store_links_need_scheme() {
        let form = HeaderForm {
            login_link: "app.goals.app".into(),
            app_store_link: "ftp://apps.apple.com".into(),
            ..valid()
        };
        let errors = form.validate();
        assert_eq!(
            errors.get("login_link"),
            Some("Login link must be a valid URL (start with http:// or https://)")
        );
        assert_eq!(
            errors.get("app_store_link"),
            Some("App Store link must be a valid URL (start with http:// or https://)")
        );
        assert_eq!(errors.get("google_play_link"), None);
    }

    #[test]
    fn test_record_mapping() {
        let record = HeaderData {
            id: Some(1),
            img: "logo.png".into(),
            item_name1: "Features".into(),
            itemlink1: "#features".into(),
            login_link: "https://app.goals.app".into(),
            ..HeaderData::default()
        };
        let form = HeaderForm::from_record(&record);
        assert_eq!(form.img, ImageSlot::Stored("logo.png".into()));
        assert_eq!(form.item_name1, "Features");
        assert_eq!(form.itemlink1, "#features");
        assert_eq!(form.login_link, "https://app.goals.app");
        assert_eq!(form.item_name2, "");
    }

    #[test]
    fn test_payload_sends_new_logo_only() {
        let payload = valid().payload();
        assert_eq!(payload.field("item_name1"), Some("Features"));
        assert_eq!(payload.field("itemlink2"), Some("#contact"));
        assert!(!payload.has_file("img"));

        let form = HeaderForm {
            img: ImageSlot::Selected(png("new-logo.png")),
            ..valid()
        };
        assert!(form.payload().has_file("img"));
    }
}
