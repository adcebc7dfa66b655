// src/forms/mobile_mockup.rs
use super::feature::COLOR_MESSAGE;
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{MobileMockupData, Section};
use crate::services::backend::{SaveTarget, SectionPayload};
use crate::templates::dashboard::{color_field, image_field, text_field};
use crate::utils::validation::is_hex_color;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobileMockupForm {
    pub background: ImageSlot,
    pub mobile1: ImageSlot,
    pub mobile2: ImageSlot,
    pub title1: String,
    pub title2: String,
    pub title3: String,
    pub color: String,
}

impl SectionForm for MobileMockupForm {
    type Record = MobileMockupData;

    const SECTION: Section = Section::MobileMockup;

    fn from_record(record: &MobileMockupData) -> Self {
        Self {
            background: ImageSlot::from_stored(&record.back_img),
            mobile1: ImageSlot::from_stored(&record.mbl_img1),
            mobile2: ImageSlot::from_stored(&record.mbl_img2),
            title1: record.title1.clone(),
            title2: record.title2.clone(),
            title3: record.title3.clone(),
            color: record.color.clone(),
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            background: submission.image("back_img"),
            mobile1: submission.image("mbl_img1"),
            mobile2: submission.image("mbl_img2"),
            title1: submission.text("title1"),
            title2: submission.text("title2"),
            title3: submission.text("title3"),
            color: submission.text("color").trim().to_string(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check_image("back_img", &self.background, Some("Background image is required"));
        errors.check_image("mbl_img1", &self.mobile1, Some("Mobile image 1 is required"));
        errors.check_image("mbl_img2", &self.mobile2, Some("Mobile image 2 is required"));
        errors.require("title1", &self.title1, "Title 1 is required");
        errors.require("title2", &self.title2, "Title 2 is required");
        errors.require("title3", &self.title3, "Title 3 is required");
        errors.check_optional("color", &self.color, is_hex_color, COLOR_MESSAGE);
        errors
    }

    fn payload(&self) -> SectionPayload {
        let mut payload = SectionPayload::default();
        payload.text("title1", self.title1.trim());
        payload.text("title2", self.title2.trim());
        payload.text("title3", self.title3.trim());
        payload.text("color", self.color.trim());
        self.background.append_to("back_img", &mut payload);
        self.mobile1.append_to("mbl_img1", &mut payload);
        self.mobile2.append_to("mbl_img2", &mut payload);
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        [
            image_field(view, "back_img", "Background image", &self.background),
            image_field(view, "mbl_img1", "Mobile image 1", &self.mobile1),
            image_field(view, "mbl_img2", "Mobile image 2", &self.mobile2),
            text_field(view, "title1", "Title 1", &self.title1),
            text_field(view, "title2", "Title 2", &self.title2),
            text_field(view, "title3", "Title 3", &self.title3),
            color_field(view, "color", "Color", &self.color),
        ]
        .concat()
    }

    /// The only section with an update-by-id route.
    fn save_target(editing_id: Option<i64>) -> SaveTarget {
        match editing_id {
            Some(id) => SaveTarget::Update(id),
            None => SaveTarget::Upsert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::png;

    fn loaded() -> MobileMockupForm {
        MobileMockupForm::from_record(&MobileMockupData {
            id: Some(4),
            back_img: "back.png".into(),
            mbl_img1: "left.png".into(),
            mbl_img2: "right.png".into(),
            title1: "Plan".into(),
            title2: "Track".into(),
            title3: "Achieve".into(),
            color: "#123abc".into(),
        })
    }

    #[test]
    fn test_record_mapping() {
        let form = loaded();
        assert_eq!(form.background, ImageSlot::Stored("back.png".into()));
        assert_eq!(form.mobile2, ImageSlot::Stored("right.png".into()));
        assert_eq!(form.title3, "Achieve");
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_every_title_required() {
        let form = MobileMockupForm {
            title2: String::new(),
            title3: "  ".into(),
            mobile1: ImageSlot::Empty,
            ..loaded()
        };
        let errors = form.validate();
        assert_eq!(errors.get("title1"), None);
        assert_eq!(errors.get("title2"), Some("Title 2 is required"));
        assert_eq!(errors.get("title3"), Some("Title 3 is required"));
        assert_eq!(errors.get("mbl_img1"), Some("Mobile image 1 is required"));
    }

    #[test]
    fn test_save_target_uses_known_id() {
        assert_eq!(MobileMockupForm::save_target(Some(4)), SaveTarget::Update(4));
        assert_eq!(MobileMockupForm::save_target(None), SaveTarget::Upsert);
    }

    #[test]
    fn test_payload() {
        let form = MobileMockupForm {
            background: ImageSlot::Selected(png("new-back.png")),
            ..loaded()
        };
        let payload = form.payload();
        assert_eq!(payload.field("title1"), Some("Plan"));
        assert!(payload.has_file("back_img"));
        assert!(!payload.has_file("mbl_img1"));
    }
}
