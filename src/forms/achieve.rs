// src/forms/achieve.rs
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{AchieveData, Section};
use crate::services::backend::SectionPayload;
use crate::templates::dashboard::{image_field, text_field};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchieveForm {
    pub background: ImageSlot,
    pub logo: ImageSlot,
    pub mobile: [ImageSlot; 3],
    pub title1: String,
    pub title2: String,
}

const MOBILE_FIELDS: [&str; 3] = ["mbl_img1", "mbl_img2", "mbl_img3"];

impl SectionForm for AchieveForm {
    type Record = AchieveData;

    const SECTION: Section = Section::Achieve;

    fn from_record(record: &AchieveData) -> Self {
        Self {
            background: ImageSlot::from_stored(&record.back_img),
            logo: ImageSlot::from_stored(&record.logo_img),
            mobile: [
                ImageSlot::from_stored(&record.mbl_img1),
                ImageSlot::from_stored(&record.mbl_img2),
                ImageSlot::from_stored(&record.mbl_img3),
            ],
            title1: record.title1.clone(),
            title2: record.title2.clone(),
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            background: submission.image("back_img"),
            logo: submission.image("logo_img"),
            mobile: MOBILE_FIELDS.map(|field| submission.image(field)),
            title1: submission.text("title1"),
            title2: submission.text("title2"),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check_image("back_img", &self.background, None);
        errors.check_image("logo_img", &self.logo, None);
        for (field, slot) in MOBILE_FIELDS.iter().zip(&self.mobile) {
            errors.check_image(*field, slot, None);
        }
        errors.require("title1", &self.title1, "Title 1 is required");
        errors
    }

    fn payload(&self) -> SectionPayload {
        let mut payload = SectionPayload::default();
        payload.text("title1", self.title1.trim());
        payload.text("title2", self.title2.trim());
        self.background.append_to("back_img", &mut payload);
        self.logo.append_to("logo_img", &mut payload);
        for (field, slot) in MOBILE_FIELDS.iter().zip(&self.mobile) {
            slot.append_to(*field, &mut payload);
        }
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        let mut html = image_field(view, "back_img", "Background image", &self.background);
        html.push_str(&image_field(view, "logo_img", "Logo image", &self.logo));
        for (index, (field, slot)) in MOBILE_FIELDS.iter().zip(&self.mobile).enumerate() {
            html.push_str(&image_field(
                view,
                field,
                &format!("Mobile image {}", index + 1),
                slot,
            ));
        }
        html.push_str(&text_field(view, "title1", "Title 1", &self.title1));
        html.push_str(&text_field(view, "title2", "Title 2", &self.title2));
        html
    }
}
