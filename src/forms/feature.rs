// src/forms/feature.rs
use super::{FieldErrors, FormView, ImageSlot, SectionForm, Submission};
use crate::models::{FeatureData, Section};
use crate::services::backend::SectionPayload;
use crate::templates::dashboard::{color_field, image_field, text_field};
use crate::utils::validation::is_hex_color;

pub(crate) const COLOR_MESSAGE: &str = "Color must be a hex value like #4BA135";

const MOBILE_FIELDS: [&str; 4] = ["mbl_img1", "mbl_img2", "mbl_img3", "mbl_img4"];
const MOBILE_MESSAGES: [&str; 4] = [
    "Mobile image 1 is required",
    "Mobile image 2 is required",
    "Mobile image 3 is required",
    "Mobile image 4 is required",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureForm {
    pub mobile: [ImageSlot; 4],
    pub all_mobile: ImageSlot,
    pub title1: String,
    pub title2: String,
    pub color: String,
}

impl SectionForm for FeatureForm {
    type Record = FeatureData;

    const SECTION: Section = Section::Feature;

    fn from_record(record: &FeatureData) -> Self {
        Self {
            mobile: [
                ImageSlot::from_stored(&record.mbl_img1),
                ImageSlot::from_stored(&record.mbl_img2),
                ImageSlot::from_stored(&record.mbl_img3),
                ImageSlot::from_stored(&record.mbl_img4),
            ],
            all_mobile: ImageSlot::from_stored(&record.all_mbl_img),
            title1: record.title1.clone(),
            title2: record.title2.clone(),
            color: record.color.clone(),
        }
    }

    fn from_submission(submission: &mut Submission) -> Self {
        Self {
            mobile: MOBILE_FIELDS.map(|field| submission.image(field)),
            all_mobile: submission.image("all_mbl_img"),
            title1: submission.text("title1"),
            title2: submission.text("title2"),
            color: submission.text("color").trim().to_string(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for ((field, message), slot) in MOBILE_FIELDS.iter().zip(MOBILE_MESSAGES).zip(&self.mobile) {
            errors.check_image(*field, slot, Some(message));
        }
        errors.check_image("all_mbl_img", &self.all_mobile, Some("All mobile image is required"));
        errors.require("title1", &self.title1, "Title 1 is required");
        errors.check_optional("color", &self.color, is_hex_color, COLOR_MESSAGE);
        errors
    }

    fn payload(&self) -> SectionPayload {
        let mut payload = SectionPayload::default();
        payload.text("title1", self.title1.trim());
        payload.text("title2", self.title2.trim());
        payload.text("color", self.color.trim());
        for (field, slot) in MOBILE_FIELDS.iter().zip(&self.mobile) {
            slot.append_to(*field, &mut payload);
        }
        self.all_mobile.append_to("all_mbl_img", &mut payload);
        payload
    }

    fn render_fields(&self, view: &FormView<'_>) -> String {
        let mut html = String::new();
        for (index, (field, slot)) in MOBILE_FIELDS.iter().zip(&self.mobile).enumerate() {
            html.push_str(&image_field(
                view,
                field,
                &format!("Mobile image {}", index + 1),
                slot,
            ));
        }
        html.push_str(&image_field(view, "all_mbl_img", "All mobile image", &self.all_mobile));
        html.push_str(&text_field(view, "title1", "Title 1", &self.title1));
        html.push_str(&text_field(view, "title2", "Title 2", &self.title2));
        html.push_str(&color_field(view, "color", "Color", &self.color));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{png, UploadedImage};

    fn loaded() -> FeatureForm {
        FeatureForm::from_record(&FeatureData {
            id: Some(2),
            mbl_img1: "m1.png".into(),
            mbl_img2: "m2.png".into(),
            mbl_img3: "m3.png".into(),
            mbl_img4: "m4.png".into(),
            all_mbl_img: "all.png".into(),
            title1: "Everything in one place".into(),
            title2: "Stay on track".into(),
            color: "#4BA135".into(),
        })
    }

    #[test]
    fn test_record_mapping() {
        let form = loaded();
        assert_eq!(form.mobile[2], ImageSlot::Stored("m3.png".into()));
        assert_eq!(form.all_mobile, ImageSlot::Stored("all.png".into()));
        assert_eq!(form.title2, "Stay on track");
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_required_images_and_title() {
        let mut form = loaded();
        form.mobile[3] = ImageSlot::Empty;
        form.all_mobile = ImageSlot::Empty;
        form.title1 = String::new();

        let errors = form.validate();
        assert_eq!(errors.get("mbl_img4"), Some("Mobile image 4 is required"));
        assert_eq!(errors.get("mbl_img1"), None);
        assert_eq!(errors.get("all_mbl_img"), Some("All mobile image is required"));
        assert_eq!(errors.get("title1"), Some("Title 1 is required"));
        assert_eq!(errors.get("title2"), None);
    }

    #[test]
    fn test_color_and_file_type() {
        let mut form = loaded();
        form.color = "green".into();
        form.mobile[0] = ImageSlot::Selected(UploadedImage::new("notes.txt", "text/plain", vec![1]));

        let errors = form.validate();
        assert_eq!(errors.get("color"), Some(COLOR_MESSAGE));
        assert_eq!(errors.get("mbl_img1"), Some("Please upload an image file"));
    }

    #[test]
    fn test_payload_only_new_images() {
        let mut form = loaded();
        form.mobile[1] = ImageSlot::Selected(png("m2-new.png"));

        let payload = form.payload();
        assert_eq!(payload.files.len(), 1);
        assert!(payload.has_file("mbl_img2"));
        assert_eq!(payload.field("color"), Some("#4BA135"));
    }
}
