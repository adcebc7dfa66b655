// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Empty-paragraph markup the rich text editor produces for a cleared block.
pub const EMPTY_EDITOR_MARKUP: &str = "<p><br></p>";

/// One editable content area of the site, backed by one backend record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Banner,
    Feature,
    MobileMockup,
    Achieve,
    Footer,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Header,
        Section::Banner,
        Section::Feature,
        Section::MobileMockup,
        Section::Achieve,
        Section::Footer,
    ];

    /// Path segment under `/api/`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Banner => "banner",
            Section::Feature => "feature",
            Section::MobileMockup => "mobilemockup",
            Section::Achieve => "achieve",
            Section::Footer => "footer",
        }
    }

    /// Directory under `/uploads/` the backend stores this section's images in.
    pub fn upload_dir(&self) -> &'static str {
        match self {
            Section::Footer => "settings",
            other => other.endpoint(),
        }
    }

    /// Dashboard route of the section's editor.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Section::Header => "/dashboard",
            Section::Banner => "/dashboard/banner",
            Section::Feature => "/dashboard/features",
            Section::MobileMockup => "/dashboard/mobile-mockup",
            Section::Achieve => "/dashboard/achieve-section",
            Section::Footer => "/dashboard/footer",
        }
    }

    /// Sidebar label.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Header => "Header",
            Section::Banner => "Banner section",
            Section::Feature => "Features",
            Section::MobileMockup => "MobileMockup",
            Section::Achieve => "Achieve-section",
            Section::Footer => "Footer",
        }
    }

    /// Human name used in headings and notices.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Header => "Header",
            Section::Banner => "Banner",
            Section::Feature => "Features",
            Section::MobileMockup => "Mobile mockup",
            Section::Achieve => "Achieve section",
            Section::Footer => "Footer",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

// Backend records. Every field tolerates absence, null and numbers so a
// partially filled row still renders.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub img: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_name1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub itemlink1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_name2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub itemlink2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub login_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub app_store_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub google_play_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Background image.
    #[serde(default, deserialize_with = "lenient_string")]
    pub img1: String,
    /// Mobile screenshot shown next to the title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub img2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub app_store_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub google_play_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub login_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img3: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img4: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub all_mbl_img: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MobileMockupData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub back_img: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title3: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchieveData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub back_img: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub logo_img: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img2: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mbl_img3: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Background color of the whole footer.
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub logo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub login_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub app_store_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub google_play_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub second_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub third_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_text_color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub second_text_color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub third_text_color: String,
}

/// Aggregate payload of `/api/frontend-data`. Each list holds zero or one row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomePageData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub home: Vec<BannerData>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub feature: Vec<FeatureData>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub mobile_mockup: Vec<MobileMockupData>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub footer: Vec<FooterData>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub header: Vec<HeaderData>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub achive: Vec<AchieveData>,
}

impl HomePageData {
    pub fn header(&self) -> Option<&HeaderData> {
        self.header.first()
    }

    pub fn banner(&self) -> Option<&BannerData> {
        self.home.first()
    }

    pub fn feature(&self) -> Option<&FeatureData> {
        self.feature.first()
    }

    pub fn mobile_mockup(&self) -> Option<&MobileMockupData> {
        self.mobile_mockup.first()
    }

    pub fn achieve(&self) -> Option<&AchieveData> {
        self.achive.first()
    }

    pub fn footer(&self) -> Option<&FooterData> {
        self.footer.first()
    }
}

// Request/Response types

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Please enter email and password"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter email and password"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AccountUpdate {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_new_password")]
    pub password: String,
}

/// Body of `/api/updateEp` responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub data: Option<AccountEmail>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountEmail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ContactMessage {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub number: String,
    #[serde(default)]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a list, a single object, or null. Rows that do not decode are
/// skipped rather than failing the whole payload.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let rows = match value {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(_) => vec![value],
        _ => Vec::new(),
    };
    Ok(rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_tolerates_nulls_and_numbers() {
        let feature: FeatureData = serde_json::from_value(json!({
            "id": "7",
            "title1": null,
            "title2": 2024,
            "mbl_img1": "a.png"
        }))
        .unwrap();

        assert_eq!(feature.id, Some(7));
        assert_eq!(feature.title1, "");
        assert_eq!(feature.title2, "2024");
        assert_eq!(feature.mbl_img1, "a.png");
        assert_eq!(feature.color, "");
    }

    #[test]
    fn test_aggregate_picks_first_rows() {
        let data: HomePageData = serde_json::from_value(json!({
            "home": [{ "title": "Turn Goals into Done" }, { "title": "ignored" }],
            "header": null,
            "achive": { "title1": "Achieve more" },
            "footer": ["not an object"]
        }))
        .unwrap();

        assert_eq!(data.banner().unwrap().title, "Turn Goals into Done");
        assert!(data.header().is_none());
        assert_eq!(data.achieve().unwrap().title1, "Achieve more");
        assert!(data.footer().is_none());
        assert!(data.feature().is_none());
    }

    #[test]
    fn test_contact_message_validation() {
        let valid = ContactMessage {
            name: "Ada".to_string(),
            number: String::new(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ContactMessage {
            email: "not-an-email".to_string(),
            message: String::new(),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
    }
}
