// src/templates/home.rs
use chrono::Datelike;
use url::Url;

use super::dashboard::alert;
use super::{html_escape, render_page};
use crate::forms::rich_text::RichText;
use crate::forms::NoticeKind;
use crate::models::{
    AchieveData, BannerData, FeatureData, FooterData, HeaderData, HomePageData, MobileMockupData,
    Section,
};
use crate::utils::image::image_url_or_placeholder;
use crate::utils::validation::{is_hex_color, is_http_url, is_web_address};

/// Everything the home page needs besides the backend content.
pub struct HomeView<'a> {
    pub image_base: &'a Url,
    pub contact_notice: Option<(NoticeKind, &'a str)>,
}

pub fn render(data: &HomePageData, view: &HomeView<'_>) -> String {
    let header = data.header();
    // The header's nav links point at the feature and footer wrappers.
    let feature_anchor = header.map(|h| anchor_id(&h.itemlink1)).unwrap_or_default();
    let footer_anchor = header.map(|h| anchor_id(&h.itemlink2)).unwrap_or_default();

    let mut body = String::new();
    if let Some(header) = header {
        body.push_str(&render_header(header, view));
    }
    if let Some(banner) = data.banner() {
        body.push_str(&render_banner(banner, view));
    }
    if let Some(feature) = data.feature() {
        body.push_str(&render_feature(feature, &feature_anchor, view));
    }
    if let Some(mockup) = data.mobile_mockup() {
        body.push_str(&render_mobile_mockup(mockup, view));
    }
    if let Some(achieve) = data.achieve() {
        body.push_str(&render_achieve(achieve, view));
    }
    body.push_str(&render_contact(view));
    if let Some(footer) = data.footer() {
        body.push_str(&render_footer(footer, &footer_anchor, view));
    }

    render_page("Goals", &body)
}

/// Shown instead of the page when the content could not be loaded.
pub fn render_error(message: &str) -> String {
    render_page(
        "Goals",
        &format!(
            r#"<div class="page-error"><p>{}</p><a href="/" class="btn">Retry</a></div>"#,
            html_escape(message)
        ),
    )
}

fn render_header(header: &HeaderData, view: &HomeView<'_>) -> String {
    let mut nav = String::new();
    for (name, link) in [
        (&header.item_name1, &header.itemlink1),
        (&header.item_name2, &header.itemlink2),
    ] {
        if !name.trim().is_empty() {
            nav.push_str(&link_tag(link, name, "nav-link"));
        }
    }

    format!(
        r#"
<header class="site-header">
    <a href="/" class="site-logo"><img src="{}" alt="Goals"></a>
    <nav class="site-nav">{}</nav>
    <div class="site-actions">{}{}</div>
</header>"#,
        image(view, Section::Header, &header.img),
        nav,
        link_tag(&header.login_link, "Login", "btn btn-outline"),
        store_buttons(&header.app_store_link, &header.google_play_link)
    )
}

fn render_banner(banner: &BannerData, view: &HomeView<'_>) -> String {
    format!(
        r#"
<section class="banner">
    <img class="banner-background" src="{}" alt="">
    <div class="banner-content">
        <div class="banner-text">
            <h1>{}</h1>
            <p>{}</p>
            <div class="banner-actions">{}{}</div>
        </div>
        <img class="banner-mobile" src="{}" alt="Goals app">
    </div>
</section>"#,
        image(view, Section::Banner, &banner.img1),
        html_escape(&banner.title),
        html_escape(&banner.subtitle),
        link_tag(&banner.login_link, "Get started", "btn btn-primary"),
        store_buttons(&banner.app_store_link, &banner.google_play_link),
        image(view, Section::Banner, &banner.img2)
    )
}

fn render_feature(feature: &FeatureData, anchor: &str, view: &HomeView<'_>) -> String {
    let phones: String = [
        &feature.mbl_img1,
        &feature.mbl_img2,
        &feature.mbl_img3,
        &feature.mbl_img4,
    ]
    .iter()
    .map(|img| {
        format!(
            r#"<img class="feature-phone" src="{}" alt="">"#,
            image(view, Section::Feature, img)
        )
    })
    .collect();

    format!(
        r#"
<section class="features"{}{}>
    <h2>{}</h2>
    <p class="section-subtitle">{}</p>
    <div class="feature-phones">{}</div>
    <img class="feature-overview" src="{}" alt="">
</section>"#,
        id_attr(anchor),
        background_style(&feature.color),
        html_escape(&feature.title1),
        html_escape(&feature.title2),
        phones,
        image(view, Section::Feature, &feature.all_mbl_img)
    )
}

fn render_mobile_mockup(mockup: &MobileMockupData, view: &HomeView<'_>) -> String {
    format!(
        r#"
<section class="mobile-mockup"{}>
    <img class="mockup-background" src="{}" alt="">
    <div class="mockup-content">
        <h2>{}</h2>
        <h3>{}</h3>
        <p>{}</p>
    </div>
    <div class="mockup-phones">
        <img src="{}" alt="">
        <img src="{}" alt="">
    </div>
</section>"#,
        background_style(&mockup.color),
        image(view, Section::MobileMockup, &mockup.back_img),
        html_escape(&mockup.title1),
        html_escape(&mockup.title2),
        html_escape(&mockup.title3),
        image(view, Section::MobileMockup, &mockup.mbl_img1),
        image(view, Section::MobileMockup, &mockup.mbl_img2)
    )
}

fn render_achieve(achieve: &AchieveData, view: &HomeView<'_>) -> String {
    format!(
        r#"
<section class="achieve">
    <img class="achieve-background" src="{}" alt="">
    <img class="achieve-logo" src="{}" alt="Goals">
    <h2>{}</h2>
    <p>{}</p>
    <div class="achieve-phones">
        <img src="{}" alt="">
        <img src="{}" alt="">
        <img src="{}" alt="">
    </div>
</section>"#,
        image(view, Section::Achieve, &achieve.back_img),
        image(view, Section::Achieve, &achieve.logo_img),
        html_escape(&achieve.title1),
        html_escape(&achieve.title2),
        image(view, Section::Achieve, &achieve.mbl_img1),
        image(view, Section::Achieve, &achieve.mbl_img2),
        image(view, Section::Achieve, &achieve.mbl_img3)
    )
}

fn render_contact(view: &HomeView<'_>) -> String {
    let notice = view
        .contact_notice
        .map(|(kind, message)| alert(kind, message))
        .unwrap_or_default();

    format!(
        r#"
<section class="contact" id="contact">
    <h2>Get in touch</h2>
    {}
    <form class="contact-form" method="POST" action="/contact">
        <input type="text" name="name" placeholder="Name" required maxlength="120">
        <input type="tel" name="number" placeholder="Phone number" maxlength="32">
        <input type="email" name="email" placeholder="Email" required>
        <textarea name="message" rows="4" placeholder="Message" required maxlength="5000"></textarea>
        <button type="submit" class="btn btn-primary">Send message</button>
    </form>
</section>"#,
        notice
    )
}

fn render_footer(footer: &FooterData, anchor: &str, view: &HomeView<'_>) -> String {
    let blocks: String = [
        ("What We Do", &footer.first_text, &footer.first_text_color),
        ("Who We Are", &footer.second_text, &footer.second_text_color),
        ("Why Use Goals", &footer.third_text, &footer.third_text_color),
    ]
    .iter()
    .map(|(heading, text, color)| {
        format!(
            r#"<div class="footer-block"{}><h4>{}</h4><div class="footer-text">{}</div></div>"#,
            text_color_style(color),
            heading,
            RichText::new(text.as_str()).sanitized()
        )
    })
    .collect();

    format!(
        r#"
<footer class="site-footer"{}{}>
    <div class="footer-top">
        <img class="footer-logo" src="{}" alt="Goals">
        <div class="footer-actions">{}{}</div>
    </div>
    <div class="footer-blocks">{}</div>
    <p class="copyright">&copy; {} Goals. All rights reserved.</p>
</footer>"#,
        id_attr(anchor),
        background_style(&footer.color),
        image(view, Section::Footer, &footer.logo),
        link_tag(&footer.login_link, "Login", "btn btn-outline"),
        store_buttons(&footer.app_store_link, &footer.google_play_link),
        blocks,
        chrono::Utc::now().year()
    )
}

fn image(view: &HomeView<'_>, section: Section, value: &str) -> String {
    html_escape(&image_url_or_placeholder(
        view.image_base,
        section.upload_dir(),
        value,
    ))
}

fn store_buttons(app_store: &str, google_play: &str) -> String {
    format!(
        "{}{}",
        link_tag(app_store, "App Store", "store-badge app-store"),
        link_tag(google_play, "Google Play", "store-badge google-play")
    )
}

/// Anchor with a vetted href; nothing when the link is unusable.
fn link_tag(link: &str, text: &str, class: &str) -> String {
    match safe_href(link) {
        Some(href) => format!(
            r#"<a href="{}" class="{}">{}</a>"#,
            html_escape(&href),
            class,
            html_escape(text)
        ),
        None => String::new(),
    }
}

/// In-page anchors and web links only. Scheme-less web addresses, which the
/// footer accepts, are treated as https.
fn safe_href(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    if link.starts_with('#') || is_http_url(link) {
        return Some(link.to_string());
    }
    if let Some(idx) = link.find('#') {
        return Some(link[idx..].to_string());
    }
    if is_web_address(link) {
        return Some(format!("https://{}", link));
    }
    None
}

/// `#features` -> `features`, restricted to characters valid in an id.
pub fn anchor_id(link: &str) -> String {
    link.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

fn id_attr(anchor: &str) -> String {
    if anchor.is_empty() {
        String::new()
    } else {
        format!(r#" id="{}""#, anchor)
    }
}

fn background_style(color: &str) -> String {
    if is_hex_color(color) {
        format!(r#" style="background-color: {}""#, color)
    } else {
        String::new()
    }
}

fn text_color_style(color: &str) -> String {
    if is_hex_color(color) {
        format!(r#" style="color: {}""#, color)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(base: &Url) -> HomeView<'_> {
        HomeView {
            image_base: base,
            contact_notice: None,
        }
    }

    fn data() -> HomePageData {
        HomePageData {
            header: vec![HeaderData {
                img: "logo.png".into(),
                item_name1: "Features".into(),
                itemlink1: "#features".into(),
                item_name2: "About".into(),
                itemlink2: "#about".into(),
                login_link: "javascript:alert(1)".into(),
                ..HeaderData::default()
            }],
            home: vec![BannerData {
                title: "Turn Goals into Done".into(),
                img1: "bg.png".into(),
                ..BannerData::default()
            }],
            feature: vec![FeatureData {
                title1: "Plan <better>".into(),
                color: "red;position:fixed".into(),
                ..FeatureData::default()
            }],
            footer: vec![FooterData {
                color: "#0B1F12".into(),
                first_text: "<p>Hi<script>alert(1)</script></p>".into(),
                ..FooterData::default()
            }],
            ..HomePageData::default()
        }
    }

    #[test]
    fn test_nav_links_become_anchors() {
        let base = Url::parse("https://api.goals.app/").unwrap();
        let html = render(&data(), &view(&base));

        assert!(html.contains(r#"<section class="features" id="features">"#));
        assert!(html.contains(r#"<footer class="site-footer" id="about" style="background-color: #0B1F12">"#));
        assert!(html.contains(r##"<a href="#features" class="nav-link">Features</a>"##));
    }

    #[test]
    fn test_content_is_escaped_and_sanitized() {
        let base = Url::parse("https://api.goals.app/").unwrap();
        let html = render(&data(), &view(&base));

        assert!(html.contains("Plan &lt;better&gt;"));
        assert!(html.contains("<p>Hi</p>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("position:fixed"));
        assert!(html.contains("https://api.goals.app/uploads/banner/bg.png"));
        assert!(html.contains("https://api.goals.app/uploads/header/logo.png"));
    }

    #[test]
    fn test_missing_sections_render_nothing() {
        let base = Url::parse("https://api.goals.app/").unwrap();
        let html = render(&HomePageData::default(), &view(&base));

        assert!(!html.contains("site-header"));
        assert!(!html.contains("class=\"banner\""));
        assert!(!html.contains("site-footer"));
        assert!(html.contains("contact-form"));
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href("#contact").as_deref(), Some("#contact"));
        assert_eq!(safe_href("https://goals.app").as_deref(), Some("https://goals.app"));
        assert_eq!(safe_href("goals.app/login").as_deref(), Some("https://goals.app/login"));
        assert_eq!(safe_href("javascript:alert(1)"), None);
        assert_eq!(safe_href(""), None);
        assert_eq!(anchor_id("#how-it-works"), "how-it-works");
    }
}
