// src/templates/mod.rs
pub mod dashboard;
pub mod home;
pub mod login;
pub mod settings;

mod layout;

pub use layout::{render_dashboard_page, render_page};

// Helper function for HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
