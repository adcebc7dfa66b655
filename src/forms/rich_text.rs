// src/forms/rich_text.rs
use crate::utils::sanitize::sanitize_rich_text;
use crate::utils::validation::is_blank_rich_text;

/// HTML authored in the dashboard's rich text editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText(String);

impl RichText {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// True for nothing, whitespace, or the editor's empty paragraph.
    pub fn is_blank(&self) -> bool {
        is_blank_rich_text(&self.0)
    }

    /// Raw markup as the operator wrote it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Markup safe to insert into a page.
    pub fn sanitized(&self) -> String {
        sanitize_rich_text(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(RichText::default().is_blank());
        assert!(RichText::new("  \n").is_blank());
        assert!(RichText::new("<p><br></p>").is_blank());
        assert!(!RichText::new("<p>We help you finish.</p>").is_blank());
    }

    #[test]
    fn test_sanitized_keeps_formatting() {
        let text = RichText::new("<p><strong>Goals</strong><script>x()</script></p>");
        assert_eq!(text.sanitized(), "<p><strong>Goals</strong></p>");
        assert_eq!(text.as_str(), "<p><strong>Goals</strong><script>x()</script></p>");
    }
}
