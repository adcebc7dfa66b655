// src/utils/validation.rs
use regex::Regex;
use validator::ValidationError;

use crate::models::EMPTY_EDITOR_MARKUP;

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

lazy_static::lazy_static! {
    /// Link fields of the header and banner only check the scheme.
    static ref HTTP_URL_REGEX: Regex = Regex::new(r"^(https?://)").unwrap();
    /// Footer links accept anything shaped like a web address, scheme optional.
    static ref WEB_ADDRESS_REGEX: Regex =
        Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").unwrap();
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap();
}

/// Value starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    HTTP_URL_REGEX.is_match(value)
}

/// Permissive web address: optional scheme, dotted host, optional path.
pub fn is_web_address(value: &str) -> bool {
    WEB_ADDRESS_REGEX.is_match(value)
}

/// In-page navigation links must point at an anchor.
pub fn is_anchor_link(value: &str) -> bool {
    value.contains('#')
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_REGEX.is_match(value)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A rich text block is empty when it has no text or is the editor's
/// empty-paragraph markup.
pub fn is_blank_rich_text(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == EMPTY_EDITOR_MARKUP
}

/// An empty password keeps the current one.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Ok(());
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("password_too_short");
        err.message = Some("Password must be at least 6 characters".into());
        return Err(err);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        let mut err = ValidationError::new("password_too_long");
        err.message = Some("Password too long (maximum 128 characters)".into());
        return Err(err);
    }

    Ok(())
}

/// Flattens `validator` errors into the first message of each field.
pub fn first_messages(errors: &validator::ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://apps.apple.com/app/goals"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("apps.apple.com/app/goals"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("javascript:alert(1)"));
    }

    #[test]
    fn test_web_address() {
        assert!(is_web_address("https://example.com/login"));
        assert!(is_web_address("example.com"));
        assert!(is_web_address("play.google.com/store/apps"));
        assert!(!is_web_address("not a url"));
        assert!(!is_web_address("https://"));
        assert!(!is_web_address("javascript:alert(1)"));
    }

    #[test]
    fn test_anchor_link() {
        assert!(is_anchor_link("#features"));
        assert!(is_anchor_link("/#contact"));
        assert!(!is_anchor_link("features"));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#4BA135"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#fff;background:url(x)"));
    }

    #[test]
    fn test_rich_text_blank() {
        assert!(is_blank_rich_text(""));
        assert!(is_blank_rich_text("  "));
        assert!(is_blank_rich_text("<p><br></p>"));
        assert!(!is_blank_rich_text("<p>We help you finish.</p>"));
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_new_password("").is_ok());
        assert!(validate_new_password("secret1").is_ok());
        assert!(validate_new_password("abc").is_err());
        assert!(validate_new_password(&"x".repeat(200)).is_err());
    }
}
