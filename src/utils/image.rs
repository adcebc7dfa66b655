// src/utils/image.rs
use base64::{engine::general_purpose, Engine as _};
use url::Url;

pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.svg";

/// Turns a stored image value into something an `<img src>` can load.
///
/// Full URLs are used as-is; bare filenames live under
/// `<base>/uploads/<dir>/<filename>`. Empty values yield `None`.
pub fn resolve_image_url(base: &Url, upload_dir: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(value.to_string());
    }

    // Only the last path component is trusted as a filename.
    let filename = value.rsplit(['/', '\\']).next().unwrap_or(value);
    if filename.is_empty() || filename == ".." || filename == "." {
        return None;
    }

    base.join(&format!(
        "uploads/{}/{}",
        upload_dir,
        urlencoding::encode(filename)
    ))
    .ok()
    .map(|url| url.to_string())
}

pub fn image_url_or_placeholder(base: &Url, upload_dir: &str, value: &str) -> String {
    resolve_image_url(base, upload_dir, value).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Splits a `data:<mime>;base64,<payload>` URL back into its parts.
pub fn decode_data_url(data_url: &str) -> Option<(String, Vec<u8>)> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let content_type = meta.strip_suffix(";base64")?;
    if content_type.is_empty() {
        return None;
    }
    let bytes = general_purpose::STANDARD.decode(payload.trim()).ok()?;
    Some((content_type.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.goals.app/").unwrap()
    }

    #[test]
    fn test_resolves_bare_filenames() {
        assert_eq!(
            resolve_image_url(&base(), "banner", "bg.png").as_deref(),
            Some("https://api.goals.app/uploads/banner/bg.png")
        );
        assert_eq!(
            resolve_image_url(&base(), "settings", "my logo.png").as_deref(),
            Some("https://api.goals.app/uploads/settings/my%20logo.png")
        );
    }

    #[test]
    fn test_full_urls_pass_through() {
        assert_eq!(
            resolve_image_url(&base(), "achieve", "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn test_empty_and_traversal_values() {
        assert_eq!(resolve_image_url(&base(), "banner", "  "), None);
        assert_eq!(
            resolve_image_url(&base(), "banner", "../../etc/passwd").as_deref(),
            Some("https://api.goals.app/uploads/banner/passwd")
        );
        assert_eq!(resolve_image_url(&base(), "banner", "a/.."), None);
        assert_eq!(
            image_url_or_placeholder(&base(), "banner", ""),
            PLACEHOLDER_IMAGE
        );
    }

    #[test]
    fn test_data_url() {
        let url = encode_data_url("image/png", b"\x89PNG");
        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert_eq!(
            decode_data_url(&url),
            Some(("image/png".to_string(), b"\x89PNG".to_vec()))
        );
        assert_eq!(decode_data_url("data:image/png,raw"), None);
        assert_eq!(decode_data_url("https://x/y.png"), None);
    }
}
