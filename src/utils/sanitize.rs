// src/utils/sanitize.rs
// Allow-list sanitizer for operator-authored rich text. Only the formatting
// the dashboard editor can produce survives; every attribute except a safe
// `href` on links is dropped.
use regex::Regex;

use crate::templates::html_escape;

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "s", "strike", "ol", "ul", "li", "h1", "h2",
    "h3", "h4", "h5", "h6", "blockquote", "a",
];

/// Tags whose content is dropped together with the tag.
const STRIPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "textarea", "template", "svg",
    "math", "title", "select",
];

lazy_static::lazy_static! {
    static ref TAG_REGEX: Regex =
        Regex::new(r"(?s)<!--.*?-->|<(/?)([a-zA-Z][a-zA-Z0-9]*)((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*)>").unwrap();
    static ref HREF_REGEX: Regex =
        Regex::new(r#"(?i)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#).unwrap();
    static ref ENTITY_REGEX: Regex = Regex::new(r"^&(#[0-9]{1,7}|#x[0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap();
}

pub fn sanitize_rich_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    // Name of the tag whose content is being skipped, if any.
    let mut skipping: Option<String> = None;

    for caps in TAG_REGEX.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        if skipping.is_none() {
            push_text(&mut out, &input[cursor..whole.start()]);
        }
        cursor = whole.end();

        // Comment
        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).map_or(false, |m| !m.as_str().is_empty());
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        if let Some(skipped) = &skipping {
            if closing && *skipped == name {
                skipping = None;
            }
            continue;
        }

        if STRIPPED_WITH_CONTENT.contains(&name.as_str()) {
            let self_closing = attrs.trim_end().ends_with('/');
            if !closing && !self_closing {
                skipping = Some(name);
            }
            continue;
        }

        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }

        if closing {
            if name != "br" {
                out.push_str(&format!("</{}>", name));
            }
        } else if name == "a" {
            match safe_href(attrs) {
                Some(href) => out.push_str(&format!(
                    r#"<a href="{}" rel="noopener noreferrer" target="_blank">"#,
                    html_escape(&href)
                )),
                None => out.push_str("<a>"),
            }
        } else {
            out.push_str(&format!("<{}>", name));
        }
    }

    if skipping.is_none() {
        push_text(&mut out, &input[cursor..]);
    }
    out
}

/// Escapes text while keeping well-formed entities the editor already produced.
fn push_text(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(idx) = rest.find(|c| matches!(c, '&' | '<' | '>' | '"')) {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match tail.as_bytes()[0] {
            b'&' => match ENTITY_REGEX.find(tail) {
                Some(entity) => {
                    out.push_str(entity.as_str());
                    rest = &tail[entity.end()..];
                    continue;
                }
                None => out.push_str("&amp;"),
            },
            b'<' => out.push_str("&lt;"),
            b'>' => out.push_str("&gt;"),
            _ => out.push_str("&quot;"),
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
}

fn safe_href(attrs: &str) -> Option<String> {
    let caps = HREF_REGEX.captures(attrs)?;
    let raw = caps.get(1).or(caps.get(2)).or(caps.get(3))?.as_str();
    let href = raw.trim().replace("&amp;", "&");
    if href.chars().any(|c| c.is_control()) {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    let allowed = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with('#');
    allowed.then_some(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_editor_formatting() {
        let html = r#"<p class="ql-align-center"><strong>Goals</strong> &amp; <em>habits</em></p><ol><li>One</li></ol><p><br></p>"#;
        assert_eq!(
            sanitize_rich_text(html),
            "<p><strong>Goals</strong> &amp; <em>habits</em></p><ol><li>One</li></ol><p><br></p>"
        );
    }

    #[test]
    fn test_strips_scripts_and_handlers() {
        let html = r#"<p onclick="steal()">Hi<script>alert('x')</script></p><img src=x onerror=alert(1)>"#;
        assert_eq!(sanitize_rich_text(html), "<p>Hi</p>");
    }

    #[test]
    fn test_links_keep_only_safe_href() {
        assert_eq!(
            sanitize_rich_text(r#"<a href="https://goals.app/?a=1&amp;b=2" onmouseover="x()">go</a>"#),
            r#"<a href="https://goals.app/?a=1&amp;b=2" rel="noopener noreferrer" target="_blank">go</a>"#
        );
        assert_eq!(
            sanitize_rich_text(r#"<a href="javascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize_rich_text(r#"<a href="&#106;avascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
    }

    #[test]
    fn test_escapes_stray_markup() {
        assert_eq!(sanitize_rich_text("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
        assert_eq!(sanitize_rich_text("<!-- note -->text"), "text");
        assert_eq!(sanitize_rich_text("<style>p{}</style>ok"), "ok");
    }
}
