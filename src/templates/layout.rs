// src/templates/layout.rs
use super::html_escape;
use crate::models::Section;

const QUILL_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/quill/1.3.7/quill.snow.min.css";
const QUILL_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/quill/1.3.7/quill.min.js";

/// Document shell of the public site. The page supplies its own header and
/// footer since both are editable content.
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <link rel="stylesheet" href="/static/css/site.css">
</head>
<body>
{}
</body>
</html>"#,
        html_escape(title),
        body
    )
}

/// Dashboard shell: sidebar navigation plus the active page.
pub fn render_dashboard_page(title: &str, content: &str, active_path: &str, operator: &str) -> String {
    let mut nav = String::new();
    for section in Section::ALL {
        nav.push_str(&nav_link(
            section.dashboard_path(),
            section.nav_label(),
            section.dashboard_path() == active_path,
        ));
    }
    nav.push_str(&nav_link(
        "/dashboard/settings",
        "Settings",
        active_path == "/dashboard/settings",
    ));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} - Goals Dashboard</title>
    <link rel="stylesheet" href="/static/css/dashboard.css">
    <link rel="stylesheet" href="{}">
</head>
<body class="dashboard">
    <aside class="sidebar">
        <div class="sidebar-brand"><a href="/">Goals</a></div>
        <nav class="sidebar-nav">
            {}
        </nav>
        <div class="sidebar-footer">
            <span class="operator">{}</span>
            <form method="POST" action="/logout">
                <button type="submit" class="btn-link">Logout</button>
            </form>
        </div>
    </aside>

    <main class="dashboard-main">
        {}
    </main>

    <script src="{}"></script>
    <script src="/static/js/dashboard.js"></script>
</body>
</html>"#,
        html_escape(title),
        QUILL_CSS,
        nav,
        html_escape(operator),
        content,
        QUILL_JS
    )
}

pub fn nav_link(href: &str, text: &str, active: bool) -> String {
    let class = if active { "nav-link active" } else { "nav-link" };
    format!(r#"<a href="{}" class="{}">{}</a>"#, href, class, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_order_and_active_link() {
        let html = render_dashboard_page("Banner", "<p>x</p>", "/dashboard/banner", "ops@goals.app");

        let positions: Vec<usize> = [
            "Header",
            "Banner section",
            "Features",
            "MobileMockup",
            "Achieve-section",
            ">Footer<",
            "Settings",
        ]
        .iter()
        .map(|label| html.find(label).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        assert!(html.contains(r#"<a href="/dashboard/banner" class="nav-link active">Banner section</a>"#));
        assert!(html.contains(r#"<a href="/dashboard" class="nav-link">Header</a>"#));
        assert!(html.contains("ops@goals.app"));
    }
}
