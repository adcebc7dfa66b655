// src/templates/settings.rs
use super::dashboard::alert;
use super::{html_escape, render_dashboard_page};
use crate::forms::Notice;

pub fn render(
    email: &str,
    notice: Option<&Notice>,
    errors: &[(String, String)],
    operator: &str,
) -> String {
    let notice_html = notice
        .map(|notice| alert(notice.kind, &notice.message))
        .unwrap_or_default();

    let error_for = |field: &str| {
        errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| format!(r#"<p class="field-error">{}</p>"#, html_escape(message)))
            .unwrap_or_default()
    };

    let content = format!(
        r#"
    <h1>Settings</h1>
    {}
    <form class="editor-form" method="POST" action="/dashboard/settings">
        <div class="form-group">
            <label for="email">Email</label>
            <input type="email" id="email" name="email" value="{}" required>
            {}
        </div>
        <div class="form-group">
            <label for="password">New password</label>
            <input type="password" id="password" name="password" autocomplete="new-password"
                   placeholder="Leave empty to keep the current password">
            {}
        </div>
        <button type="submit" class="btn btn-primary">Update</button>
    </form>
    "#,
        notice_html,
        html_escape(email),
        error_for("email"),
        error_for("password")
    );

    render_dashboard_page("Settings", &content, "/dashboard/settings", operator)
}
