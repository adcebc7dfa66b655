// src/templates/login.rs
use super::{html_escape, render_page};

pub fn render(error_msg: Option<&str>, email: &str) -> String {
    let error_html = if let Some(msg) = error_msg {
        format!(r#"<div class="alert alert-error">{}</div>"#, html_escape(msg))
    } else {
        String::new()
    };

    let content = format!(
        r#"
    <div class="auth-container">
        <h1>Login to Goals</h1>
        {}
        <form class="auth-form" method="POST" action="/login">
            <div class="form-group">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="{}" required autocomplete="username">
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required autocomplete="current-password">
            </div>
            <button type="submit" class="btn btn-primary btn-full">Login</button>
        </form>
        <p class="auth-footer"><a href="/">Back to site</a></p>
    </div>
    "#,
        error_html,
        html_escape(email)
    );

    render_page("Login - Goals", &content)
}
