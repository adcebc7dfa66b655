// src/routes.rs
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::auth::{auth_session, middleware::require_session};
use crate::forms::{AchieveForm, BannerForm, FeatureForm, FooterForm, HeaderForm, MobileMockupForm};
use crate::handlers::{dashboard, web};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let dashboard_routes = Router::new()
        // Header editor doubles as the dashboard landing page
        .route(
            "/dashboard",
            get(dashboard::edit_section::<HeaderForm>).post(dashboard::save_section::<HeaderForm>),
        )
        .route(
            "/dashboard/banner",
            get(dashboard::edit_section::<BannerForm>).post(dashboard::save_section::<BannerForm>),
        )
        .route(
            "/dashboard/features",
            get(dashboard::edit_section::<FeatureForm>)
                .post(dashboard::save_section::<FeatureForm>),
        )
        .route(
            "/dashboard/mobile-mockup",
            get(dashboard::edit_section::<MobileMockupForm>)
                .post(dashboard::save_section::<MobileMockupForm>),
        )
        .route(
            "/dashboard/achieve-section",
            get(dashboard::edit_section::<AchieveForm>)
                .post(dashboard::save_section::<AchieveForm>),
        )
        .route(
            "/dashboard/footer",
            get(dashboard::edit_section::<FooterForm>).post(dashboard::save_section::<FooterForm>),
        )
        .route(
            "/dashboard/settings",
            get(dashboard::settings_page).post(dashboard::update_settings),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        // ==================
        // PUBLIC SITE
        // ==================
        .route("/", get(web::index))
        .route("/contact", post(web::contact))
        .route("/health", get(web::health_check))
        // Auth
        .route(
            "/login",
            get(auth_session::login_page).post(auth_session::login_form_handler),
        )
        .route("/logout", post(auth_session::logout_handler))
        // ==================
        // DASHBOARD
        // ==================
        .merge(dashboard_routes)
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(state.config.request_body_limit()))
        .layer(from_fn_with_state(
            state.clone(),
            crate::middleware::security::security_headers,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub mod test_support {
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::auth::SESSION_COOKIE;
    use crate::config::Config;
    use crate::services::mock::{MockBackend, OPERATOR_EMAIL, OPERATOR_TOKEN};
    use crate::AppState;

    const BOUNDARY: &str = "goals-test-boundary";

    /// Router over a [`MockBackend`] with a logged-in operator.
    pub struct TestApp {
        pub state: Arc<AppState>,
        pub backend: Arc<MockBackend>,
        cookie: String,
    }

    impl TestApp {
        pub async fn new(backend: MockBackend) -> Self {
            Self::with_config(backend, crate::config::test_config()).await
        }

        pub async fn with_config(backend: MockBackend, config: Config) -> Self {
            let backend = Arc::new(backend);
            let state = Arc::new(AppState::new(config, backend.clone()));
            let session_id = state
                .session_store
                .create_session(
                    OPERATOR_TOKEN.to_string(),
                    "Operator".to_string(),
                    OPERATOR_EMAIL.to_string(),
                )
                .await;

            Self {
                state,
                backend,
                cookie: format!("{}={}", SESSION_COOKIE, session_id),
            }
        }

        pub fn router(&self) -> Router {
            super::create_router(self.state.clone())
        }

        /// Sends a request carrying the operator's session cookie.
        pub async fn send(&self, mut request: Request<Body>) -> Response<Body> {
            if let Ok(cookie) = self.cookie.parse() {
                request.headers_mut().insert(header::COOKIE, cookie);
            }
            self.router().oneshot(request).await.unwrap()
        }

        pub async fn get(&self, path: &str) -> Response<Body> {
            self.send(Request::get(path).body(Body::empty()).unwrap()).await
        }

        pub async fn post(&self, path: &str, content_type: &str, body: Vec<u8>) -> Response<Body> {
            self.send(
                Request::post(path)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
        }
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Encodes text fields and (field, file name, content type, bytes) files.
    pub fn multipart(
        fields: &[(&str, &str)],
        files: &[(&str, &str, &str, &[u8])],
    ) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        for (name, file_name, content_type, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    BOUNDARY, name, file_name, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        (format!("multipart/form-data; boundary={}", BOUNDARY), body)
    }
}
