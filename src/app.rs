use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{FeedbackStore, ProjectPlanner};

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    pub planner: ProjectPlanner,
    pub feedback: FeedbackStore,
}

impl AppState {
    pub fn new(settings: Settings, planner: ProjectPlanner, feedback: FeedbackStore) -> Arc<Self> {
        Arc::new(Self {
            settings,
            planner,
            feedback,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Spans at DEBUG to keep INFO quiet
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    // Uploaded photos arrive as base64 JSON, well above axum's 2 MB default
    let body_limit = state.settings.max_body_bytes;

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{post_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            max_body_bytes: 64,
            ..Settings::default()
        };
        let state = AppState::new(
            settings,
            ProjectPlanner::default(),
            FeedbackStore::new(dir.path().join("feedback.json")),
        );
        let app = create_app(state);

        let response = post_json(
            app,
            "/api/feedback",
            serde_json::json!({"type": "BUG", "title": "x".repeat(200)}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn large_photo_payload_fits_default_limit() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let image = format!("data:image/png;base64,{}", "A".repeat(3 * 1024 * 1024));
        let response = post_json(
            app,
            "/api/generate",
            serde_json::json!({
                "projectType": "altan",
                "dimensions": {"width": 4, "depth": 3, "height": 1},
                "image": image
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
