pub mod catalog;
pub mod feedback;
pub mod generate;
pub mod health;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Planner
        .route("/api/project-types", get(catalog::list_project_types))
        .route("/api/generate", post(generate::generate))
        .route("/api/regenerate", post(generate::regenerate))
        // Feedback
        .route(
            "/api/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route(
            "/api/feedback/:id",
            get(feedback::get_feedback)
                .patch(feedback::update_feedback)
                .delete(feedback::delete_feedback),
        )
}
