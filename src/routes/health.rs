use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::ImageProviderId;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: ProviderHealth,
}

#[derive(Serialize)]
pub struct ProviderHealth {
    /// A diffusion credential is configured.
    pub stability: bool,
    pub fallbacks: Vec<ImageProviderId>,
}

/// Health check endpoint. Reports configuration only, no upstream calls.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: ProviderHealth {
            stability: state.planner.has_diffusion(),
            fallbacks: state.planner.fallback_ids(),
        },
    })
}
