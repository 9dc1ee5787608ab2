//! Planning endpoints.
//!
//! Both handlers validate the request, hand it to the planner and return
//! its result. Image provider failures never surface here; the planner
//! folds them into the response.

use axum::{extract::rejection::JsonRejection, extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{Dimensions, GenerateRequest, GenerationResult, ProjectSpec, RegenerateRequest};
use crate::error::{ApiError, ApiResult};
use crate::middleware::request_id;

fn require_dimensions(dimensions: Option<Dimensions>) -> ApiResult<Dimensions> {
    dimensions.ok_or_else(|| ApiError::BadRequest("Dimensions are required".to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/generate
pub async fn generate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    let Json(req) = payload?;
    let dimensions = require_dimensions(req.dimensions)?;
    let image = non_empty(req.image);
    let spec = ProjectSpec::new(req.project_type, dimensions, req.description);

    tracing::info!(
        request_id = request_id(&headers),
        project_type = %spec.project_type,
        width = dimensions.width,
        depth = dimensions.depth,
        height = dimensions.height,
        has_image = image.is_some(),
        has_drawing = req.drawing.is_some(),
        "Generating project"
    );

    let result = state
        .planner
        .generate(&spec, image.as_deref(), req.drawing)
        .await;

    Ok(Json(result))
}

/// POST /api/regenerate
pub async fn regenerate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<RegenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    let Json(req) = payload?;
    let dimensions = require_dimensions(req.dimensions)?;
    let edited_image = non_empty(req.edited_image);
    let annotations = req.annotations.unwrap_or_default();
    let spec = ProjectSpec::new(req.project_type, dimensions, req.description);

    tracing::info!(
        request_id = request_id(&headers),
        project_type = %spec.project_type,
        has_edited_image = edited_image.is_some(),
        annotations = %annotations,
        "Regenerating project"
    );

    let result = state
        .planner
        .regenerate(&spec, edited_image.as_deref(), &annotations)
        .await;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{body_json, post_json, test_app};
    use crate::services::planner::tests::{produced, shared, FakeProvider};
    use crate::services::ProjectPlanner;
    use crate::domain::ImageProviderId;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn shed_without_credential() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(
            app,
            "/api/generate",
            json!({
                "projectType": "förråd",
                "dimensions": {"width": 3, "depth": 2, "height": 2.4},
                "description": ""
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["buildingPermit"], "Inget bygglov krävs");
        assert_eq!(body["useClientFallback"], true);
        assert_eq!(body["generatedImage"], serde_json::Value::Null);
        assert_eq!(body["imageProvider"], "none");
        assert_eq!(body["buildSteps"].as_array().unwrap().len(), 8);

        let total: f64 = body["materials"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["price"].as_f64().unwrap())
            .sum();
        assert_eq!(body["estimatedCost"].as_f64().unwrap(), total);
    }

    #[tokio::test]
    async fn missing_dimensions_is_bad_request() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(app, "/api/generate", json!({"projectType": "altan"})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "Dimensions are required");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(app, "/api/generate", json!({"dimensions": "big"})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unknown_type_gets_generic_frame() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(
            app,
            "/api/generate",
            json!({
                "projectType": "bastu",
                "dimensions": {"width": 3, "depth": 3, "height": 1}
            }),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["materials"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn generated_image_and_provider_are_returned() {
        let diffusion = FakeProvider::new(ImageProviderId::Stability, vec![produced("yard")]);
        let (app, _dir) = test_app(ProjectPlanner::new(Some(shared(&diffusion)), vec![]));
        let response = post_json(
            app,
            "/api/generate",
            json!({
                "projectType": "altan",
                "dimensions": {"width": 4, "depth": 3, "height": 1},
                "image": "data:image/png;base64,AAAA",
                "drawing": {"x": 1, "y": 2, "width": 30, "height": 20}
            }),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["generatedImage"], "data:image/png;base64,yard");
        assert_eq!(body["imageProvider"], "stability");
        assert_eq!(body["useClientFallback"], false);
        assert_eq!(*diffusion.calls.lock().unwrap(), vec!["inpaint"]);
    }

    #[tokio::test]
    async fn regenerate_passes_annotations() {
        let diffusion = FakeProvider::new(ImageProviderId::Stability, vec![produced("refined")]);
        let (app, _dir) = test_app(ProjectPlanner::new(Some(shared(&diffusion)), vec![]));
        let response = post_json(
            app,
            "/api/regenerate",
            json!({
                "projectType": "pergola",
                "dimensions": {"width": 3, "depth": 3, "height": 2.5},
                "editedImage": "data:image/png;base64,BBBB",
                "annotations": "climbing roses on the posts"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["generatedImage"], "data:image/png;base64,refined");
        assert!(diffusion.prompts.lock().unwrap()[0]
            .contains("incorporating changes: climbing roses on the posts"));
    }

    #[tokio::test]
    async fn regenerate_requires_dimensions() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(app, "/api/regenerate", json!({"projectType": "pergola"})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
