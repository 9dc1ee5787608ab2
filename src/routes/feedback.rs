//! Feedback ticket CRUD.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::{Created, Success};
use crate::app::AppState;
use crate::domain::feedback::{
    CreateFeedbackRequest, CreateFeedbackResponse, FeedbackTicket, ListFeedbackQuery,
    UpdateFeedbackRequest,
};
use crate::error::{ApiError, ApiResult};

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Feedback {} not found", id))
}

/// GET /api/feedback?status=OPEN|IN_PROGRESS|RESOLVED|CLOSED|ALL
pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFeedbackQuery>,
) -> ApiResult<Json<Vec<FeedbackTicket>>> {
    let status = query.status_filter().map_err(ApiError::BadRequest)?;
    Ok(Json(state.feedback.list(status).await))
}

/// POST /api/feedback
pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> ApiResult<Created<CreateFeedbackResponse>> {
    let Json(req) = payload?;
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let ticket = state.feedback.create(req).await?;

    Ok(Created(CreateFeedbackResponse {
        id: ticket.id,
        case_number: ticket.case_number,
    }))
}

/// GET /api/feedback/:id
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<FeedbackTicket>> {
    state
        .feedback
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PATCH /api/feedback/:id
pub async fn update_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFeedbackRequest>, JsonRejection>,
) -> ApiResult<Json<FeedbackTicket>> {
    let Json(req) = payload?;
    state
        .feedback
        .update_status(&id, req.status)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/feedback/:id
pub async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Success> {
    if state.feedback.delete(&id).await? {
        Ok(Success::new())
    } else {
        Err(not_found(&id))
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{body_json, post_json, send, test_app};
    use crate::services::ProjectPlanner;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn feedback_lifecycle() {
        let (app, _dir) = test_app(ProjectPlanner::default());

        let created = post_json(
            app.clone(),
            "/api/feedback",
            json!({"type": "BUG", "title": "Bilden laddar inte", "priority": "HIGH"}),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["caseNumber"], "BUG-001");
        let id = created["id"].as_str().unwrap().to_string();

        let fetched = send(app.clone(), Method::GET, &format!("/api/feedback/{id}"), None).await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched = body_json(fetched).await;
        assert_eq!(fetched["status"], "OPEN");
        assert_eq!(fetched["priority"], "HIGH");
        assert_eq!(fetched["type"], "BUG");

        let patched = send(
            app.clone(),
            Method::PATCH,
            &format!("/api/feedback/{id}"),
            Some(json!({"status": "RESOLVED"})),
        )
        .await;
        assert_eq!(body_json(patched).await["status"], "RESOLVED");

        let open = send(app.clone(), Method::GET, "/api/feedback?status=OPEN", None).await;
        assert!(body_json(open).await.as_array().unwrap().is_empty());
        let all = send(app.clone(), Method::GET, "/api/feedback?status=ALL", None).await;
        assert_eq!(body_json(all).await.as_array().unwrap().len(), 1);

        let deleted = send(app.clone(), Method::DELETE, &format!("/api/feedback/{id}"), None).await;
        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(body_json(deleted).await, json!({"success": true}));

        let gone = send(app, Method::GET, &format!("/api/feedback/{id}"), None).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(gone).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn title_is_required() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = post_json(app, "/api/feedback", json!({"type": "FEATURE", "title": "  "})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected() {
        let (app, _dir) = test_app(ProjectPlanner::default());
        let response = send(app, Method::GET, "/api/feedback?status=DONE", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreadable_feedback_file_fails_create_with_500() {
        let (app, dir) = test_app(ProjectPlanner::default());
        let path = dir.path().join("feedback.json");
        std::fs::write(&path, "[{\"id\": \"1\"").unwrap();

        let response = post_json(app, "/api/feedback", json!({"type": "BUG", "title": "x"})).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["code"], "INTERNAL_ERROR");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"id\": \"1\"");
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (app, _dir) = test_app(ProjectPlanner::default());

        let patched = send(
            app.clone(),
            Method::PATCH,
            "/api/feedback/nope",
            Some(json!({"status": "CLOSED"})),
        )
        .await;
        assert_eq!(patched.status(), StatusCode::NOT_FOUND);

        let deleted = send(app, Method::DELETE, "/api/feedback/nope", None).await;
        assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
    }
}
