use axum::Json;
use serde::Serialize;

use crate::domain::{BuildStep, ProjectType};
use crate::services::build_steps;

/// One entry of the project picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeInfo {
    pub value: String,
    pub label: &'static str,
    pub build_steps: &'static [BuildStep],
}

/// GET /api/project-types
pub async fn list_project_types() -> Json<Vec<ProjectTypeInfo>> {
    let catalog = ProjectType::KNOWN
        .iter()
        .map(|pt| ProjectTypeInfo {
            value: pt.key().to_string(),
            label: pt.label(),
            build_steps: build_steps::steps_for(pt),
        })
        .collect();
    Json(catalog)
}
