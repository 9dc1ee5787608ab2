//! Request and response types for the generate/regenerate endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::estimate::EstimationResult;
use super::project::{Dimensions, DrawingRect, ProjectType};

/// Which adapter produced the returned image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderId {
    None,
    /// Stability AI diffusion models (inpaint, generate, refine).
    Stability,
    /// Pollinations prompt renderer.
    Puter,
    /// Curated Unsplash stock photos.
    Unsplash,
}

impl ImageProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Stability => "stability",
            Self::Puter => "puter",
            Self::Unsplash => "unsplash",
        }
    }
}

impl fmt::Display for ImageProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image ready for the client: a `data:` URL or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedImage(pub String);

impl GeneratedImage {
    pub fn data_url(content_type: &str, base64_body: &str) -> Self {
        Self(format!("data:{};base64,{}", content_type, base64_body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub description: Option<String>,
    /// Yard photo as a base64 data URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub drawing: Option<DrawingRect>,
}

/// Body of `POST /api/regenerate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub edited_image: Option<String>,
    /// Human readable summary of what the user drew on the image.
    #[serde(default)]
    pub annotations: Option<String>,
}

/// Combined payload returned by both orchestrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(flatten)]
    pub estimation: EstimationResult,
    pub generated_image: Option<GeneratedImage>,
    pub image_provider: ImageProviderId,
    /// No server-side provider produced an image; the client should try
    /// its own fallback.
    pub use_client_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_accepts_client_payload() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{
                "projectType": "altan",
                "dimensions": {"width": 4, "depth": 3, "height": 1},
                "description": "med trappa",
                "image": "data:image/png;base64,AAAA",
                "drawing": {"x": 10, "y": 20, "width": 100, "height": 50}
            }"#,
        )
        .unwrap();

        assert_eq!(req.project_type, ProjectType::Deck);
        assert_eq!(req.dimensions, Some(Dimensions::new(4.0, 3.0, 1.0)));
        assert_eq!(req.drawing.unwrap().width, 100.0);
    }

    #[test]
    fn missing_fields_are_optional_at_parse_time() {
        let req: RegenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.project_type, ProjectType::default());
        assert!(req.dimensions.is_none());
        assert!(req.edited_image.is_none());
    }

    #[test]
    fn provider_ids_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(ImageProviderId::Stability).unwrap(),
            "stability"
        );
        assert_eq!(serde_json::to_value(ImageProviderId::None).unwrap(), "none");
    }
}
