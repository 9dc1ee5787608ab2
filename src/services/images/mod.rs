//! Image provider adapters.
//!
//! Every adapter implements [`ImageProvider`] and reports failures as a
//! [`ProviderError`], so the planner can apply one fallback policy to all
//! of them:
//! - [`StabilityClient`]: diffusion inpainting, generation and refinement
//! - [`RenderClient`]: URL prompt renderer with an SVG placeholder fallback
//! - [`StockPhotoProvider`]: curated stock photos

pub mod mask;
pub mod prompts;
pub mod render;
pub mod stability;
pub mod stock;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DrawingRect, GeneratedImage, ImageProviderId, ProjectSpec};

pub use render::RenderClient;
pub use stability::StabilityClient;
pub use stock::StockPhotoProvider;

/// Normalized provider failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured account has used up its prepaid quota.
    #[error("Image provider credits depleted")]
    CreditsDepleted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ProviderResult = Result<GeneratedImage, ProviderError>;

/// What kind of image the provider is asked for.
#[derive(Debug, Clone, Copy)]
pub enum RenderMode<'a> {
    /// Paint the project into `mask` of the yard photo `source_image`.
    Inpaint {
        source_image: &'a str,
        mask: DrawingRect,
    },
    /// Text-to-image from the project description alone.
    Generate,
    /// Produce a refined version of an image the user has annotated.
    Refine {
        edited_image: &'a str,
        annotations: &'a str,
    },
}

impl RenderMode<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inpaint { .. } => "inpaint",
            Self::Generate => "generate",
            Self::Refine { .. } => "refine",
        }
    }
}

/// One request to an image provider.
#[derive(Debug, Clone, Copy)]
pub struct RenderJob<'a> {
    pub spec: &'a ProjectSpec,
    pub mode: RenderMode<'a>,
}

impl<'a> RenderJob<'a> {
    pub fn new(spec: &'a ProjectSpec, mode: RenderMode<'a>) -> Self {
        Self { spec, mode }
    }
}

/// An external image-generation capability.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn id(&self) -> ImageProviderId;

    async fn render(&self, job: &RenderJob<'_>) -> ProviderResult;
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;

    /// Serves `router` on an ephemeral localhost port and returns its base URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}
