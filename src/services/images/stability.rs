//! Stability AI client for inpainting, generation and refinement.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    multipart::{Form, Part},
    Client, StatusCode,
};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::{mask, prompts, ImageProvider, ProviderError, ProviderResult, RenderJob, RenderMode};
use crate::domain::{DrawingRect, GeneratedImage, ImageProviderId, ProjectSpec};

const INPAINT_PATH: &str = "/v2beta/stable-image/edit/inpaint";
const GENERATE_PATH: &str = "/v2beta/stable-image/generate/core";
const REFINE_PATH: &str = "/v2beta/stable-image/generate/sd3";

/// Client for the Stability AI REST API.
///
/// Only constructed when an API key is configured.
#[derive(Clone)]
pub struct StabilityClient {
    client: Client,
    base_url: String,
    api_key: String,
    refine_strength: f64,
}

impl StabilityClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_seconds: u64,
        refine_strength: f64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        info!(base_url = base_url, "Stability client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            refine_strength: refine_strength.clamp(0.0, 1.0),
        })
    }

    fn png_part(bytes: Vec<u8>, file_name: &'static str) -> Result<Part> {
        Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")
            .context("Invalid image part")
    }

    /// POST a multipart form and turn the image body into a data URL.
    async fn post_form(&self, path: &str, form: Form) -> ProviderResult {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Stability request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Stability request failed");
                anyhow!("Stability API unavailable: {}", e)
            })?;

        let status = response.status();

        if status == StatusCode::PAYMENT_REQUIRED {
            warn!("Stability credits depleted");
            return Err(ProviderError::CreditsDepleted);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Stability API error");
            return Err(anyhow!("Stability API error: {}", status).into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .context("Failed to read Stability response")?;

        if bytes.is_empty() {
            return Err(anyhow!("Stability returned an empty image").into());
        }

        Ok(GeneratedImage::data_url(&content_type, &STANDARD.encode(&bytes)))
    }

    /// Paint the project into the marked area of the yard photo.
    #[instrument(skip(self, spec, source_image), fields(project_type = %spec.project_type))]
    pub async fn inpaint(
        &self,
        spec: &ProjectSpec,
        source_image: &str,
        rect: DrawingRect,
    ) -> ProviderResult {
        let source = source_image.to_string();
        let images = tokio::task::spawn_blocking(move || mask::prepare_inpaint(&source, &rect))
            .await
            .context("Mask task panicked")??;

        let prompt = prompts::inpaint_prompt(spec);
        debug!(
            prompt = %prompt,
            width = images.width,
            height = images.height,
            "Calling Stability inpaint"
        );

        let form = Form::new()
            .part("image", Self::png_part(images.image_png, "image.png")?)
            .part("mask", Self::png_part(images.mask_png, "mask.png")?)
            .text("prompt", prompt)
            .text("output_format", "png");

        self.post_form(INPAINT_PATH, form).await
    }

    /// Text-to-image without a source photo.
    #[instrument(skip(self, spec), fields(project_type = %spec.project_type))]
    pub async fn generate(&self, spec: &ProjectSpec) -> ProviderResult {
        let prompt = prompts::generation_prompt(spec);
        debug!(prompt = %prompt, "Calling Stability generate");

        let form = Form::new()
            .text("prompt", prompt)
            .text("output_format", "png")
            .text("aspect_ratio", "16:9");

        self.post_form(GENERATE_PATH, form).await
    }

    /// Image-to-image pass over an image the user has annotated.
    #[instrument(skip(self, spec, edited_image, annotations), fields(project_type = %spec.project_type))]
    pub async fn refine(
        &self,
        spec: &ProjectSpec,
        edited_image: &str,
        annotations: &str,
    ) -> ProviderResult {
        let edited = edited_image.to_string();
        let (image_png, _, _) = tokio::task::spawn_blocking(move || {
            mask::decode_data_url(&edited).and_then(|bytes| mask::to_png(&bytes))
        })
        .await
        .context("Image task panicked")??;

        let prompt = prompts::refine_prompt(spec, annotations);
        debug!(prompt = %prompt, "Calling Stability refine");

        let form = Form::new()
            .part("image", Self::png_part(image_png, "image.png")?)
            .text("prompt", prompt)
            .text("mode", "image-to-image")
            .text("strength", self.refine_strength.to_string())
            .text("output_format", "png");

        self.post_form(REFINE_PATH, form).await
    }
}

#[async_trait]
impl ImageProvider for StabilityClient {
    fn id(&self) -> ImageProviderId {
        ImageProviderId::Stability
    }

    async fn render(&self, job: &RenderJob<'_>) -> ProviderResult {
        match job.mode {
            RenderMode::Inpaint { source_image, mask } => {
                self.inpaint(job.spec, source_image, mask).await
            }
            RenderMode::Generate => self.generate(job.spec).await,
            RenderMode::Refine {
                edited_image,
                annotations,
            } => self.refine(job.spec, edited_image, annotations).await,
        }
    }
}
