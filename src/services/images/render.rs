//! Pollinations prompt renderer.
//!
//! The prompt travels in the URL path, so it is folded to plain ASCII
//! first. Failed fetches are retried a fixed number of times; when all
//! attempts fail a locally drawn SVG placeholder is returned instead, so
//! this provider always yields an image.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use backoff::backoff::Backoff;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::{prompts, ImageProvider, ProviderResult, RenderJob, RenderMode};
use crate::domain::{GeneratedImage, ImageProviderId, ProjectSpec};

const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 768;

/// Constant delay between attempts, giving up after `max_retries` retries.
#[derive(Debug, Clone)]
struct FixedRetries {
    delay: Duration,
    max_retries: u32,
    remaining: u32,
}

impl FixedRetries {
    fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            delay,
            max_retries,
            remaining: max_retries,
        }
    }
}

impl Backoff for FixedRetries {
    fn reset(&mut self) {
        self.remaining = self.max_retries;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.delay)
    }
}

/// Folds common diacritics to ASCII and drops everything except letters,
/// digits, whitespace, comma, period and hyphen.
pub fn sanitize_prompt(prompt: &str) -> String {
    prompt
        .chars()
        .map(|c| match c {
            'å' | 'ä' | 'à' | 'á' | 'â' | 'ã' => 'a',
            'Å' | 'Ä' | 'À' | 'Á' | 'Â' | 'Ã' => 'A',
            'ö' | 'ø' | 'ò' | 'ó' | 'ô' | 'õ' => 'o',
            'Ö' | 'Ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' => 'O',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'ü' | 'ú' | 'ù' | 'û' => 'u',
            'Ü' | 'Ú' | 'Ù' | 'Û' => 'U',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || matches!(c, ',' | '.' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Labelled SVG shown when no provider could draw the project.
pub fn placeholder_image(spec: &ProjectSpec) -> GeneratedImage {
    let label = spec.project_type.short_label();
    let dim = spec.dimensions.sanitized();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#1a5f2a;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#2d8a3e;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#bg)"/>
  <rect x="50" y="50" width="924" height="668" rx="20" fill="white" fill-opacity="0.1"/>
  <text x="512" y="300" font-family="Arial, sans-serif" font-size="72" font-weight="bold" fill="white" text-anchor="middle">{label}</text>
  <text x="512" y="380" font-family="Arial, sans-serif" font-size="32" fill="white" fill-opacity="0.9" text-anchor="middle">{width} × {depth} × {height} m</text>
  <text x="512" y="480" font-family="Arial, sans-serif" font-size="24" fill="white" fill-opacity="0.7" text-anchor="middle">AI-bildgenerering ej tillgänglig just nu</text>
  <text x="512" y="520" font-family="Arial, sans-serif" font-size="20" fill="white" fill-opacity="0.5" text-anchor="middle">Materiallista och byggbeskrivning visas nedan</text>
</svg>"##,
        w = IMAGE_WIDTH,
        h = IMAGE_HEIGHT,
        label = label,
        width = dim.width,
        depth = dim.depth,
        height = dim.height,
    );

    GeneratedImage::data_url("image/svg+xml", &STANDARD.encode(svg.as_bytes()))
}

/// Client for the Pollinations image endpoint.
#[derive(Clone)]
pub struct RenderClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    retry_delay: Duration,
}

impl RenderClient {
    pub fn new(
        base_url: &str,
        timeout_seconds: u64,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid render service URL")?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Render service URL cannot be a base: {}", base_url));
        }

        info!(base_url = %base_url, "Render client initialized");

        Ok(Self {
            client,
            base_url,
            max_retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }

    /// `{base}/prompt/{prompt}?width=1024&height=768&nologo=true`
    pub fn prompt_url(&self, prompt: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("prompt").push(prompt);
        }
        url.query_pairs_mut()
            .append_pair("width", &IMAGE_WIDTH.to_string())
            .append_pair("height", &IMAGE_HEIGHT.to_string())
            .append_pair("nologo", "true");
        url
    }

    async fn fetch_once(client: Client, url: Url) -> Result<GeneratedImage> {
        let response = client.get(url).send().await.context("Render request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Render service error: {}", status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .context("Failed to read render response")?;

        if bytes.is_empty() {
            return Err(anyhow!("Render service returned an empty body"));
        }

        Ok(GeneratedImage::data_url(&content_type, &STANDARD.encode(&bytes)))
    }

    /// Fetches the rendered image, retrying on any failure.
    pub async fn fetch(&self, prompt: &str) -> Result<GeneratedImage> {
        let url = self.prompt_url(prompt);
        debug!(url = %url, "Render request");

        let operation = || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                Self::fetch_once(client, url)
                    .await
                    .map_err(backoff::Error::transient)
            }
        };

        backoff::future::retry_notify(
            FixedRetries::new(self.max_retries, self.retry_delay),
            operation,
            |e: anyhow::Error, wait: Duration| {
                warn!(error = %e, retry_in_ms = wait.as_millis() as u64, "Render fetch failed, retrying");
            },
        )
        .await
    }

    #[instrument(skip(self, job), fields(project_type = %job.spec.project_type, mode = job.mode.name()))]
    async fn render_job(&self, job: &RenderJob<'_>) -> GeneratedImage {
        let raw_prompt = match job.mode {
            RenderMode::Refine { annotations, .. } => prompts::refine_prompt(job.spec, annotations),
            RenderMode::Inpaint { .. } | RenderMode::Generate => prompts::render_prompt(job.spec),
        };
        let prompt = sanitize_prompt(&raw_prompt);

        match self.fetch(&prompt).await {
            Ok(image) => {
                info!("Render service produced an image");
                image
            }
            Err(e) => {
                warn!(error = %e, "Render service exhausted retries, using placeholder");
                placeholder_image(job.spec)
            }
        }
    }
}

#[async_trait]
impl ImageProvider for RenderClient {
    fn id(&self) -> ImageProviderId {
        ImageProviderId::Puter
    }

    async fn render(&self, job: &RenderJob<'_>) -> ProviderResult {
        Ok(self.render_job(job).await)
    }
}
