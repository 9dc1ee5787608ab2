//! Estimation plus image generation for one project.
//!
//! The planner is the error boundary of the image pipeline: provider
//! failures are logged and folded into the returned [`GenerationResult`],
//! never propagated to the caller.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::images::{ImageProvider, ProviderError, ProviderResult, RenderJob, RenderMode};
use super::{build_steps, materials, permits};
use crate::domain::{
    DrawingRect, EstimationResult, GeneratedImage, GenerationResult, ImageProviderId, ProjectSpec,
};

/// What the chain does after one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStep {
    /// An image was produced; stop here.
    Stop(GeneratedImage),
    /// Nothing usable; try the next attempt.
    Continue,
    /// Hand control to the client without trying anything else.
    Escalate,
}

/// Maps one provider outcome to the next chain step.
pub fn fallback_policy(outcome: ProviderResult) -> ChainStep {
    match outcome {
        Ok(image) => ChainStep::Stop(image),
        Err(ProviderError::CreditsDepleted) => ChainStep::Escalate,
        Err(ProviderError::Other(_)) => ChainStep::Continue,
    }
}

/// One provider call in the fallback chain.
struct Attempt<'a> {
    provider: &'a dyn ImageProvider,
    mode: RenderMode<'a>,
}

/// Combines the estimator with the configured image providers.
#[derive(Clone, Default)]
pub struct ProjectPlanner {
    diffusion: Option<Arc<dyn ImageProvider>>,
    fallbacks: Vec<Arc<dyn ImageProvider>>,
}

impl ProjectPlanner {
    /// `diffusion` is `None` when no credential is configured; the planner
    /// then never calls a provider and asks the client to fall back.
    pub fn new(
        diffusion: Option<Arc<dyn ImageProvider>>,
        fallbacks: Vec<Arc<dyn ImageProvider>>,
    ) -> Self {
        Self {
            diffusion,
            fallbacks,
        }
    }

    pub fn has_diffusion(&self) -> bool {
        self.diffusion.is_some()
    }

    /// Ids of the server-side fallback providers, in chain order.
    pub fn fallback_ids(&self) -> Vec<ImageProviderId> {
        self.fallbacks.iter().map(|p| p.id()).collect()
    }

    /// Materials, build steps, cost and permit tier. Never fails.
    pub fn estimate(&self, spec: &ProjectSpec) -> EstimationResult {
        let dimensions = spec.dimensions.sanitized();
        EstimationResult::new(
            materials::estimate(&spec.project_type, dimensions),
            build_steps::steps_for(&spec.project_type).to_vec(),
            permits::classify(dimensions.footprint()),
        )
    }

    /// Estimates the project and draws it, inpainting into the yard photo
    /// when both the photo and the marked area are supplied.
    #[instrument(skip(self, spec, source_image), fields(project_type = %spec.project_type))]
    pub async fn generate(
        &self,
        spec: &ProjectSpec,
        source_image: Option<&str>,
        drawing: Option<DrawingRect>,
    ) -> GenerationResult {
        let estimation = self.estimate(spec);

        let Some(diffusion) = self.diffusion.as_deref() else {
            info!("No diffusion credential configured, deferring image to client");
            return client_fallback(estimation);
        };

        let mut attempts = Vec::with_capacity(2 + self.fallbacks.len());
        if let (Some(source_image), Some(mask)) = (source_image, drawing) {
            attempts.push(Attempt {
                provider: diffusion,
                mode: RenderMode::Inpaint { source_image, mask },
            });
        }
        attempts.push(Attempt {
            provider: diffusion,
            mode: RenderMode::Generate,
        });
        attempts.extend(self.fallbacks.iter().map(|p| Attempt {
            provider: p.as_ref(),
            mode: RenderMode::Generate,
        }));

        self.run_chain(spec, estimation, attempts).await
    }

    /// Estimates the project again and refines the user's edited image.
    #[instrument(skip(self, spec, edited_image, annotations), fields(project_type = %spec.project_type))]
    pub async fn regenerate(
        &self,
        spec: &ProjectSpec,
        edited_image: Option<&str>,
        annotations: &str,
    ) -> GenerationResult {
        let estimation = self.estimate(spec);

        let Some(diffusion) = self.diffusion.as_deref() else {
            info!("No diffusion credential configured, deferring image to client");
            return client_fallback(estimation);
        };

        let Some(edited_image) = edited_image else {
            warn!("Regenerate called without an edited image");
            return finished(estimation, None);
        };

        let mode = RenderMode::Refine {
            edited_image,
            annotations,
        };
        let attempts = std::iter::once(diffusion)
            .chain(self.fallbacks.iter().map(|p| p.as_ref()))
            .map(|provider| Attempt { provider, mode })
            .collect();

        self.run_chain(spec, estimation, attempts).await
    }

    async fn run_chain(
        &self,
        spec: &ProjectSpec,
        estimation: EstimationResult,
        attempts: Vec<Attempt<'_>>,
    ) -> GenerationResult {
        for attempt in attempts {
            let provider = attempt.provider.id();
            let job = RenderJob::new(spec, attempt.mode);
            let outcome = attempt.provider.render(&job).await;

            if let Err(ProviderError::Other(e)) = &outcome {
                warn!(provider = %provider, mode = attempt.mode.name(), error = %e, "Image attempt failed");
            }

            match fallback_policy(outcome) {
                ChainStep::Stop(image) => {
                    info!(provider = %provider, mode = attempt.mode.name(), "Image generated");
                    return finished(estimation, Some((provider, image)));
                }
                ChainStep::Continue => continue,
                ChainStep::Escalate => {
                    warn!(provider = %provider, "Provider credits depleted, deferring image to client");
                    return client_fallback(estimation);
                }
            }
        }

        warn!("No provider produced an image");
        finished(estimation, None)
    }
}

fn client_fallback(estimation: EstimationResult) -> GenerationResult {
    GenerationResult {
        estimation,
        generated_image: None,
        image_provider: ImageProviderId::None,
        use_client_fallback: true,
    }
}

fn finished(
    estimation: EstimationResult,
    image: Option<(ImageProviderId, GeneratedImage)>,
) -> GenerationResult {
    let (image_provider, generated_image) = match image {
        Some((provider, image)) => (provider, Some(image)),
        None => (ImageProviderId::None, None),
    };
    GenerationResult {
        estimation,
        generated_image,
        image_provider,
        use_client_fallback: false,
    }
}
