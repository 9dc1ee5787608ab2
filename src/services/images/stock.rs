//! Curated stock photos per project type.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::{ImageProvider, ProviderResult, RenderJob};
use crate::domain::{GeneratedImage, ImageProviderId, ProjectType};

const KITCHEN: &[&str] = &[
    "photo-1600585154340-be6161a56a0c",
    "photo-1558618666-fcd25c85cd64",
    "photo-1523301343968-6a6ebf63c672",
];
const DECK: &[&str] = &[
    "photo-1591825729269-caeb344f6df2",
    "photo-1600566753190-17f0baa2a6c3",
    "photo-1600573472550-8090b5e0745e",
];
const SHED: &[&str] = &[
    "photo-1530836369250-ef72a3f5cda8",
    "photo-1558618666-fcd25c85cd64",
];
const PERGOLA: &[&str] = &[
    "photo-1600566752355-35792bedcfea",
    "photo-1600585154526-990dced4db0d",
];
const YARD: &[&str] = &["photo-1558618666-fcd25c85cd64"];

/// Photo id pool for a project type.
pub fn photo_pool(project_type: &ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Deck => DECK,
        ProjectType::Shed => SHED,
        ProjectType::Pergola => PERGOLA,
        ProjectType::Fence | ProjectType::Carport => YARD,
        _ => KITCHEN,
    }
}

/// Returns a remote photo URL instead of rendering anything.
#[derive(Debug, Clone)]
pub struct StockPhotoProvider {
    base_url: String,
}

impl StockPhotoProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn photo_url(&self, photo_id: &str) -> String {
        format!(
            "{}/{}?w=1280&h=720&fit=crop&auto=format",
            self.base_url, photo_id
        )
    }

    pub fn pick(&self, project_type: &ProjectType) -> GeneratedImage {
        let pool = photo_pool(project_type);
        let id = pool.choose(&mut rand::rng()).copied().unwrap_or(KITCHEN[0]);
        GeneratedImage(self.photo_url(id))
    }
}

#[async_trait]
impl ImageProvider for StockPhotoProvider {
    fn id(&self) -> ImageProviderId {
        ImageProviderId::Unsplash
    }

    async fn render(&self, job: &RenderJob<'_>) -> ProviderResult {
        let image = self.pick(&job.spec.project_type);
        debug!(project_type = %job.spec.project_type, url = image.as_str(), "Picked stock photo");
        Ok(image)
    }
}
