mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;
use std::sync::Arc;

use config::Settings;
use domain::ImageProviderId;
use services::images::{ImageProvider, RenderClient, StabilityClient, StockPhotoProvider};
use services::{FeedbackStore, ProjectPlanner};

/// Wires the image providers from configuration. Without a Stability key
/// the planner runs with no diffusion provider at all.
fn build_planner(settings: &Settings) -> Result<ProjectPlanner> {
    let diffusion = match settings.stability_api_key.as_deref() {
        Some(key) => {
            let client = StabilityClient::new(
                &settings.stability_api_url,
                key,
                settings.stability_timeout_seconds,
                settings.stability_refine_strength,
            )?;
            Some(Arc::new(client) as Arc<dyn ImageProvider>)
        }
        None => {
            tracing::warn!("STABILITY_API_KEY not set, image generation is left to the client");
            None
        }
    };

    let mut fallbacks: Vec<Arc<dyn ImageProvider>> = Vec::new();
    for id in &settings.fallback_providers {
        match id {
            ImageProviderId::Puter => fallbacks.push(Arc::new(RenderClient::new(
                &settings.render_api_url,
                settings.render_timeout_seconds,
                settings.render_max_retries,
                settings.render_retry_delay_ms,
            )?)),
            ImageProviderId::Unsplash => {
                fallbacks.push(Arc::new(StockPhotoProvider::new(&settings.stock_photo_base_url)))
            }
            ImageProviderId::Stability | ImageProviderId::None => {}
        }
    }

    Ok(ProjectPlanner::new(diffusion, fallbacks))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting backyard builder"
    );

    let planner = build_planner(&settings)?;
    logging::log_image_providers(&planner);

    let feedback = FeedbackStore::new(settings.feedback_file.clone());
    tracing::info!(path = %feedback.path().display(), "Feedback store ready");

    // Create application state
    let state = app::AppState::new(settings.clone(), planner, feedback);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_follows_settings() {
        let bare = build_planner(&Settings::default()).unwrap();
        assert!(!bare.has_diffusion());
        assert!(bare.fallback_ids().is_empty());

        let settings = Settings {
            stability_api_key: Some("sk-test".to_string()),
            fallback_providers: vec![ImageProviderId::Unsplash, ImageProviderId::Puter],
            ..Settings::default()
        };
        let planner = build_planner(&settings).unwrap();
        assert!(planner.has_diffusion());
        assert_eq!(
            planner.fallback_ids(),
            vec![ImageProviderId::Unsplash, ImageProviderId::Puter]
        );
    }
}
