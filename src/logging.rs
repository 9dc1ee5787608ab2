//! Tracing setup and the startup summary of the image pipeline.

use crate::config::{Environment, Settings};
use crate::services::ProjectPlanner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Prompts and provider requests are
/// logged at debug level under `services::images`, so production keeps
/// that module at info.
pub fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "backyard_builder=debug,tower_http=debug,hyper=info,info",
        Environment::Staging => {
            "backyard_builder=debug,backyard_builder::services::images=info,tower_http=info,hyper=warn,info"
        }
        Environment::Prod => {
            "backyard_builder=info,tower_http=info,hyper=warn,reqwest=warn,warn"
        }
    }
}

pub fn init_logging(settings: &Settings) {
    let env = &settings.env;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(env).into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines in production, human readable elsewhere
    if matches!(env, Environment::Prod) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!(
        env = ?env,
        feedback_file = %settings.feedback_file.display(),
        "Logging initialized"
    );
}

/// Logs which image providers will run and flags fallbacks that can never
/// be reached.
pub fn log_image_providers(planner: &ProjectPlanner) {
    let fallbacks = planner.fallback_ids();
    tracing::info!(
        stability = planner.has_diffusion(),
        fallbacks = ?fallbacks,
        "Image providers configured"
    );

    if !planner.has_diffusion() && !fallbacks.is_empty() {
        tracing::warn!(
            fallbacks = ?fallbacks,
            "Fallback providers only run after Stability; without STABILITY_API_KEY they are never used"
        );
    }
}
