use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::ImageProviderId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // HTTP
    pub cors_allow_origins: Vec<String>,
    pub max_body_bytes: usize,

    // Stability AI (diffusion provider, disabled without a key)
    pub stability_api_key: Option<String>,
    pub stability_api_url: String,
    pub stability_timeout_seconds: u64,
    pub stability_refine_strength: f64,

    // Pollinations renderer
    pub render_api_url: String,
    pub render_timeout_seconds: u64,
    pub render_max_retries: u32,
    pub render_retry_delay_ms: u64,

    // Unsplash stock photos
    pub stock_photo_base_url: String,

    // Server-side providers tried after the diffusion provider
    pub fallback_providers: Vec<ImageProviderId>,

    // Feedback tickets
    pub feedback_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            max_body_bytes: 20 * 1024 * 1024,
            stability_api_key: None,
            stability_api_url: "https://api.stability.ai".to_string(),
            stability_timeout_seconds: 120,
            stability_refine_strength: 0.6,
            render_api_url: "https://image.pollinations.ai".to_string(),
            render_timeout_seconds: 30,
            render_max_retries: 2,
            render_retry_delay_ms: 2000,
            stock_photo_base_url: "https://images.unsplash.com".to_string(),
            fallback_providers: Vec::new(),
            feedback_file: PathBuf::from("data/feedback.json"),
        }
    }
}

/// Parses a numeric variable, keeping `default` when unset or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// `FALLBACK_PROVIDERS` entries, in order, without duplicates.
pub fn parse_fallback_providers(value: &str) -> Result<Vec<ImageProviderId>> {
    let mut providers = Vec::new();
    for name in list(value) {
        let id = match name.to_lowercase().as_str() {
            "puter" | "pollinations" => ImageProviderId::Puter,
            "unsplash" | "stock" => ImageProviderId::Unsplash,
            other => anyhow::bail!("Unknown fallback provider '{}'", other),
        };
        if !providers.contains(&id) {
            providers.push(id);
        }
    }
    Ok(providers)
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Settings::default();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);

        // HTTP
        let cors_allow_origins = list(
            &env::var("CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )
        .map(str::to_string)
        .collect();
        let max_body_bytes = parsed_or("MAX_BODY_BYTES", defaults.max_body_bytes);

        // Stability AI
        let stability_api_key = env::var("STABILITY_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let stability_api_url = env::var("STABILITY_API_URL").unwrap_or(defaults.stability_api_url);
        let stability_timeout_seconds =
            parsed_or("STABILITY_TIMEOUT_SECONDS", defaults.stability_timeout_seconds);
        let stability_refine_strength =
            parsed_or("STABILITY_REFINE_STRENGTH", defaults.stability_refine_strength);

        // Pollinations renderer
        let render_api_url = env::var("RENDER_API_URL").unwrap_or(defaults.render_api_url);
        let render_timeout_seconds =
            parsed_or("RENDER_TIMEOUT_SECONDS", defaults.render_timeout_seconds);
        let render_max_retries = parsed_or("RENDER_MAX_RETRIES", defaults.render_max_retries);
        let render_retry_delay_ms =
            parsed_or("RENDER_RETRY_DELAY_MS", defaults.render_retry_delay_ms);

        let stock_photo_base_url =
            env::var("STOCK_PHOTO_BASE_URL").unwrap_or(defaults.stock_photo_base_url);

        let fallback_providers = parse_fallback_providers(
            &env::var("FALLBACK_PROVIDERS").unwrap_or_default(),
        )
        .context("Invalid FALLBACK_PROVIDERS")?;

        let feedback_file = env::var("FEEDBACK_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.feedback_file);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            max_body_bytes,
            stability_api_key,
            stability_api_url,
            stability_timeout_seconds,
            stability_refine_strength,
            render_api_url,
            render_timeout_seconds,
            render_max_retries,
            render_retry_delay_ms,
            stock_photo_base_url,
            fallback_providers,
            feedback_file,
        })
    }
}
