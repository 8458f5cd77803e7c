use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{Config, NarrativeError, narrative::gemini::GeminiNarrator, provider::ProviderId};

pub mod gemini;

/// Text-generation capability that turns a prompt into a narrative.
///
/// Output is returned as produced by the model, without validation.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Construct the narrative generator from config.
pub fn narrator_from_config(config: &Config) -> anyhow::Result<Arc<dyn NarrativeGenerator>> {
    let cfg = config.require_provider(ProviderId::Gemini)?;

    let mut narrator = GeminiNarrator::new(cfg.api_key.clone());
    if let Some(model) = &cfg.model {
        narrator = narrator.with_model(model);
    }
    if let Some(base_url) = &cfg.base_url {
        narrator = narrator.with_base_url(base_url);
    }
    tracing::info!(model = narrator.model(), "using Gemini text model");

    Ok(Arc::new(narrator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrator_from_config_errors_when_missing_api_key() {
        let err = narrator_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("provider 'gemini'"));
    }

    #[test]
    fn narrator_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Gemini, "KEY".into());

        assert!(narrator_from_config(&cfg).is_ok());
    }
}
