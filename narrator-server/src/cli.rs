use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use narrator_core::{
    Config, NarratorService, Personality, ProviderId, narrative::gemini::DEFAULT_MODEL,
};
use tokio::net::TcpListener;

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "narrator", version, about = "AI weather narratives over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to bind, e.g. "0.0.0.0:5000". Overrides the configured value.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "openweather" or "gemini".
        provider: String,
    },

    /// Print the narrative and forecast for a city as JSON.
    Narrate {
        /// City name.
        city: String,

        /// Narrative style, e.g. "cheerful", "poetic", "technical", "sarcastic", "for-children".
        #[arg(long, short)]
        personality: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => serve(bind).await,
            Command::Configure { provider } => configure(&provider),
            Command::Narrate { city, personality } => {
                let service = NarratorService::from_config(&Config::load()?)?;
                let personality = Personality::from_optional(personality.as_deref());

                let out = service
                    .weather_narrative(&city, personality, Local::now().date_naive())
                    .await?;

                println!("{}", serde_json::to_string_pretty(&out)?);
                Ok(())
            }
        }
    }
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let service = NarratorService::from_config(&config)?;
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "weather narrator listening");

    axum::serve(listener, routes::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Prompt for a provider's credentials and store them in the config file.
///
/// Only the file is read and written, so keys coming from the environment are never persisted.
fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;
    if config.is_provider_configured(id) {
        println!("An API key for {id} is already stored; entering a new one replaces it.");
    }

    let api_key = Password::new(&format!("{id} API key:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    anyhow::ensure!(!api_key.is_empty(), "API key must not be empty");

    config.upsert_provider_api_key(id, api_key.to_string());

    if id == ProviderId::Gemini {
        let current = config
            .provider_config(id)
            .and_then(|cfg| cfg.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let model = Text::new("Gemini model:")
            .with_default(&current)
            .prompt()
            .context("Failed to read model name")?;

        if let Some(cfg) = config.providers.get_mut(id.as_str()) {
            cfg.model = Some(model.trim().to_string())
                .filter(|m| !m.is_empty() && m != DEFAULT_MODEL);
        }
    }

    config.save_to(&path)?;
    println!("Saved {id} credentials to {}", path.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
