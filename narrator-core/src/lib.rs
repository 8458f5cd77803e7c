//! Core library for the weather narrator.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather gateway and the forecast reducer
//! - Personality tones, prompts and the Gemini narrative client
//! - The per-request orchestration used by the server and CLI
//!
//! It is used by `narrator-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod narrative;
pub mod prompt;
pub mod provider;
pub mod service;
pub mod style;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{AppError, NarrativeError, WeatherError};
pub use model::{DailyData, ForecastEntry, ForecastSample, WeatherFacts, WeatherNarrative};
pub use narrative::NarrativeGenerator;
pub use provider::{ProviderId, WeatherProvider};
pub use service::NarratorService;
pub use style::{Personality, ToneVariant};
