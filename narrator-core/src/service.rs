//! Per-request orchestration shared by the HTTP handlers and the CLI.

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::{
    AppError, Config,
    error::Result,
    forecast,
    model::{DailyData, WeatherNarrative},
    narrative::{NarrativeGenerator, narrator_from_config},
    prompt,
    provider::{WeatherProvider, weather_provider_from_config},
    style::{Personality, ToneVariant},
};

#[derive(Debug, Clone)]
pub struct NarratorService {
    weather: Arc<dyn WeatherProvider>,
    narrator: Arc<dyn NarrativeGenerator>,
}

impl NarratorService {
    pub fn new(weather: Arc<dyn WeatherProvider>, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        Self { weather, narrator }
    }

    /// Build both upstream clients from config. Fails if either API key is missing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            weather_provider_from_config(config)?,
            narrator_from_config(config)?,
        ))
    }

    /// Narrative for the current weather in `city` plus up to five future days.
    ///
    /// Forecast dates are taken in the server's local timezone. Upstream calls
    /// run one after another: current weather, narrative, forecast.
    pub async fn weather_narrative(
        &self,
        city: &str,
        personality: Personality,
        today: NaiveDate,
    ) -> Result<WeatherNarrative> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::InvalidInput(
                "El nombre de la ciudad es requerido.".to_string(),
            ));
        }

        let facts = self.weather.fetch_current(city).await?;
        tracing::info!(
            city,
            resolved = %facts.location_name,
            %personality,
            "fetched current weather"
        );

        let tone = personality.tone(ToneVariant::Extended);
        let narrative = self
            .narrator
            .generate(&prompt::current_weather_prompt(city, &facts, tone))
            .await?;

        let entries = self
            .weather
            .fetch_forecast(facts.latitude, facts.longitude)
            .await?;
        let forecast = forecast::reduce(&entries, today, &Local);
        tracing::debug!(entries = entries.len(), days = forecast.len(), "reduced forecast");

        Ok(WeatherNarrative {
            narrative,
            forecast,
        })
    }

    /// Narrative for one forecasted day previously returned to the client.
    pub async fn daily_narrative(
        &self,
        daily: &DailyData,
        personality: Personality,
    ) -> Result<String> {
        tracing::info!(day = %daily.day, %personality, "generating daily narrative");

        let tone = personality.tone(ToneVariant::Brief);
        let narrative = self
            .narrator
            .generate(&prompt::daily_prompt(daily, tone))
            .await?;

        Ok(narrative)
    }
}
