use serde::{Deserialize, Serialize};

/// Current conditions for a city, as reported by the weather provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherFacts {
    pub location_name: String,
    pub description: String,
    pub temperature_c: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// One 3-hour slot of the provider's 5-day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Unix timestamp of the slot.
    pub dt: i64,
    /// Provider timestamp text, `YYYY-MM-DD HH:MM:SS`.
    pub dt_txt: String,
    pub temperature_c: f64,
    pub icon: String,
}

/// The representative sample kept for a single future day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub day: String,
    pub temp: f64,
    pub icon: String,
}

/// Combined payload of the primary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherNarrative {
    pub narrative: String,
    pub forecast: Vec<ForecastSample>,
}

/// Day data sent back by the front-end when asking for a single-day narrative.
pub type DailyData = ForecastSample;
