use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    WeatherError,
    model::{ForecastEntry, WeatherFacts},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const CURRENT: &str = "OpenWeather current weather";
const FORECAST: &str = "OpenWeather 5-day forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    language: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            language,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// GET `{base_url}/{path}` with the shared query parameters and decode the body.
    ///
    /// A 404 is reported as `None` so each caller decides what "not found" means.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?query, "requesting {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "{endpoint} request failed");
            return Err(WeatherError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<WeatherFacts, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json(CURRENT, "weather", &[("q", city.to_string())])
            .await?
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(WeatherFacts {
            location_name: parsed.name,
            description,
            temperature_c: parsed.main.temp,
            latitude: parsed.coord.lat,
            longitude: parsed.coord.lon,
        })
    }

    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>, WeatherError> {
        let parsed: OwForecastResponse = self
            .get_json(
                FORECAST,
                "forecast",
                &[("lat", lat.to_string()), ("lon", lon.to_string())],
            )
            .await?
            .ok_or_else(|| WeatherError::Status {
                endpoint: FORECAST,
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("no forecast for coordinates ({lat}, {lon})"),
            })?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| ForecastEntry {
                dt: entry.dt,
                dt_txt: entry.dt_txt,
                temperature_c: entry.main.temp,
                icon: entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.icon)
                    .unwrap_or_default(),
            })
            .collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new("TEST_KEY".into(), "es".into()).with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn fetch_current_parses_facts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Madrid"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "es"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Madrid",
                "coord": { "lat": 40.4165, "lon": -3.7026 },
                "main": { "temp": 22.5, "feels_like": 21.9, "humidity": 30 },
                "weather": [{ "description": "cielo claro", "icon": "01d" }]
            })))
            .mount(&server)
            .await;

        let facts = provider(&server).fetch_current("Madrid").await.unwrap();

        assert_eq!(facts.location_name, "Madrid");
        assert_eq!(facts.description, "cielo claro");
        assert_eq!(facts.temperature_c, 22.5);
        assert_eq!(facts.latitude, 40.4165);
        assert_eq!(facts.longitude, -3.7026);
    }

    #[tokio::test]
    async fn fetch_current_maps_404_to_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Atlantis"));
    }

    #[tokio::test]
    async fn fetch_current_reports_other_statuses() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current("Madrid").await.unwrap_err();
        match err {
            WeatherError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_forecast_keeps_provider_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "40.4165"))
            .and(query_param("lon", "-3.7026"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "200",
                "list": [
                    {
                        "dt": 1792497600,
                        "dt_txt": "2026-10-20 09:00:00",
                        "main": { "temp": 14.0 },
                        "weather": [{ "description": "nubes", "icon": "03d" }]
                    },
                    {
                        "dt": 1792508400,
                        "dt_txt": "2026-10-20 12:00:00",
                        "main": { "temp": 19.5 },
                        "weather": [{ "description": "lluvia ligera", "icon": "10d" }]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let entries = provider(&server).fetch_forecast(40.4165, -3.7026).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dt_txt, "2026-10-20 09:00:00");
        assert_eq!(entries[1].temperature_c, 19.5);
        assert_eq!(entries[1].icon, "10d");
    }

    #[tokio::test]
    async fn fetch_forecast_never_reports_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_forecast(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"main\": {}}"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_current("Madrid").await.unwrap_err();
        assert!(matches!(err, WeatherError::Decode { .. }));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }
}
