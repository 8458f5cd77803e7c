//! HTTP surface: the two narrative endpoints and a liveness probe.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use narrator_core::{AppError, DailyData, NarratorService, Personality, WeatherNarrative};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(service: NarratorService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/get_weather_narrative", post(weather_narrative))
        .route("/get_daily_narrative", post(daily_narrative))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(service)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Any JSON value is accepted; only strings select a personality.
fn personality_of(value: Option<&Value>) -> Personality {
    Personality::from_optional(value.and_then(Value::as_str))
}

#[derive(Debug, Deserialize)]
struct WeatherNarrativeRequest {
    city: Option<String>,
    personality: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DailyNarrativeRequest {
    daily_data: Option<DailyData>,
    personality: Option<Value>,
}

#[derive(Debug, Serialize)]
struct DailyNarrativeResponse {
    narrative: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by handlers; always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::InvalidInput(format!(
            "Cuerpo de la petición no válido: {}",
            rejection.body_text()
        )))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::CityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "request rejected");
        }

        error_response(status, &self.0.to_string())
    }
}

async fn health() -> &'static str {
    "OK"
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Ruta no encontrada.")
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Método no permitido.")
}

async fn weather_narrative(
    State(service): State<NarratorService>,
    payload: Result<Json<WeatherNarrativeRequest>, JsonRejection>,
) -> Result<Json<WeatherNarrative>, ApiError> {
    let Json(req) = payload?;
    let personality = personality_of(req.personality.as_ref());
    let city = req.city.unwrap_or_default();

    let out = service
        .weather_narrative(&city, personality, Local::now().date_naive())
        .await?;

    Ok(Json(out))
}

async fn daily_narrative(
    State(service): State<NarratorService>,
    payload: Result<Json<DailyNarrativeRequest>, JsonRejection>,
) -> Result<Json<DailyNarrativeResponse>, ApiError> {
    let Json(req) = payload?;
    let daily = req
        .daily_data
        .ok_or_else(|| AppError::InvalidInput("Faltan los datos del día.".to_string()))?;
    let personality = personality_of(req.personality.as_ref());

    let narrative = service.daily_narrative(&daily, personality).await?;

    Ok(Json(DailyNarrativeResponse { narrative }))
}
