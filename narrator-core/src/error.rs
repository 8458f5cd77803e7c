use thiserror::Error;

/// Failures raised by a weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered 404 for a city lookup.
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to reach weather provider ({endpoint}): {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures raised by a narrative generator.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("text model request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach text model: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse text model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("text model returned no text")]
    Empty,
}

/// Client-facing error taxonomy. Every variant renders as the message shown to
/// the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No se pudo encontrar la ciudad: {0}.")]
    CityNotFound(String),

    #[error("Error al obtener los datos del tiempo: {0}")]
    Upstream(String),

    #[error("Ha ocurrido un error inesperado: {0}")]
    Unexpected(String),
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::CityNotFound(city) => AppError::CityNotFound(city),
            WeatherError::Status { .. } | WeatherError::Transport { .. } => {
                AppError::Upstream(err.to_string())
            }
            WeatherError::Decode { .. } => AppError::Unexpected(err.to_string()),
        }
    }
}

impl From<NarrativeError> for AppError {
    fn from(err: NarrativeError) -> Self {
        AppError::Unexpected(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
