use reqwest::StatusCode;

/// Failures talking to the geocoding or forecast endpoints.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No matching locations found for '{0}'")]
    NotFound(String),

    #[error("Failed to send request to {endpoint}: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response contained no current conditions")]
    MissingCurrent { endpoint: &'static str },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound(_))
    }
}

/// Everything that can go wrong while answering one request.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("No city was supplied")]
    UserInputMissing,

    #[error("City '{0}' is not in the supported set")]
    UserInputUnsupported(String),

    #[error("Location lookup failed: {0}")]
    UpstreamLookupFailed(#[source] WeatherError),

    #[error("Forecast lookup failed: {0}")]
    UpstreamForecastFailed(#[source] WeatherError),

    #[error("No handler matched request type '{request_type}' (intent: {intent:?})")]
    NoMatchingHandler {
        request_type: String,
        intent: Option<String>,
    },

    #[error(transparent)]
    UnhandledFault(#[from] anyhow::Error),
}
