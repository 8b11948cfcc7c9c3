use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    Config,
    config::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
};

use super::WeatherSource;

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";

/// Fixed forecast parameters; only latitude/longitude vary per call.
const FORECAST_PARAMS: &[(&str, &str)] = &[
    ("current", "temperature_2m,precipitation,rain"),
    ("hourly", "temperature_2m,precipitation_probability,precipitation,rain"),
    ("daily", "temperature_2m_min,temperature_2m_max,weathercode"),
    ("temperature_unit", "fahrenheit"),
    ("wind_speed_unit", "mph"),
    ("precipitation_unit", "inch"),
    ("timeformat", "iso8601"),
    ("timezone", "auto"),
    ("past_days", "0"),
    ("forecast_days", "7"),
];

#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new(Client::new(), DEFAULT_GEOCODING_URL, DEFAULT_FORECAST_URL)
    }
}

impl OpenMeteo {
    pub fn new(http: Client, geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            http,
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(WeatherError::Client)?;

        Ok(Self::new(http, &config.geocoding_url, &config.forecast_url))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    // Open-Meteo drops the key entirely when nothing matches.
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

// A `current=` query answers under `current`; `current_weather` is accepted
// too and wins when both are present.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<ForecastCurrent>,
    #[serde(default)]
    current_weather: Option<ForecastCurrent>,
}

impl ForecastResponse {
    fn into_current(self) -> Option<ForecastCurrent> {
        self.current_weather.or(self.current)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: f64,
    precipitation: f64,
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn resolve_coordinates(&self, search_term: &str) -> Result<Coordinates, WeatherError> {
        let parsed: GeoSearchResponse = self
            .get_json(GEOCODING, &self.geocoding_url, &[("name", search_term.to_string())])
            .await
            .inspect_err(|e| tracing::warn!("Error fetching coordinates: {}", e))?;

        let first = parsed.results.first().ok_or_else(|| {
            tracing::warn!("No matching locations found for '{}'", search_term);
            WeatherError::NotFound(search_term.to_string())
        })?;

        tracing::debug!(
            "Resolved '{}' to ({}, {})",
            search_term,
            first.latitude,
            first.longitude
        );

        Ok(Coordinates {
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }

    async fn fetch_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let mut query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ];
        query.extend(FORECAST_PARAMS.iter().map(|(k, v)| (*k, v.to_string())));

        let parsed: ForecastResponse = self
            .get_json(FORECAST, &self.forecast_url, &query)
            .await
            .inspect_err(|e| tracing::warn!("Error fetching weather data: {}", e))?;

        let current = parsed
            .into_current()
            .ok_or(WeatherError::MissingCurrent { endpoint: FORECAST })?;

        Ok(WeatherSnapshot::new(current.temperature_2m, current.precipitation))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
