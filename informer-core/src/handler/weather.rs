use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    Config, RequestEnvelope, Response,
    envelope::{CITY_SLOT, GET_WEATHER_INTENT},
    error::SkillError,
    model::WeatherSnapshot,
    provider::WeatherSource,
};

use super::RequestHandler;

pub const ASK_FOR_CITY: &str = "Please tell me the city you would like to check the weather for.";
pub const UNSUPPORTED_CITY: &str = "I'm sorry, but I can only provide weather information for certain cities within the United States. Please ask about another city.";
pub const WEATHER_UNAVAILABLE: &str =
    "I am unable to access the weather at the moment. Please try again later.";

/// Answers `GetWeatherIntent`: geocode the city, then read current conditions.
#[derive(Debug, Clone)]
pub struct GetWeatherIntentHandler {
    config: Arc<Config>,
    source: Arc<dyn WeatherSource>,
}

impl GetWeatherIntentHandler {
    pub fn new(config: Arc<Config>, source: Arc<dyn WeatherSource>) -> Self {
        Self { config, source }
    }

    /// Validate the slot and run both lookups in order.
    async fn lookup<'a>(
        &self,
        city: Option<&'a str>,
    ) -> Result<(&'a str, WeatherSnapshot), SkillError> {
        let city = city
            .filter(|c| !c.trim().is_empty())
            .ok_or(SkillError::UserInputMissing)?;

        if !self.config.is_supported(city) {
            return Err(SkillError::UserInputUnsupported(city.to_string()));
        }

        let coordinates = self
            .source
            .resolve_coordinates(city)
            .await
            .map_err(SkillError::UpstreamLookupFailed)?;

        let snapshot = self
            .source
            .fetch_conditions(coordinates.latitude, coordinates.longitude)
            .await
            .map_err(SkillError::UpstreamForecastFailed)?;

        Ok((city, snapshot))
    }
}

#[async_trait]
impl RequestHandler for GetWeatherIntentHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(GET_WEATHER_INTENT)
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        let speech = match self.lookup(envelope.slot_value(CITY_SLOT)).await {
            // Precipitation is requested in inches but has always been spoken as "mm".
            Ok((city, snapshot)) => format!(
                "The current weather in {city} is {}°F with {}mm of precipitation.",
                snapshot.temperature, snapshot.precipitation
            ),
            Err(SkillError::UserInputMissing) => ASK_FOR_CITY.to_string(),
            Err(SkillError::UserInputUnsupported(city)) => {
                tracing::debug!("Rejected unsupported city '{}'", city);
                UNSUPPORTED_CITY.to_string()
            }
            Err(
                e @ (SkillError::UpstreamLookupFailed(_) | SkillError::UpstreamForecastFailed(_)),
            ) => {
                tracing::error!("Error: {}", e);
                WEATHER_UNAVAILABLE.to_string()
            }
            Err(e) => return Err(e),
        };

        Ok(Response::speak(speech))
    }
}
