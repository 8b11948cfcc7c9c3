use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// The two upstream lookups behind the weather intent.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Resolve a city name or postal code to the first matching location.
    async fn resolve_coordinates(&self, search_term: &str) -> Result<Coordinates, WeatherError>;

    async fn fetch_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the Open-Meteo source from config.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn WeatherSource>, WeatherError> {
    Ok(Arc::new(OpenMeteo::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_default_config_builds() {
        let source = source_from_config(&Config::default());
        assert!(source.is_ok());
    }

    #[test]
    fn source_from_config_honours_timeout() {
        let cfg = Config {
            request_timeout_secs: Some(2),
            ..Config::default()
        };
        assert!(source_from_config(&cfg).is_ok());
    }
}
