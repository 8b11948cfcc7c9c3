use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a location, in the units requested from the forecast API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Fahrenheit.
    pub temperature: f64,
    pub precipitation: f64,
    pub description: String,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, precipitation: f64) -> Self {
        Self {
            temperature,
            precipitation,
            description: format!(
                "The current temperature is {temperature}°F with {precipitation} inches of precipitation."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_uses_plain_number_formatting() {
        let snapshot = WeatherSnapshot::new(72.0, 0.25);
        assert_eq!(
            snapshot.description,
            "The current temperature is 72°F with 0.25 inches of precipitation."
        );
    }
}
