//! OpenWeather geocoding and current-conditions models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One element of the direct geocoding response array.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl GeocodeEntry {
    /// Resolves coordinates, using `requested` when the provider gave no name.
    ///
    /// Returns `None` if either coordinate is missing.
    pub fn resolve(self, requested: &str) -> Option<GeocodeResult> {
        let (latitude, longitude) = (self.lat?, self.lon?);
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| requested.to_string());
        Some(GeocodeResult {
            name,
            latitude,
            longitude,
        })
    }
}

/// Coordinates bridging the geocode and current-weather calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions payload, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub main: MainReading,
    pub weather: Vec<Condition>,
}

/// The `main` block of a current conditions payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MainReading {
    /// Temperature in the requested units (metric, so °C).
    #[serde(deserialize_with = "super::number::float")]
    pub temp: f64,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

impl CurrentWeather {
    /// Description of the primary condition.
    pub fn primary_description(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }
}

/// Normalized weather summary returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSummary {
    /// Resolved city name.
    pub city: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Free-text description of the current conditions.
    pub weather_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocode_entry_resolves() {
        let entry: GeocodeEntry = serde_json::from_value(json!({
            "name": "London",
            "lat": 51.5073219,
            "lon": -0.1276474,
            "country": "GB"
        }))
        .unwrap();

        let place = entry.resolve("london").unwrap();
        assert_eq!(place.name, "London");
        assert_eq!(place.latitude, 51.5073219);
        assert_eq!(place.longitude, -0.1276474);
    }

    #[test]
    fn test_geocode_entry_name_fallback() {
        let missing: GeocodeEntry = serde_json::from_value(json!({"lat": 1.0, "lon": 2.0})).unwrap();
        assert_eq!(missing.resolve("Atlantis").unwrap().name, "Atlantis");

        let empty: GeocodeEntry =
            serde_json::from_value(json!({"name": "", "lat": 1.0, "lon": 2.0})).unwrap();
        assert_eq!(empty.resolve("Atlantis").unwrap().name, "Atlantis");
    }

    #[test]
    fn test_geocode_entry_missing_coordinates() {
        let no_lon: GeocodeEntry =
            serde_json::from_value(json!({"name": "X", "lat": 1.0})).unwrap();
        assert!(no_lon.resolve("X").is_none());

        let null_lat: GeocodeEntry =
            serde_json::from_value(json!({"name": "X", "lat": null, "lon": 2.0})).unwrap();
        assert!(null_lat.resolve("X").is_none());
    }

    #[test]
    fn test_current_weather_deserialization() {
        let current: CurrentWeather = serde_json::from_value(json!({
            "main": {"temp": 11.62, "humidity": 81},
            "weather": [
                {"id": 803, "main": "Clouds", "description": "broken clouds"},
                {"id": 500, "main": "Rain", "description": "light rain"}
            ],
            "name": "London"
        }))
        .unwrap();

        assert_eq!(current.main.temp, 11.62);
        assert_eq!(current.primary_description(), Some("broken clouds"));
    }

    #[test]
    fn test_current_weather_shape_errors() {
        assert!(serde_json::from_value::<CurrentWeather>(json!({"weather": []})).is_err());
        assert!(serde_json::from_value::<CurrentWeather>(
            json!({"main": {}, "weather": [{"description": "clear sky"}]})
        )
        .is_err());

        let no_conditions: CurrentWeather =
            serde_json::from_value(json!({"main": {"temp": 3}, "weather": []})).unwrap();
        assert_eq!(no_conditions.primary_description(), None);
    }
}
