//! 城市天气查询服务
//!
//! 两步调用：先把城市名地理编码为经纬度，再用经纬度查询当前天气。

use axum::http::HeaderMap;
use serde::Deserialize;

use common::config::UpstreamUrls;
use common::errors::{AppError, AppResult};
use common::http_client::{OutboundClient, UpstreamResponse};
use common::models::weather::{CurrentWeather, GeocodeEntry, GeocodeResult, WeatherSummary};

const MISSING_KEY: &str =
    "OpenWeather API key not configured. Set OPENWEATHER_API_KEY env var or .env file.";

/// 天气查询服务
pub struct WeatherService {
    geocoding_url: String,
    current_weather_url: String,
    api_key: Option<String>,
    http_client: OutboundClient,
}

impl WeatherService {
    /// 创建新的天气服务实例
    pub fn new(upstream: &UpstreamUrls, api_key: Option<String>, http_client: OutboundClient) -> Self {
        Self {
            geocoding_url: upstream.geocoding.clone(),
            current_weather_url: upstream.current_weather.clone(),
            api_key,
            http_client,
        }
    }

    /// 查询城市当前天气
    pub async fn current_for_city(&self, city: &str) -> AppResult<WeatherSummary> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Internal(MISSING_KEY.to_string()))?;

        let place = self.geocode(city, api_key).await?;
        tracing::debug!(
            city = %city,
            resolved = %place.name,
            lat = place.latitude,
            lon = place.longitude,
            "city geocoded"
        );

        let current = self.current_conditions(&place, api_key).await?;
        summarize(place, current)
    }

    async fn geocode(&self, city: &str, api_key: &str) -> AppResult<GeocodeResult> {
        let query = [
            ("q", city.to_string()),
            ("appid", api_key.to_string()),
            ("limit", "1".to_string()),
        ];
        let response = self
            .http_client
            .get(&self.geocoding_url, HeaderMap::new(), &query)
            .await
            .map_err(|e| {
                AppError::BadGateway(format!(
                    "Network error talking to OpenWeather Geocoding API: {e}"
                ))
            })?;

        resolve_place(response, city)
    }

    async fn current_conditions(
        &self,
        place: &GeocodeResult,
        api_key: &str,
    ) -> AppResult<CurrentWeather> {
        let query = [
            ("lat", place.latitude.to_string()),
            ("lon", place.longitude.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ];
        let response = self
            .http_client
            .get(&self.current_weather_url, HeaderMap::new(), &query)
            .await
            .map_err(|e| {
                AppError::BadGateway(format!(
                    "Network error talking to OpenWeather Weather API: {e}"
                ))
            })?;

        if response.is_error() {
            return Err(AppError::Upstream {
                status: response.status,
                message: "OpenWeather weather API error.".to_string(),
            });
        }
        response.json::<CurrentWeather>().map_err(shape_error)
    }
}

/// Interprets the geocoding response; the first match wins.
fn resolve_place(response: UpstreamResponse, city: &str) -> AppResult<GeocodeResult> {
    if response.is_error() {
        return Err(AppError::Upstream {
            status: response.status,
            message: "OpenWeather geocoding API error.".to_string(),
        });
    }

    let places: serde_json::Value = response.json().map_err(shape_error)?;
    let Some(first) = places.as_array().and_then(|list| list.first()) else {
        return Err(AppError::NotFound(
            "Invalid city name or city not found.".to_string(),
        ));
    };

    let entry = GeocodeEntry::deserialize(first).map_err(shape_error)?;
    entry
        .resolve(city)
        .ok_or_else(|| AppError::BadGateway("Geocoding returned no coordinates.".to_string()))
}

fn summarize(place: GeocodeResult, current: CurrentWeather) -> AppResult<WeatherSummary> {
    let description = current
        .primary_description()
        .ok_or_else(|| {
            AppError::Internal(
                "Unexpected response shape from OpenWeather: empty weather list".to_string(),
            )
        })?
        .to_string();

    Ok(WeatherSummary {
        city: place.name,
        temperature: current.main.temp,
        weather_description: description,
    })
}

fn shape_error(e: serde_json::Error) -> AppError {
    AppError::Internal(format!("Unexpected response shape from OpenWeather: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use common::models::weather::{Condition, MainReading};

    fn response(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string().into(),
        }
    }

    fn london() -> GeocodeResult {
        GeocodeResult {
            name: "London".into(),
            latitude: 51.5,
            longitude: -0.12,
        }
    }

    #[test]
    fn test_resolve_place_first_match() {
        let body = r#"[{"name":"London","lat":51.5,"lon":-0.12},{"name":"London","lat":42.98,"lon":-81.24}]"#;
        assert_eq!(resolve_place(response(200, body), "london").unwrap(), london());
    }

    #[test]
    fn test_resolve_place_empty_or_not_a_list() {
        for body in ["[]", "{}", r#"{"cod":"400"}"#, "null", "\"London\""] {
            let err = resolve_place(response(200, body), "Nowhere").unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{body}: {err:?}");
        }
    }

    #[test]
    fn test_resolve_place_missing_coordinates() {
        let err = resolve_place(response(200, r#"[{"name":"Ghost Town"}]"#), "ghost").unwrap_err();
        assert!(matches!(err, AppError::BadGateway(_)));
        assert_eq!(err.to_string(), "Geocoding returned no coordinates.");
    }

    #[test]
    fn test_resolve_place_forwards_error_status() {
        let err = resolve_place(response(401, r#"{"cod":401}"#), "London").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_resolve_place_invalid_json_is_internal() {
        let err = resolve_place(response(200, "<html>"), "London").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let err = resolve_place(response(200, r#"[42]"#), "London").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_summarize() {
        let current = CurrentWeather {
            main: MainReading { temp: 11.6 },
            weather: vec![Condition {
                description: "light rain".into(),
            }],
        };
        let summary = summarize(london(), current).unwrap();
        assert_eq!(summary.city, "London");
        assert_eq!(summary.temperature, 11.6);
        assert_eq!(summary.weather_description, "light rain");
    }

    #[test]
    fn test_summarize_without_conditions() {
        let current = CurrentWeather {
            main: MainReading { temp: 1.0 },
            weather: vec![],
        };
        assert!(matches!(summarize(london(), current), Err(AppError::Internal(_))));
    }
}
