//! Application configuration.
//!
//! Everything is read from the process environment once at startup. A `.env`
//! file in the working directory may seed the environment beforehand.

use std::path::Path;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Log output format for the fmt subscriber layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name, recorded on startup and shutdown log lines.
    pub service_name: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// OpenWeather API key. `None` when unset or empty.
    pub openweather_api_key: Option<String>,
    /// Optional GitHub token sent as a bearer credential.
    pub github_token: Option<String>,
    /// Upstream endpoints.
    pub upstream: UpstreamUrls,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "gateway".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            openweather_api_key: None,
            github_token: None,
            upstream: UpstreamUrls::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment for the named service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: std::env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            openweather_api_key: non_empty(std::env::var("OPENWEATHER_API_KEY").ok()),
            github_token: non_empty(std::env::var("GITHUB_TOKEN").ok()),
            upstream: UpstreamUrls::load(),
            log_format: LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()),
        }
    }

    /// Returns the bind address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Base URLs of the third-party APIs.
#[derive(Debug, Clone)]
pub struct UpstreamUrls {
    /// GitHub REST API root; user profiles live under `/users/{username}`.
    pub github_api: String,
    /// OpenWeather direct geocoding endpoint.
    pub geocoding: String,
    /// OpenWeather current conditions endpoint.
    pub current_weather: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            github_api: DEFAULT_GITHUB_API_URL.to_string(),
            geocoding: DEFAULT_GEOCODING_URL.to_string(),
            current_weather: DEFAULT_WEATHER_URL.to_string(),
        }
    }
}

impl UpstreamUrls {
    /// Loads upstream URLs from the environment, falling back to the public endpoints.
    pub fn load() -> Self {
        Self {
            github_api: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            geocoding: std::env::var("OPENWEATHER_GEOCODING_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODING_URL.to_string()),
            current_weather: std::env::var("OPENWEATHER_WEATHER_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
        }
    }
}

/// Seeds the environment from `.env` in the working directory.
///
/// Variables already present in the environment are left untouched. A missing
/// or unreadable file is ignored.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

fn load_dotenv_from(path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    for (key, value) in parse_dotenv(&content) {
        // Only set if not already set by the environment
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), strip_quotes(value.trim())))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
