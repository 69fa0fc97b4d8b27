//! Upstream payloads and the normalized shapes returned to callers.

pub mod github;
pub mod number;
pub mod weather;

pub use github::{GitHubErrorBody, GitHubUser, UserQuery, UserSummary};
pub use weather::{Condition, CurrentWeather, GeocodeEntry, GeocodeResult, WeatherSummary};
