//! 上游 API 调用服务

pub mod github;
pub mod weather;

pub use github::GitHubService;
pub use weather::WeatherService;
