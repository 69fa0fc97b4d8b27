//! Handler模块

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use common::errors::{AppError, AppResult};
use common::models::github::{UserQuery, UserSummary};
use common::models::weather::WeatherSummary;
use common::response::ErrorResponse;
use crate::services::{GitHubService, WeatherService};
use crate::state::AppState;

/// 存活探针
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// 查询 GitHub 用户资料
#[utoipa::path(
    get,
    path = "/get_github_user",
    tag = "github",
    params(UserQuery),
    responses(
        (status = 200, description = "用户资料", body = UserSummary),
        (status = 403, description = "GitHub 拒绝访问", body = ErrorResponse),
        (status = 404, description = "用户不存在", body = ErrorResponse),
        (status = 422, description = "用户名为空", body = ErrorResponse),
        (status = 429, description = "GitHub 限流", body = ErrorResponse),
        (status = 500, description = "响应格式异常", body = ErrorResponse),
        (status = 502, description = "无法连接 GitHub", body = ErrorResponse)
    )
)]
pub async fn get_github_user(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<UserSummary>> {
    let Query(pairs) = pairs?;
    let query = UserQuery::from_pairs(pairs);
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = GitHubService::new(
        state.config.upstream.github_api.clone(),
        state.config.github_token.clone(),
        state.http_client.clone(),
    );

    let summary = service.get_user(&query.username).await?;
    Ok(Json(summary))
}

/// 查询城市当前天气
#[utoipa::path(
    get,
    path = "/get_weather/{city}",
    tag = "weather",
    params(
        ("city" = String, Path, description = "城市名（例如 London）")
    ),
    responses(
        (status = 200, description = "当前天气", body = WeatherSummary),
        (status = 404, description = "城市不存在", body = ErrorResponse),
        (status = 422, description = "城市名无法解码", body = ErrorResponse),
        (status = 500, description = "未配置 API Key 或响应格式异常", body = ErrorResponse),
        (status = 502, description = "无法连接 OpenWeather", body = ErrorResponse)
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> AppResult<Json<WeatherSummary>> {
    let Path(city) = city?;
    let service = WeatherService::new(
        &state.config.upstream,
        state.config.openweather_api_key.clone(),
        state.http_client.clone(),
    );

    let summary = service.current_for_city(&city).await?;
    Ok(Json(summary))
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 固定为 true
    pub ok: bool,
}
