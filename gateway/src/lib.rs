//! GitHub 用户与城市天气 API 网关
//!
//! 提供以下端点：
//! - `/healthz` 存活探针
//! - `/get_github_user` 查询 GitHub 用户资料
//! - `/get_weather/{city}` 查询城市当前天气（OpenWeather）
//!
//! 所有上游调用共用一个在启动时创建的 `OutboundClient`，通过 `AppState` 注入。

pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

use axum::{middleware, routing::get, Json, Router};
use common::middleware::request_id::request_id_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GitHub User & City Weather API",
        version = "0.1.0",
        description = "GitHub 用户与城市天气 API 网关"
    ),
    paths(
        handlers::healthz,
        handlers::get_github_user,
        handlers::get_weather,
    ),
    components(schemas(
        common::models::UserSummary,
        common::models::WeatherSummary,
        common::response::ErrorResponse,
        common::response::ApiError,
        common::response::ResponseMeta,
        handlers::HealthResponse,
    )),
    tags(
        (name = "health", description = "健康检查端点"),
        (name = "github", description = "GitHub 用户端点"),
        (name = "weather", description = "天气端点")
    )
)]
pub struct ApiDoc;

/// 创建完整的应用路由
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
