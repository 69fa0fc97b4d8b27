//! 网关路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// 创建网关路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/get_github_user", get(handlers::get_github_user))
        .route("/get_weather/{city}", get(handlers::get_weather))
}
