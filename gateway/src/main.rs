//! API 网关服务入口
//!
//! 启动顺序：加载 `.env` → 读取配置 → 初始化日志 → 创建共享的出站 HTTP 客户端 →
//! 启动 HTTP 服务，收到关闭信号后优雅退出并释放客户端。

use anyhow::Context;
use common::config::{load_dotenv, AppConfig, LogFormat};
use common::http_client::OutboundClient;
use gateway::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "gateway";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    // 初始化日志追踪
    init_tracing(config.log_format);

    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY 未配置，天气接口将返回 500");
    }

    // 创建共享的出站客户端与应用状态
    let http_client = OutboundClient::new().context("创建出站 HTTP 客户端失败")?;
    let state = AppState::new(config.clone(), http_client.clone());

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_address();
    info!(service = %config.service_name, address = %addr, "启动 API 网关");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    http_client.close();
    info!(service = %config.service_name, "服务已停止");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，开始优雅退出");
}
