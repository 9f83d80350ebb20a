use std::future::IntoFuture;

use qr_backend::config::AppConfig;
use qr_backend::shutdown::shutdown_with_deadline;
use qr_backend::startup::load_static_assets;
use qr_backend::{AppState, build_app};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.is_compact() {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    // 先加载配置再初始化日志：日志级别/格式来自配置
    let config = match AppConfig::init_global() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config init failed: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config);

    // 预加载静态资源：任何文件读取失败都直接退出，不以残缺状态启动
    let assets_dir = config.assets_path();
    let assets = match load_static_assets(&assets_dir) {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Failed to initialize static cache: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("静态资源预加载完成: {} 个文件 ({:?})", assets.len(), assets_dir);
    if assets.get(&config.assets.index).is_none() {
        tracing::warn!("未找到首页资源 {}，GET / 将返回 500", config.assets.index);
    }

    let app = build_app(AppState::new(config, assets));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Bind address failed {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("Server: http://{}", addr);
    tracing::info!("Docs: http://{}/docs", addr);
    tracing::info!("Generate API: http://{}/api/generate", addr);

    let (shutdown_signal, deadline) = shutdown_with_deadline(config.shutdown.timeout_duration());
    let graceful = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .into_future();

    tokio::select! {
        res = graceful => {
            if let Err(e) = res {
                tracing::error!("服务器运行错误: {}", e);
                std::process::exit(1);
            }
            tracing::info!("服务器已优雅关闭");
        }
        _ = deadline => {
            tracing::warn!("优雅退出超时，强制退出");
        }
    }
}
