//! 优雅退出
//!
//! 监听 SIGINT/SIGTERM（Windows 下为 Ctrl+C），供 `axum::serve(...).with_graceful_shutdown` 使用。

use std::time::Duration;
use tracing::{error, info};

/// 退出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// 用户中断信号 (Ctrl+C)
    Interrupt,
    /// 终止信号 (SIGTERM)
    Terminate,
}

/// 等待退出信号；信号处理器注册失败时记录错误并永不返回（服务照常运行）。
pub async fn wait_for_signal() -> ShutdownReason {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut sigint, mut sigterm) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(i), Ok(t)) => (i, t),
                (Err(e), _) | (_, Err(e)) => {
                    error!("信号处理器启动失败: {}", e);
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigint.recv() => {
                info!("接收到SIGINT信号 (Ctrl+C)");
                ShutdownReason::Interrupt
            }
            _ = sigterm.recv() => {
                info!("接收到SIGTERM信号");
                ShutdownReason::Terminate
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("监听Ctrl+C信号失败: {}", e);
            return std::future::pending().await;
        }
        info!("接收到Ctrl+C信号");
        ShutdownReason::Interrupt
    }
}

/// 构造 graceful shutdown future：收到信号后开始停止接收新连接。
///
/// 同时返回一个在 `timeout` 之后强制结束的截止 future，由调用方与 serve 任务竞争。
pub fn shutdown_with_deadline(
    timeout: Duration,
) -> (
    impl std::future::Future<Output = ()> + Send + 'static,
    tokio::sync::oneshot::Receiver<()>,
) {
    let (tx, rx) = tokio::sync::oneshot::channel();
    let signal = async move {
        let reason = wait_for_signal().await;
        info!("接收到退出信号: {:?}，开始优雅退出（超时 {}s）...", reason, timeout.as_secs());
        arm_deadline(timeout, tx);
    };
    (signal, rx)
}

/// 启动强制退出计时：`timeout` 后向 `tx` 发送通知
fn arm_deadline(timeout: Duration, tx: tokio::sync::oneshot::Sender<()>) {
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        let _ = tx.send(());
    });
}
