use crate::utils::error::Result;
use std::future::Future;

/// 在 `shutdown` 完成前等待請求；被取消時丟棄請求並回傳 `None`
pub async fn until_cancelled<T, F, S>(request: F, shutdown: S) -> Result<Option<T>>
where
    F: Future<Output = Result<T>>,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = request => result.map(Some),
        _ = shutdown => {
            tracing::warn!("🛑 Catalog request cancelled");
            Ok(None)
        }
    }
}

/// Ctrl-C 訊號；註冊失敗時永遠不觸發
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("⚠️ Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
