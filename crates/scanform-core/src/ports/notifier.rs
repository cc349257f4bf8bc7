//! 사용자 알림 포트.
//!
//! 구현: `scanform-app` crate (`ConsoleNotifier`)

use async_trait::async_trait;

use crate::error::CoreError;

/// 사용자 알림 인터페이스 (블로킹 alert 대체)
#[async_trait]
pub trait ScanNotifier: Send + Sync {
    /// 메시지 표시
    async fn notify(&self, message: &str) -> Result<(), CoreError>;
}
