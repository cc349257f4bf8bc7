//! 콘솔 알림.

use async_trait::async_trait;
use scanform_core::error::CoreError;
use scanform_core::ports::notifier::ScanNotifier;
use std::io::Write;
use tracing::info;

/// `ScanNotifier` 포트 구현 — stderr에 알림 출력
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl ScanNotifier for ConsoleNotifier {
    async fn notify(&self, message: &str) -> Result<(), CoreError> {
        info!("사용자 알림: {message}");
        writeln!(std::io::stderr(), "⚠️  {message}")?;
        Ok(())
    }
}
