//! # scanform-app
//!
//! 스캔 입력 필드 → 디코드 서버 → 폼 필드 바인딩.
//!
//! - [`binder`] — `ScanFormBinder` (`on_ready` / `on_scan_submitted`)
//! - [`form`] — 인메모리 폼 (`FormFields` 포트 구현)
//! - [`notifier`] — 콘솔 알림 (`ScanNotifier` 포트 구현)

pub mod binder;
pub mod form;
pub mod notifier;
