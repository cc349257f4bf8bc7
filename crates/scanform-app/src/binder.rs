//! 스캔 폼 바인더.
//!
//! 스캔 필드 입력 → 디코드 서버 요청 → 대상 필드 기록 → 스캔 필드 정리.
//!
//! 진입점은 두 개다.
//! - [`ScanFormBinder::on_ready`] — 폼 준비 완료 시 스캔 필드에 포커스
//! - [`ScanFormBinder::on_scan_submitted`] — 스캔 필드 값 변경 시 1회 처리
//!
//! 겹치는 스캔은 [`SubmissionPolicy`]에 따라 큐잉하거나 이전 요청을 취소한다.

use scanform_core::config::SubmissionPolicy;
use scanform_core::error::CoreError;
use scanform_core::models::form::FormField;
use scanform_core::models::scan::{DecodeReply, ScanOutcome};
use scanform_core::ports::decoder::ScanDecoder;
use scanform_core::ports::form::FormFields;
use scanform_core::ports::notifier::ScanNotifier;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, error, info, warn};

/// 전송/파싱 실패 시 사용자 알림 문구
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to decode scanned data.";

/// 서버가 보고한 디코드 실패 알림 문구
pub fn rejection_message(error: &str) -> String {
    format!("Error: {error}")
}

/// 스캔 필드 ↔ 대상 필드 바인더
pub struct ScanFormBinder {
    form: Arc<dyn FormFields>,
    decoder: Arc<dyn ScanDecoder>,
    notifier: Arc<dyn ScanNotifier>,
    policy: SubmissionPolicy,
    /// Serial 정책: 스캔 1사이클 전체를 보호 (FIFO)
    cycle_lock: Mutex<()>,
    /// LatestWins 정책: 최신 제출 번호
    generation: AtomicU64,
    /// LatestWins 정책: 새 제출 시작 신호
    superseded: Notify,
}

impl ScanFormBinder {
    /// 새 바인더 생성 (기본 정책: Serial)
    pub fn new(
        form: Arc<dyn FormFields>,
        decoder: Arc<dyn ScanDecoder>,
        notifier: Arc<dyn ScanNotifier>,
    ) -> Self {
        Self {
            form,
            decoder,
            notifier,
            policy: SubmissionPolicy::default(),
            cycle_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            superseded: Notify::new(),
        }
    }

    /// 제출 정책 설정
    pub fn with_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    /// 폼 준비 완료 — 스캐너가 바로 입력할 수 있도록 스캔 필드에 포커스
    pub fn on_ready(&self) {
        self.form.focus(FormField::QrInput);
        info!("스캔 대기 중 (정책: {:?})", self.policy);
    }

    /// 스캔 필드 값 변경 처리
    ///
    /// trim 후 비어있으면 아무것도 하지 않는다. 그 외에는 디코드 결과를
    /// 기록하거나 알림을 표시한 뒤 스캔 필드를 비우고 다시 포커스한다.
    pub async fn on_scan_submitted(&self, raw_value: &str) -> ScanOutcome {
        let qr_data = raw_value.trim();
        if qr_data.is_empty() {
            debug!("빈 스캔 입력 무시");
            return ScanOutcome::Ignored;
        }

        match self.policy {
            SubmissionPolicy::Serial => {
                let _cycle = self.cycle_lock.lock().await;
                let result = self.decoder.decode(qr_data).await;
                self.settle(result).await
            }
            SubmissionPolicy::LatestWins => self.submit_latest(qr_data).await,
        }
    }

    /// LatestWins: 더 새로운 제출이 시작되면 진행 중인 요청을 버린다.
    async fn submit_latest(&self, qr_data: &str) -> ScanOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.superseded.notify_waiters();

        let notified = self.superseded.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if !self.is_current(ticket) {
            debug!("스캔 #{ticket} 요청 전 취소됨");
            return ScanOutcome::Superseded;
        }

        let result = tokio::select! {
            result = self.decoder.decode(qr_data) => result,
            _ = &mut notified => {
                debug!("스캔 #{ticket} 진행 중 요청 취소");
                return ScanOutcome::Superseded;
            }
        };

        if !self.is_current(ticket) {
            debug!("스캔 #{ticket} 응답 폐기 (더 새로운 스캔 존재)");
            return ScanOutcome::Superseded;
        }

        self.settle(result).await
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// 디코드 결과 반영 후 스캔 필드 정리
    async fn settle(&self, result: Result<DecodeReply, CoreError>) -> ScanOutcome {
        let outcome = match result {
            Ok(DecodeReply::Record(record)) => {
                for field in FormField::DESTINATIONS {
                    self.form.set_value(field, record.value_of(field));
                }
                info!(
                    "스캔 디코드 완료 (source={})",
                    record.value_of(FormField::Source)
                );
                ScanOutcome::Applied(record)
            }
            Ok(DecodeReply::Rejected(message)) => {
                warn!("디코드 서버 거부: {message}");
                self.alert(&rejection_message(&message)).await;
                ScanOutcome::Rejected(message)
            }
            Err(e) => {
                error!("스캔 디코드 실패: {e}");
                self.alert(GENERIC_FAILURE_MESSAGE).await;
                ScanOutcome::Failed(e.to_string())
            }
        };

        self.form.set_value(FormField::QrInput, "");
        self.form.focus(FormField::QrInput);
        outcome
    }

    async fn alert(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message).await {
            warn!("알림 표시 실패: {e}");
        }
    }
}
