//! 스캔 디코드 요청 포트.
//!
//! 구현: `scanform-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::scan::DecodeReply;

/// 원격 디코드 인터페이스
#[async_trait]
pub trait ScanDecoder: Send + Sync {
    /// trim된 스캔 문자열을 디코드 서버로 전송하고 응답 본문을 파싱한다.
    ///
    /// 서버가 `error`로 보고한 실패는 `Ok(DecodeReply::Rejected)`,
    /// 전송/파싱 실패는 `Err`로 반환한다.
    async fn decode(&self, qr_data: &str) -> Result<DecodeReply, CoreError>;
}
