//! 애플리케이션 설정 구조체.
//!
//! 디코드 서버 주소, 요청 타임아웃, 스캔 제출 정책 등 런타임 설정을 정의한다.
//! [`crate::config_manager::ConfigManager`]를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 디코드 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 스캔 입력 처리 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 서버 설정
// ============================================================

/// 디코드 서버 연결 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 디코드 서버 기본 URL (예: "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 디코드 엔드포인트 경로
    #[serde(default = "default_parse_path")]
    pub parse_path: String,
    /// 요청 타임아웃 (밀리초). 없으면 타임아웃 없음
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl ServerConfig {
    /// 요청 타임아웃
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("server.base_url이 비어있음".to_string()));
        }
        if !self.parse_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "server.parse_path는 '/'로 시작해야 함: {}",
                self.parse_path
            )));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(CoreError::Config(
                "server.request_timeout_ms는 0보다 커야 함".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            parse_path: default_parse_path(),
            request_timeout_ms: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_parse_path() -> String {
    "/parse_qr".to_string()
}

// ============================================================
// 스캔 설정
// ============================================================

/// 진행 중인 스캔과 새 스캔이 겹칠 때의 처리 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPolicy {
    /// 큐잉 — 이전 스캔 처리가 끝난 뒤 다음 스캔 처리
    #[default]
    Serial,
    /// 새 스캔이 진행 중인 요청을 취소
    LatestWins,
}

/// 스캔 입력 처리 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub submission_policy: SubmissionPolicy,
}
