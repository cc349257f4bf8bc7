//! 스캔 디코드 요청/응답 모델.
//!
//! 디코드 서버 와이어 계약:
//! - 요청: `{"qrData": "<trim된 스캔 문자열>"}`
//! - 응답: `{"error": "..."}` 또는 `{"name"?, "gender"?, "dob"?, "address"?, "source"?}`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::models::form::FormField;

/// 디코드 요청 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// trim된 스캔 문자열
    #[serde(rename = "qrData")]
    pub qr_data: String,
}

impl ScanRequest {
    pub fn new(qr_data: impl Into<String>) -> Self {
        Self {
            qr_data: qr_data.into(),
        }
    }
}

/// 디코드 성공 결과
///
/// 모든 필드는 선택적이며, 없는 필드는 폼에 빈 문자열로 기록된다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    /// 디코더가 판별한 QR 형식 (`secure`, `plain`, `abha`)
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
}

impl DecodedRecord {
    /// 대상 필드에 기록할 값 (없으면 빈 문자열)
    pub fn value_of(&self, field: FormField) -> &str {
        let value = match field {
            FormField::Name => &self.name,
            FormField::Gender => &self.gender,
            FormField::Dob => &self.dob,
            FormField::Address => &self.address,
            FormField::Source => &self.source,
            FormField::QrInput => return "",
        };
        value.as_deref().unwrap_or("")
    }
}

/// 파싱된 디코드 응답
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeReply {
    /// 디코드 성공
    Record(DecodedRecord),
    /// 서버가 `error` 필드로 디코드 실패를 보고함
    Rejected(String),
}

impl DecodeReply {
    /// 응답 JSON 본문에서 생성
    ///
    /// `error`가 비어있지 않으면 데이터 필드는 무시한다.
    /// `null` 본문은 `CoreError::InvalidResponse`, 그 외 객체가 아닌 본문
    /// (배열, 숫자, 문자열, 불리언)은 모든 필드가 빈 레코드로 취급한다.
    pub fn from_body(body: Value) -> Result<Self, CoreError> {
        let map = match body {
            Value::Object(ref map) => map,
            Value::Null => {
                return Err(CoreError::InvalidResponse("null 응답 본문".to_string()));
            }
            _ => return Ok(DecodeReply::Record(DecodedRecord::default())),
        };

        if let Some(message) = map.get("error").and_then(truthy_text) {
            return Ok(DecodeReply::Rejected(message));
        }

        let record: DecodedRecord = serde_json::from_value(body)?;
        Ok(DecodeReply::Record(record))
    }
}

/// 스캔 1회 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// 공백뿐인 입력 — 요청 없음, 스캔 필드 유지
    Ignored,
    /// 디코드 결과를 대상 필드에 기록함
    Applied(DecodedRecord),
    /// 서버 에러 메시지를 알림으로 표시함
    Rejected(String),
    /// 전송/파싱 실패 — 일반 실패 알림 표시
    Failed(String),
    /// 더 새로운 스캔에 의해 취소됨 (LatestWins 정책)
    Superseded,
}

impl ScanOutcome {
    /// 스캔 필드 정리(clear + focus)가 수행되는 결과인지
    pub fn clears_input(&self) -> bool {
        matches!(
            self,
            ScanOutcome::Applied(_) | ScanOutcome::Rejected(_) | ScanOutcome::Failed(_)
        )
    }
}

/// 폼 컨트롤에 값을 대입할 때의 강제 변환 규칙
///
/// null, false, 0, 빈 문자열은 값 없음으로 취급한다.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(control_text(other)),
    }
}

/// 폼 컨트롤 문자열 변환
///
/// 배열은 원소를 `,`로 연결(null 원소는 빈 문자열), 객체는 `[object Object]`.
fn control_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items
            .iter()
            .map(control_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// 정수값 부동소수는 소수점 없이 표기 (`1.0` → `1`)
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{f:.0}");
            }
            return f.to_string();
        }
    }
    n.to_string()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(truthy_text))
}
