//! 스캔 폼 컨트롤 식별자.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 폼 컨트롤 — 스캔 입력 필드 1개 + 디코드 결과 대상 필드 5개
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// 스캐너 키 입력을 받는 스캔 필드
    QrInput,
    Name,
    Gender,
    Dob,
    Address,
    Source,
}

impl FormField {
    /// 디코드 결과가 기록되는 대상 필드 (기록 순서)
    pub const DESTINATIONS: [FormField; 5] = [
        FormField::Name,
        FormField::Gender,
        FormField::Dob,
        FormField::Address,
        FormField::Source,
    ];

    /// 페이지 상의 컨트롤 ID
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::QrInput => "qrInput",
            FormField::Name => "name",
            FormField::Gender => "gender",
            FormField::Dob => "dob",
            FormField::Address => "address",
            FormField::Source => "source",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
