//! 폼 필드 읽기/쓰기 포트.
//!
//! 구현: `scanform-app` crate (`InMemoryForm`)

use crate::models::form::FormField;

/// 폼 컨트롤 접근 인터페이스
///
/// 모든 컨트롤은 바인더 활성화 전에 존재해야 한다.
pub trait FormFields: Send + Sync {
    /// 현재 값 반환
    fn value(&self, field: FormField) -> String;

    /// 값 덮어쓰기
    fn set_value(&self, field: FormField, value: &str);

    /// 입력 포커스 이동
    fn focus(&self, field: FormField);
}
