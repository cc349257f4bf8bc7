//! 인메모리 폼.
//!
//! 스캔 필드와 대상 필드 5개의 값, 현재 포커스를 보관한다.

use parking_lot::RwLock;
use scanform_core::models::form::FormField;
use scanform_core::ports::form::FormFields;
use std::collections::HashMap;

/// `FormFields` 포트 구현 — 프로세스 메모리 상의 폼
#[derive(Debug, Default)]
pub struct InMemoryForm {
    values: RwLock<HashMap<FormField, String>>,
    focused: RwLock<Option<FormField>>,
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 포커스된 컨트롤
    pub fn focused(&self) -> Option<FormField> {
        *self.focused.read()
    }

    /// 대상 필드를 `id: value` 줄로 출력용 렌더링
    pub fn render(&self) -> String {
        let values = self.values.read();
        FormField::DESTINATIONS
            .iter()
            .map(|field| {
                let value = values.get(field).map(String::as_str).unwrap_or("");
                format!("{:<8} {}", format!("{field}:"), value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FormFields for InMemoryForm {
    fn value(&self, field: FormField) -> String {
        self.values.read().get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&self, field: FormField, value: &str) {
        self.values.write().insert(field, value.to_string());
    }

    fn focus(&self, field: FormField) {
        *self.focused.write() = Some(field);
    }
}
