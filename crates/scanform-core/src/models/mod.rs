//! 도메인 모델.
//!
//! 스캔 폼 컨트롤 식별자와 디코드 요청/응답 데이터 구조체.

pub mod form;
pub mod scan;
