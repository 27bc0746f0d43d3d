//! # Core Module
//!
//! 서버 전역에서 공유하는 핵심 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현
//! - **라우터 통합**: `AppError::to_payload()`로 JSON 결과 변환
//! - **자동 변환**: `ErrorContext` 확장 trait으로 외부 에러 매핑

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
