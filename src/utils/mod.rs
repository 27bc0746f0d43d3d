//! 공통 유틸리티 함수 모듈
//! 
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 검증, `Authorization` 헤더 파싱, form 인코딩 해석
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{parse_auth_header, validate_auth_id};
//!
//! let auth_id = validate_auth_id("  abc  ")?;
//! let token = parse_auth_header(Some("Bearer deadbeef"));
//! ```

pub mod string_utils;
