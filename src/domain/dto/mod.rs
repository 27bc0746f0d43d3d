//! # Data Transfer Objects
//!
//! API 경계에서 주고받는 요청/응답 객체입니다.
//! 요청 DTO는 `validator`로 형식과 길이를 검증합니다.
//!
//! - [`requests`] - 라우터가 본문/쿼리에서 해석하는 요청 DTO
//! - [`responses`] - OAuth 서비스와 Twitter API 응답 DTO

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
