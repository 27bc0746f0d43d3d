//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 서비스와 라우터가 공유하는 타입을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── DTOs     - 요청/응답 데이터 전송 객체 (authId, 트윗 본문, OAuth 콜백 파라미터)
//! └── Models   - 자격 증명, 세션 사용자, 라우터 결과
//!      │
//!      ▼
//! Routes (ServerRouter) → Services (OAuth, Twitter REST)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
