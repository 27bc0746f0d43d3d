//! # Domain Models
//!
//! OAuth 흐름과 라우팅에서 사용하는 도메인 모델입니다.
//!
//! - [`twitter_auth`] - 서버 측에만 존재하는 완전한 Twitter 자격 증명
//! - [`access_user`] - 세션 쿠키에 저장되는 공개 사용자 정보
//! - [`router_result`] - 라우터가 돌려주는 태그된 결과 타입
//!
//! ## 비밀 정보 경계
//!
//! ```text
//! TwitterAuth (token, token_secret, consumer_secret)   ← 서버 메모리 전용
//!        │ open_session()
//!        ▼
//! AccessUser { accessToken: <세션 핸들>, displayName }  ← 서명된 쿠키
//! ```

pub mod access_user;
pub mod router_result;
pub mod twitter_auth;

pub use access_user::AccessUser;
pub use router_result::{JsonPayload, RouterResult};
pub use twitter_auth::{ConsumerCredentials, TwitterAuth};
