//! Solotter 서버
//!
//! 트윗 한 개를 작성하는 것만 가능한 최소한의 Twitter 클라이언트 백엔드입니다.
//! Twitter OAuth 1.0a 로그인 흐름을 수행하고, 로그인한 사용자의 트윗을 대신 게시합니다.
//!
//! # Features
//!
//! - **OAuth 1.0a**: 요청 토큰 → 사용자 인가 → access token 교환
//! - **authId 상관관계**: 익명 브라우저와 진행 중인 OAuth 흐름을 연결
//! - **서명된 세션 쿠키**: 공개 정보만 쿠키에, 자격 증명은 서버 메모리에
//! - **스텁 모드**: 네트워크 없이 같은 흐름을 재현
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP Adapter   │ ← handlers::serve, handlers::session
//! └─────────────────┘
//!          │ RouteRequest / RouterResult
//!          ▼
//! ┌─────────────────┐
//! │ Request Router  │ ← routes::router
//! └─────────────────┘
//!          │ Arc<dyn OAuthService>, Arc<dyn TwitterApi>
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← OAuth 흐름 + 토큰 저장소, Twitter REST
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Twitter     │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use solotter_web::routes::{RouteRequest, ServerRouter};
//! use solotter_web::services::oauth::{StubOAuthService, TokenStore};
//! use solotter_web::services::twitter::TwitterRestClient;
//!
//! let router = ServerRouter::new(
//!     Arc::new(StubOAuthService::new(TokenStore::with_ttl_minutes(10, 24))),
//!     Arc::new(TwitterRestClient::new("https://api.twitter.com/1.1")?),
//! );
//! let result = router
//!     .resolve(RouteRequest::new("/api/twitter-auth-request").with_body(json!({ "authId": "abc" })))
//!     .await;
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
