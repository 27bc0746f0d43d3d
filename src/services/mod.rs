//! 외부 시스템과 통신하는 서비스 계층 모듈
//!
//! 라우터는 서비스를 직접 생성하지 않고 `Arc<dyn Trait>`으로 주입받습니다.
//!
//! # Modules
//!
//! - [`oauth`] - Twitter OAuth 1.0a 흐름과 토큰 저장소
//! - [`twitter`] - 서명된 Twitter REST 호출
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::oauth::{OAuthService, StubOAuthService, TokenStore};
//! use crate::services::twitter::{TwitterApi, TwitterRestClient};
//!
//! let oauth: Arc<dyn OAuthService> =
//!     Arc::new(StubOAuthService::new(TokenStore::with_ttl_minutes(10, 24)));
//! let twitter: Arc<dyn TwitterApi> =
//!     Arc::new(TwitterRestClient::new("https://api.twitter.com/1.1")?);
//! ```

pub mod oauth;
pub mod twitter;
