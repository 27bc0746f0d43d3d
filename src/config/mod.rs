//! # Configuration Module
//!
//! 서버 설정을 환경 변수 기반으로 중앙집중식 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, 정적 파일 경로
//! - [`auth_config`] - Twitter OAuth 앱, OAuth 흐름 만료, 세션 쿠키
//!
//! ## 설계 원칙
//!
//! - 민감한 정보(consumer secret, 쿠키 키)는 환경 변수로만 제공
//! - 필수 값이 누락되면 `AppError::ConfigError`를 반환하고 서버 시작을 중단
//! - `PROFILE`에 따라 `.env.dev` / `.env.prod` 파일을 먼저 로드 (`main.rs`)
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="127.0.0.1"
//! export PORT="8080"              # 미설정 시 development 3000, 그 외 8080
//! export DIST_DIR="./dist"        # 정적 파일은 $DIST_DIR/public 에서 제공
//!
//! # 세션
//! export COOKIE_SECRET="at-least-32-bytes-of-random-secret-material"
//!
//! # Twitter OAuth 앱
//! export TWITTER_CONSUMER_KEY="..."
//! export TWITTER_CONSUMER_SECRET="..."
//! export TWITTER_CALLBACK_URI="http://localhost:8080/api/twitter-auth-callback"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
