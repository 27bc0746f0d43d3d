//! # Authentication Configuration Module
//!
//! Twitter OAuth 1.0a 앱 자격 증명, OAuth 흐름 만료 시간, 세션 쿠키 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Twitter OAuth 설정 (스텁 모드가 아닌 경우)
//! ```bash
//! export TWITTER_CONSUMER_KEY="your-consumer-key"
//! export TWITTER_CONSUMER_SECRET="your-consumer-secret"
//! export TWITTER_CALLBACK_URI="http://localhost:8080/api/twitter-auth-callback"
//! ```
//!
//! ### 세션 쿠키 설정
//! ```bash
//! export COOKIE_SECRET="at-least-32-bytes-of-random-secret-material"
//! export COOKIE_DOMAIN="localhost"
//! ```
//!
//! ### 선택 설정
//! ```bash
//! export TWITTER_OAUTH_STUB="true"        # 네트워크 없이 동작하는 스텁 OAuth 서비스
//! export OAUTH_FLOW_TTL_MINUTES="10"      # 완료되지 않은 OAuth 흐름의 만료 시간
//! ```

use std::env;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::twitter_auth::ConsumerCredentials;

/// 세션 쿠키 서명 키의 최소 길이 (바이트)
pub const MIN_COOKIE_SECRET_BYTES: usize = 32;

fn required_var(name: &str) -> AppResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{} must be set", name))),
    }
}

/// Twitter OAuth 앱 설정
pub struct TwitterOAuthConfig;

impl TwitterOAuthConfig {
    /// 관리자 OAuth 앱의 consumer key
    ///
    /// # Errors
    ///
    /// `TWITTER_CONSUMER_KEY`가 설정되지 않은 경우 `ConfigError`
    pub fn consumer_key() -> AppResult<String> {
        required_var("TWITTER_CONSUMER_KEY")
    }

    /// 관리자 OAuth 앱의 consumer secret
    ///
    /// 이 값은 로그에 출력하지 마세요.
    pub fn consumer_secret() -> AppResult<String> {
        required_var("TWITTER_CONSUMER_SECRET")
    }

    /// 사용자가 인가한 뒤 Twitter가 리다이렉트할 콜백 URI
    ///
    /// Twitter 개발자 포털의 Callback URL 목록에 등록되어 있어야 합니다.
    pub fn callback_uri() -> AppResult<String> {
        required_var("TWITTER_CALLBACK_URI")
    }

    /// 네트워크 호출 없는 스텁 OAuth 서비스 사용 여부 (`TWITTER_OAUTH_STUB`)
    pub fn use_stub() -> bool {
        env::var("TWITTER_OAUTH_STUB")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    /// 완료되지 않은 OAuth 흐름(요청 토큰, 미수령 자격 증명)의 만료 시간 (분)
    ///
    /// 기본값: 10분. 1분에서 하루 사이가 아니면 기본값을 사용합니다.
    pub fn flow_ttl_minutes() -> i64 {
        Self::parse_flow_ttl_minutes(env::var("OAUTH_FLOW_TTL_MINUTES").ok().as_deref())
    }

    fn parse_flow_ttl_minutes(value: Option<&str>) -> i64 {
        let Some(value) = value else {
            return DEFAULT_FLOW_TTL_MINUTES;
        };

        match value.trim().parse::<i64>() {
            Ok(minutes) if (1..=MAX_FLOW_TTL_MINUTES).contains(&minutes) => minutes,
            _ => {
                log::error!(
                    "OAUTH_FLOW_TTL_MINUTES 값 {:?}이 올바르지 않습니다. 기본값 {} 사용",
                    value,
                    DEFAULT_FLOW_TTL_MINUTES
                );
                DEFAULT_FLOW_TTL_MINUTES
            }
        }
    }
}

const DEFAULT_FLOW_TTL_MINUTES: i64 = 10;
const MAX_FLOW_TTL_MINUTES: i64 = 24 * 60;

/// Twitter 엔드포인트 URL 모음
///
/// 기본값은 실제 Twitter 엔드포인트이며, 테스트에서는 [`TwitterEndpoints::with_base`]로
/// 모의 서버를 가리키게 합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterEndpoints {
    pub request_token_url: String,
    pub access_token_url: String,
    pub authenticate_url: String,
    pub api_base_url: String,
}

impl Default for TwitterEndpoints {
    fn default() -> Self {
        Self {
            request_token_url: "https://twitter.com/oauth/request_token".to_string(),
            access_token_url: "https://twitter.com/oauth/access_token".to_string(),
            authenticate_url: "https://twitter.com/oauth/authenticate".to_string(),
            api_base_url: "https://api.twitter.com/1.1".to_string(),
        }
    }
}

impl TwitterEndpoints {
    /// 모든 엔드포인트를 하나의 base URL 아래로 모읍니다.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            request_token_url: format!("{}/oauth/request_token", base),
            access_token_url: format!("{}/oauth/access_token", base),
            authenticate_url: format!("{}/oauth/authenticate", base),
            api_base_url: format!("{}/1.1", base),
        }
    }
}

/// OAuth 서비스에 주입되는 Twitter 앱 설정
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub consumer: ConsumerCredentials,
    pub callback_uri: String,
    pub endpoints: TwitterEndpoints,
}

impl TwitterConfig {
    pub fn new(consumer: ConsumerCredentials, callback_uri: impl Into<String>) -> Self {
        Self {
            consumer,
            callback_uri: callback_uri.into(),
            endpoints: TwitterEndpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: TwitterEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(
            ConsumerCredentials::new(
                TwitterOAuthConfig::consumer_key()?,
                TwitterOAuthConfig::consumer_secret()?,
            ),
            TwitterOAuthConfig::callback_uri()?,
        ))
    }
}

/// 세션 쿠키 설정
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 쿠키 이름
    pub const COOKIE_NAME: &'static str = "solotter_session";

    /// 세션 쿠키 유효 시간 (시간)
    pub const MAX_AGE_HOURS: i64 = 24;

    /// 세션 쿠키 서명 키 원본
    ///
    /// # Errors
    ///
    /// 설정되지 않았거나 32바이트보다 짧으면 `ConfigError`
    pub fn cookie_secret() -> AppResult<String> {
        let secret = required_var("COOKIE_SECRET")?;
        Self::check_secret(&secret)?;
        Ok(secret)
    }

    pub fn check_secret(secret: &str) -> AppResult<()> {
        if secret.len() < MIN_COOKIE_SECRET_BYTES {
            return Err(AppError::ConfigError(format!(
                "COOKIE_SECRET must be at least {} bytes",
                MIN_COOKIE_SECRET_BYTES
            )));
        }
        Ok(())
    }

    /// 쿠키 도메인 (`COOKIE_DOMAIN`, 기본값 `localhost`)
    pub fn cookie_domain() -> String {
        env::var("COOKIE_DOMAIN").unwrap_or_else(|_| "localhost".to_string())
    }
}
