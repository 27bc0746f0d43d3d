//! # 세션 쿠키
//!
//! 로그인 사용자의 공개 정보([`AccessUser`])를 서명된 쿠키 하나에 담습니다.
//!
//! ```text
//! solotter_session = sign( base64url( {"accessUser":{"accessToken":..,"displayName":..}} ) )
//! ```
//!
//! - 서명 키: `COOKIE_SECRET`에서 파생 (32바이트 이상)
//! - 속성: `HttpOnly`, `Path=/`, `Domain=COOKIE_DOMAIN`, `Max-Age=24h`, `SameSite=Lax`
//! - 서명 검증에 실패한 쿠키는 로그인하지 않은 것으로 취급합니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::HttpRequest;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::auth_config::SessionConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::access_user::AccessUser;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_user: Option<AccessUser>,
}

/// 세션 쿠키 서명 키와 쿠키 속성
#[derive(Clone)]
pub struct SessionKeys {
    key: Key,
    domain: String,
}

impl SessionKeys {
    /// # Errors
    ///
    /// `secret`이 32바이트보다 짧으면 `ConfigError`
    pub fn new(secret: &str, domain: impl Into<String>) -> AppResult<Self> {
        SessionConfig::check_secret(secret)?;
        Ok(Self {
            key: Key::derive_from(secret.as_bytes()),
            domain: domain.into(),
        })
    }

    /// `COOKIE_SECRET`, `COOKIE_DOMAIN`에서 생성합니다.
    pub fn from_env() -> AppResult<Self> {
        Self::new(&SessionConfig::cookie_secret()?, SessionConfig::cookie_domain())
    }

    /// 요청의 세션 쿠키에서 로그인 사용자를 읽습니다.
    pub fn read(&self, req: &HttpRequest) -> Option<AccessUser> {
        let cookie = req.cookie(SessionConfig::COOKIE_NAME)?;

        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let verified = match jar.signed(&self.key).get(SessionConfig::COOKIE_NAME) {
            Some(verified) => verified,
            None => {
                log::warn!("서명이 올바르지 않은 세션 쿠키를 무시합니다");
                return None;
            }
        };

        let bytes = URL_SAFE_NO_PAD.decode(verified.value()).ok()?;
        serde_json::from_slice::<SessionData>(&bytes).ok()?.access_user
    }

    /// 로그인 사용자를 담은 서명된 쿠키를 만듭니다.
    pub fn login_cookie(&self, user: &AccessUser) -> AppResult<Cookie<'static>> {
        let data = SessionData {
            access_user: Some(user.clone()),
        };
        let json = serde_json::to_vec(&data).context("세션 직렬화 실패")?;

        let cookie = Cookie::build(SessionConfig::COOKIE_NAME, URL_SAFE_NO_PAD.encode(json))
            .domain(self.domain.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::hours(SessionConfig::MAX_AGE_HOURS))
            .finish();

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        jar.get(SessionConfig::COOKIE_NAME)
            .cloned()
            .ok_or_else(|| AppError::InternalError("세션 쿠키 서명 실패".to_string()))
    }
}
