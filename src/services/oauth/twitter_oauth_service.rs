//! # Twitter OAuth 서비스
//!
//! `https://twitter.com/oauth/*` 엔드포인트와 실제로 통신하는 [`OAuthService`] 구현체입니다.
//!
//! ## 사용하는 엔드포인트
//!
//! | 단계 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | 요청 토큰 발급 | `/oauth/request_token` | POST |
//! | 사용자 인가 | `/oauth/authenticate?oauth_token=...` | 브라우저 리다이렉트 |
//! | access token 교환 | `/oauth/access_token` | POST |
//!
//! 토큰 엔드포인트는 멱등하지 않으므로 실패해도 재시도하지 않고 `UpstreamError`로 전파합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::config::auth_config::TwitterConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::requests::OAuthCallbackParams;
use crate::domain::dto::responses::OAuthRedirect;
use crate::domain::models::access_user::AccessUser;
use crate::domain::models::twitter_auth::TwitterAuth;
use crate::services::oauth::signer::OAuthSigner;
use crate::services::oauth::token_store::{OAuthEnd, TokenStore};
use crate::services::oauth::{open_session_in, take_callback_entry, OAuthService};
use crate::services::twitter::http_client;
use crate::utils::string_utils::{parse_form_encoded, validate_auth_id};

/// 실제 Twitter OAuth 1.0a 서비스
pub struct TwitterOAuthService {
    config: TwitterConfig,
    client: reqwest::Client,
    store: TokenStore,
}

impl TwitterOAuthService {
    /// # Errors
    ///
    /// HTTP 클라이언트를 만들 수 없으면 `InternalError`
    pub fn new(config: TwitterConfig, store: TokenStore) -> AppResult<Self> {
        Ok(Self {
            config,
            client: http_client()?,
            store,
        })
    }

    /// 서명된 POST를 보내고 form 인코딩 응답 본문을 해석합니다.
    async fn post_token_endpoint(
        &self,
        url: &str,
        authorization: String,
        step: &str,
    ) -> AppResult<HashMap<String, String>> {
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 요청 실패: {}", step, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 응답 읽기 실패: {}", step, e)))?;

        if !status.is_success() {
            return Err(AppError::UpstreamError(format!(
                "{} 실패 (HTTP {}): {}",
                step, status, body
            )));
        }

        Ok(parse_form_encoded(&body))
    }

    /// 요청 토큰과 secret을 발급받습니다.
    async fn request_token(&self) -> AppResult<(String, String)> {
        let authorization = OAuthSigner::consumer(&self.config.consumer).authorize(
            "POST",
            &self.config.endpoints.request_token_url,
            &[],
            &[("oauth_callback", self.config.callback_uri.as_str())],
        )?;

        let mut fields = self
            .post_token_endpoint(
                &self.config.endpoints.request_token_url,
                authorization,
                "요청 토큰 발급",
            )
            .await?;

        if fields.get("oauth_callback_confirmed").map(String::as_str) != Some("true") {
            return Err(AppError::UpstreamError(
                "요청 토큰 응답에 oauth_callback_confirmed=true가 없습니다".to_string(),
            ));
        }

        let token = take_field(&mut fields, "oauth_token")?;
        let token_secret = take_field(&mut fields, "oauth_token_secret")?;
        Ok((token, token_secret))
    }

    /// 요청 토큰과 verifier를 access token으로 교환합니다.
    async fn access_token(
        &self,
        request_token: &str,
        request_token_secret: &str,
        verifier: &str,
    ) -> AppResult<TwitterAuth> {
        let authorization = OAuthSigner::consumer(&self.config.consumer)
            .with_token(request_token, request_token_secret)
            .authorize(
                "POST",
                &self.config.endpoints.access_token_url,
                &[],
                &[("oauth_verifier", verifier)],
            )?;

        let mut fields = self
            .post_token_endpoint(
                &self.config.endpoints.access_token_url,
                authorization,
                "access token 교환",
            )
            .await?;

        let token = take_field(&mut fields, "oauth_token")?;
        let token_secret = take_field(&mut fields, "oauth_token_secret")?;

        Ok(
            TwitterAuth::from_consumer(&self.config.consumer, token, token_secret)
                .with_identity(fields.remove("user_id"), fields.remove("screen_name")),
        )
    }
}

fn take_field(fields: &mut HashMap<String, String>, name: &str) -> AppResult<String> {
    fields
        .remove(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::UpstreamError(format!("Twitter 응답에 {}이(가) 없습니다", name)))
}

#[async_trait]
impl OAuthService for TwitterOAuthService {
    async fn oauth_request(&self, auth_id: &str) -> AppResult<OAuthRedirect> {
        let auth_id = validate_auth_id(auth_id)?;
        let (token, token_secret) = self.request_token().await?;

        self.store.insert_request(&token, &auth_id, &token_secret);
        log::info!("OAuth 요청 토큰 발급 완료: authId={}", auth_id);

        Ok(OAuthRedirect {
            redirect: format!(
                "{}?oauth_token={}",
                self.config.endpoints.authenticate_url,
                urlencoding::encode(&token)
            ),
        })
    }

    async fn oauth_callback(&self, params: &OAuthCallbackParams) -> AppResult<String> {
        let entry = take_callback_entry(&self.store, params)?;

        let auth = self
            .access_token(&params.oauth_token, &entry.token_secret, &params.oauth_verifier)
            .await?;

        log::info!(
            "OAuth 콜백 완료: authId={}, screen_name={}",
            entry.auth_id,
            auth.display_name()
        );
        self.store.insert_verified(&entry.auth_id, auth);

        Ok(entry.auth_id)
    }

    fn oauth_end(&self, auth_id: &str) -> OAuthEnd {
        self.store.take_verified(auth_id)
    }

    fn open_session(&self, auth: TwitterAuth) -> AccessUser {
        open_session_in(&self.store, auth)
    }

    fn session_credential(&self, access_token: &str) -> Option<TwitterAuth> {
        self.store.session(access_token)
    }
}
