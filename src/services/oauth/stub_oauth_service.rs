//! 네트워크 없이 동작하는 OAuth 서비스
//!
//! 로컬 개발과 테스트용입니다. 요청 토큰은 항상 [`STUB_TOKEN`]이며,
//! 리다이렉트 URL은 Twitter 대신 곧바로 콜백 경로를 가리킵니다.

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::dto::requests::OAuthCallbackParams;
use crate::domain::dto::responses::OAuthRedirect;
use crate::domain::models::access_user::AccessUser;
use crate::domain::models::twitter_auth::{ConsumerCredentials, TwitterAuth};
use crate::services::oauth::token_store::{OAuthEnd, TokenStore};
use crate::services::oauth::{open_session_in, take_callback_entry, OAuthService};
use crate::utils::string_utils::validate_auth_id;

pub const STUB_TOKEN: &str = "my_token";
pub const STUB_VERIFIER: &str = "my_verifier";
pub const STUB_SCREEN_NAME: &str = "solotter";

pub struct StubOAuthService {
    store: TokenStore,
}

impl StubOAuthService {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    fn fake_credential() -> TwitterAuth {
        TwitterAuth::from_consumer(
            &ConsumerCredentials::new("stub_consumer_key", "stub_consumer_secret"),
            "stub_access_token",
            "stub_access_token_secret",
        )
        .with_identity(Some("0".to_string()), Some(STUB_SCREEN_NAME.to_string()))
    }
}

#[async_trait]
impl OAuthService for StubOAuthService {
    async fn oauth_request(&self, auth_id: &str) -> AppResult<OAuthRedirect> {
        let auth_id = validate_auth_id(auth_id)?;
        self.store.insert_request(STUB_TOKEN, &auth_id, "my_token_secret");

        Ok(OAuthRedirect {
            redirect: format!(
                "/api/twitter-auth-callback?oauth_token={}&oauth_verifier={}",
                STUB_TOKEN, STUB_VERIFIER
            ),
        })
    }

    async fn oauth_callback(&self, params: &OAuthCallbackParams) -> AppResult<String> {
        let entry = take_callback_entry(&self.store, params)?;
        self.store.insert_verified(&entry.auth_id, Self::fake_credential());

        log::debug!("스텁 OAuth 콜백 완료: authId={}", entry.auth_id);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AppError;

    fn service() -> StubOAuthService {
        StubOAuthService::new(TokenStore::with_ttl_minutes(10, 24))
    }

    #[actix_web::test]
    async fn test_stub_flow_yields_credential_exactly_once() {
        let service = service();

        let redirect = service.oauth_request("abc").await.unwrap();
        assert_eq!(
            redirect.redirect,
            "/api/twitter-auth-callback?oauth_token=my_token&oauth_verifier=my_verifier"
        );
        assert_eq!(service.oauth_end("abc"), OAuthEnd::NotReady);

        let auth_id = service
            .oauth_callback(&OAuthCallbackParams::new(STUB_TOKEN, STUB_VERIFIER))
            .await
            .unwrap();
        assert_eq!(auth_id, "abc");

        match service.oauth_end("abc") {
            OAuthEnd::Ready(auth) => assert_eq!(auth.display_name(), STUB_SCREEN_NAME),
            other => panic!("expected Ready, got {:?}", other),
        }
        assert_eq!(service.oauth_end("abc"), OAuthEnd::NeverRequested);
    }

    #[actix_web::test]
    async fn test_stub_callback_replay_is_rejected() {
        let service = service();
        service.oauth_request("abc").await.unwrap();

        let params = OAuthCallbackParams::new(STUB_TOKEN, STUB_VERIFIER);
        service.oauth_callback(&params).await.unwrap();

        let replay = service.oauth_callback(&params).await;
        assert!(matches!(replay, Err(AppError::InvalidFlowError(_))));
    }

    #[actix_web::test]
    async fn test_unknown_token_creates_nothing() {
        let service = service();

        let result = service
            .oauth_callback(&OAuthCallbackParams::new("forged", "v"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidFlowError(_))));
        assert_eq!(service.oauth_end("abc"), OAuthEnd::NeverRequested);
    }

    #[actix_web::test]
    async fn test_denied_callback_discards_request() {
        let service = service();
        service.oauth_request("abc").await.unwrap();

        let mut params = OAuthCallbackParams::new("", "");
        params.denied = Some(STUB_TOKEN.to_string());

        let result = service.oauth_callback(&params).await;
        assert!(matches!(result, Err(AppError::InvalidFlowError(_))));
        assert_eq!(service.oauth_end("abc"), OAuthEnd::NeverRequested);
    }

    #[actix_web::test]
    async fn test_invalid_auth_id_is_rejected() {
        let service = service();

        let result = service.oauth_request("not valid!").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_open_session_keeps_secrets_server_side() {
        let service = service();
        let auth = StubOAuthService::fake_credential();

        let user = service.open_session(auth.clone());

        assert_eq!(user.display_name, STUB_SCREEN_NAME);
        assert_ne!(user.access_token, auth.token);
        assert_eq!(service.session_credential(&user.access_token), Some(auth));
        assert!(service.session_credential("unknown").is_none());
    }
}
