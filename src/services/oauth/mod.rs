//! # Twitter OAuth 1.0a 서비스
//!
//! 3단계 OAuth 흐름(요청 토큰 → 사용자 인가 → access token 교환)을 수행하고,
//! 브라우저가 만든 `authId`로 진행 중인 흐름을 추적합니다.
//!
//! ```text
//! Browser                 Solotter                        Twitter
//!   │ POST auth-request     │                                │
//!   │ (authId)             ─┤ oauth_request ── request_token ─►│
//!   │                       │ store: token → (authId, secret) │
//!   │◄── 302 authenticate ──┤                                 │
//!   │ ───────────── 사용자 인가 ─────────────────────────────►│
//!   │◄──────────── 302 callback?oauth_token&oauth_verifier ───┤
//!   │ GET auth-callback    ─┤ oauth_callback ─ access_token ──►│
//!   │                       │ store: authId → TwitterAuth     │
//!   │                       │ oauth_end → open_session        │
//!   │◄── Set-Cookie, 302 / ─┤                                 │
//! ```
//!
//! 구현체:
//! - [`TwitterOAuthService`] - 실제 Twitter 엔드포인트 사용
//! - [`StubOAuthService`] - 네트워크 없이 고정된 토큰으로 같은 상태 머신을 재현

pub mod signer;
pub mod stub_oauth_service;
pub mod token_store;
pub mod twitter_oauth_service;

pub use signer::OAuthSigner;
pub use stub_oauth_service::StubOAuthService;
pub use token_store::{OAuthEnd, RequestTokenEntry, TokenStore};
pub use twitter_oauth_service::TwitterOAuthService;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::requests::OAuthCallbackParams;
use crate::domain::dto::responses::OAuthRedirect;
use crate::domain::models::access_user::AccessUser;
use crate::domain::models::twitter_auth::TwitterAuth;

/// OAuth 흐름 계약
///
/// 토큰 저장소는 구현체가 단독으로 소유합니다. 라우터는 이 trait을 통해서만
/// 상태를 바꿀 수 있습니다.
#[async_trait]
pub trait OAuthService: Send + Sync {
    /// 요청 토큰을 발급받아 `authId`와 연결하고, 사용자가 이동할 URL을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - `authId` 형식 오류
    /// * `UpstreamError` - Twitter 요청 토큰 엔드포인트 실패 (재시도하지 않음)
    async fn oauth_request(&self, auth_id: &str) -> AppResult<OAuthRedirect>;

    /// 콜백의 요청 토큰을 소비하고 access token으로 교환합니다.
    ///
    /// 성공하면 요청 토큰에 연결되어 있던 `authId`를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidFlowError` - 알 수 없거나, 이미 사용되었거나, 만료된 토큰. 사용자가 인가를 거부한 경우
    /// * `UpstreamError` - access token 교환 실패
    async fn oauth_callback(&self, params: &OAuthCallbackParams) -> AppResult<String>;

    /// 완료된 자격 증명을 한 번만 꺼냅니다. 에러를 반환하지 않습니다.
    fn oauth_end(&self, auth_id: &str) -> OAuthEnd;

    /// 자격 증명을 서버에 보관하고, 쿠키에 넣을 공개 정보를 반환합니다.
    fn open_session(&self, auth: TwitterAuth) -> AccessUser;

    /// 세션 핸들로 서버 측 자격 증명을 조회합니다.
    fn session_credential(&self, access_token: &str) -> Option<TwitterAuth>;
}

/// 콜백 파라미터에 해당하는 요청 토큰 항목을 꺼냅니다.
///
/// 사용자가 인가를 거부하면 Twitter는 `denied=<oauth_token>`만 전달합니다.
/// 이 경우에도 해당 항목을 폐기합니다.
pub(crate) fn take_callback_entry(
    store: &TokenStore,
    params: &OAuthCallbackParams,
) -> AppResult<RequestTokenEntry> {
    if let Some(denied) = &params.denied {
        store.take_request(denied);
        return Err(AppError::InvalidFlowError(
            "사용자가 인가를 거부했습니다".to_string(),
        ));
    }

    store.take_request(&params.oauth_token).ok_or_else(|| {
        AppError::InvalidFlowError("유효하지 않거나 만료된 인증 흐름입니다".to_string())
    })
}

/// 새 세션 핸들을 발급하고 자격 증명을 연결합니다.
pub(crate) fn open_session_in(store: &TokenStore, auth: TwitterAuth) -> AccessUser {
    let handle = Uuid::new_v4().simple().to_string();
    let user = AccessUser::new(handle.as_str(), auth.display_name());
    store.insert_session(&handle, auth);
    user
}
