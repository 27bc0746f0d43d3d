//! # 요청 라우터
//!
//! `(pathname, body, query, 로그인 사용자)`를 [`RouterResult`]로 변환합니다.
//! HTTP 세부사항(쿠키, 헤더, 상태 코드 작성)은 어댑터의 몫이며, 라우터는
//! 주입받은 서비스만 호출합니다.
//!
//! | 경로 | 입력 | 결과 |
//! |------|------|------|
//! | `/api/twitter-auth-request` | body `authId` | `Redirect(Twitter 인가 URL)` |
//! | `/api/twitter-auth-callback` | query `oauth_token`, `oauth_verifier` | `Login(AccessUser)` 또는 `Json 202 pending` |
//! | `/api/tweet` | body `text`, `inReplyTo?` + 세션 | `Json {"id"}` |
//! | 그 외 | - | `Next` |

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::requests::{OAuthCallbackParams, PostTweet, TweetRequest, TwitterAuthRequest};
use crate::domain::dto::responses::TweetResponse;
use crate::domain::models::access_user::AccessUser;
use crate::domain::models::router_result::{JsonPayload, RouterResult};
use crate::services::oauth::{OAuthEnd, OAuthService};
use crate::services::twitter::TwitterApi;

pub const AUTH_REQUEST_PATH: &str = "/api/twitter-auth-request";
pub const AUTH_CALLBACK_PATH: &str = "/api/twitter-auth-callback";
pub const TWEET_PATH: &str = "/api/tweet";

/// 라우터 입력
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub pathname: String,
    pub body: Value,
    pub query: HashMap<String, String>,
    pub access_user: Option<AccessUser>,
}

impl RouteRequest {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_user(mut self, access_user: Option<AccessUser>) -> Self {
        self.access_user = access_user;
        self
    }
}

/// 서비스를 주입받는 라우터
#[derive(Clone)]
pub struct ServerRouter {
    oauth: Arc<dyn OAuthService>,
    twitter: Arc<dyn TwitterApi>,
}

impl ServerRouter {
    pub fn new(oauth: Arc<dyn OAuthService>, twitter: Arc<dyn TwitterApi>) -> Self {
        Self { oauth, twitter }
    }

    /// 요청을 해석합니다. 에러는 JSON 에러 페이로드로 변환되므로 실패하지 않습니다.
    pub async fn resolve(&self, request: RouteRequest) -> RouterResult {
        let pathname = request.pathname.clone();

        match self.route(request).await {
            Ok(result) => result,
            Err(error) => {
                if error.status().is_server_error() {
                    log::error!("{} 처리 실패: {}", pathname, error);
                } else {
                    log::warn!("{} 요청 거부: {}", pathname, error);
                }
                RouterResult::Json(error.to_payload())
            }
        }
    }

    pub async fn route(&self, request: RouteRequest) -> AppResult<RouterResult> {
        match request.pathname.as_str() {
            AUTH_REQUEST_PATH => self.auth_request(&request.body).await,
            AUTH_CALLBACK_PATH => self.auth_callback(&request.query).await,
            TWEET_PATH => self.tweet(&request.body, request.access_user.as_ref()).await,
            _ => Ok(RouterResult::Next),
        }
    }

    async fn auth_request(&self, body: &Value) -> AppResult<RouterResult> {
        let request: TwitterAuthRequest = parse_body(body)?;
        let redirect = self.oauth.oauth_request(&request.auth_id).await?;

        Ok(RouterResult::Redirect(redirect.redirect))
    }

    async fn auth_callback(&self, query: &HashMap<String, String>) -> AppResult<RouterResult> {
        let params = callback_params(query)?;
        let auth_id = self.oauth.oauth_callback(&params).await?;

        match self.oauth.oauth_end(&auth_id) {
            OAuthEnd::Ready(auth) => {
                let user = self.oauth.open_session(auth);
                log::info!("로그인 완료: {}", user.display_name);
                Ok(RouterResult::Login(user))
            }
            OAuthEnd::NotReady => Ok(RouterResult::Json(JsonPayload::new(
                StatusCode::ACCEPTED,
                json!({ "status": "pending" }),
            ))),
            OAuthEnd::NeverRequested => Err(AppError::InvalidFlowError(
                "완료된 인증 흐름을 찾을 수 없습니다".to_string(),
            )),
        }
    }

    async fn tweet(&self, body: &Value, access_user: Option<&AccessUser>) -> AppResult<RouterResult> {
        let user = access_user
            .ok_or_else(|| AppError::UnauthenticatedError("로그인이 필요합니다".to_string()))?;
        let auth = self
            .oauth
            .session_credential(&user.access_token)
            .ok_or_else(|| AppError::UnauthenticatedError("세션이 만료되었습니다".to_string()))?;

        let request: TweetRequest = parse_body(body)?;

        let tweet = PostTweet::new(request.text).in_reply_to(request.in_reply_to);
        let created = self.twitter.post_tweet(&auth, &tweet).await?;
        let response = TweetResponse { id: created.id_str };

        Ok(RouterResult::Json(JsonPayload::ok(json!(response))))
    }
}

/// 본문을 DTO로 해석하고 검증합니다. 본문이 없으면 빈 객체로 취급합니다.
fn parse_body<T>(body: &Value) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let body = if body.is_null() { json!({}) } else { body.clone() };

    let parsed: T = serde_json::from_value(body)
        .map_err(|e| AppError::ValidationError(format!("요청 본문 형식 오류: {}", e)))?;
    parsed
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(parsed)
}

fn callback_params(query: &HashMap<String, String>) -> AppResult<OAuthCallbackParams> {
    let field = |name: &str| query.get(name).cloned().unwrap_or_default();

    let params = OAuthCallbackParams {
        oauth_token: field("oauth_token"),
        oauth_verifier: field("oauth_verifier"),
        denied: query.get("denied").cloned(),
    };

    if params.denied.is_none() {
        params
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::dto::requests::MAX_TWEET_LENGTH;
    use crate::domain::dto::responses::{OAuthRedirect, TweetCreated};
    use crate::domain::models::twitter_auth::TwitterAuth;
    use crate::services::oauth::stub_oauth_service::{STUB_TOKEN, STUB_VERIFIER};
    use crate::services::oauth::{StubOAuthService, TokenStore};

    /// 호출된 트윗을 기록하는 가짜 Twitter API
    #[derive(Default)]
    struct RecordingTwitter {
        posted: Mutex<Vec<(String, PostTweet)>>,
        fail: bool,
    }

    impl RecordingTwitter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn posted(&self) -> Vec<(String, PostTweet)> {
            self.posted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TwitterApi for RecordingTwitter {
        async fn get_status(&self, _auth: &TwitterAuth, id: &str) -> AppResult<Value> {
            Ok(json!({ "id_str": id }))
        }

        async fn post_tweet(&self, auth: &TwitterAuth, tweet: &PostTweet) -> AppResult<TweetCreated> {
            if self.fail {
                return Err(AppError::UpstreamError("HTTP 403: duplicate status".to_string()));
            }
            self.posted
                .lock()
                .unwrap()
                .push((auth.token.clone(), tweet.clone()));
            Ok(TweetCreated {
                id_str: "1050118621198921728".to_string(),
                text: Some(tweet.status.clone()),
            })
        }
    }

    /// 콜백은 성공하지만 자격 증명이 아직 준비되지 않은 OAuth 서비스
    struct PendingOAuth;

    #[async_trait]
    impl OAuthService for PendingOAuth {
        async fn oauth_request(&self, _auth_id: &str) -> AppResult<OAuthRedirect> {
            Ok(OAuthRedirect {
                redirect: "/pending".to_string(),
            })
        }

        async fn oauth_callback(&self, _params: &OAuthCallbackParams) -> AppResult<String> {
            Ok("abc".to_string())
        }

        fn oauth_end(&self, _auth_id: &str) -> OAuthEnd {
            OAuthEnd::NotReady
        }

        fn open_session(&self, auth: TwitterAuth) -> AccessUser {
            AccessUser::new("handle", auth.display_name())
        }

        fn session_credential(&self, _access_token: &str) -> Option<TwitterAuth> {
            None
        }
    }

    fn router_with(twitter: Arc<RecordingTwitter>) -> ServerRouter {
        let oauth = Arc::new(StubOAuthService::new(TokenStore::with_ttl_minutes(10, 24)));
        ServerRouter::new(oauth, twitter)
    }

    fn callback_query(token: &str, verifier: &str) -> HashMap<String, String> {
        HashMap::from([
            ("oauth_token".to_string(), token.to_string()),
            ("oauth_verifier".to_string(), verifier.to_string()),
        ])
    }

    fn error_code(result: &RouterResult) -> (StatusCode, String) {
        match result {
            RouterResult::Json(payload) => (
                payload.status,
                payload.body["error"].as_str().unwrap_or_default().to_string(),
            ),
            other => panic!("expected Json error, got {:?}", other),
        }
    }

    async fn login(router: &ServerRouter, auth_id: &str) -> AccessUser {
        router
            .resolve(RouteRequest::new(AUTH_REQUEST_PATH).with_body(json!({ "authId": auth_id })))
            .await;

        match router
            .resolve(
                RouteRequest::new(AUTH_CALLBACK_PATH)
                    .with_query(callback_query(STUB_TOKEN, STUB_VERIFIER)),
            )
            .await
        {
            RouterResult::Login(user) => user,
            other => panic!("expected Login, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unrecognized_paths_yield_next() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        for pathname in ["/", "/index.html", "/api/unknown", "/api/tweet/", "/API/TWEET"] {
            let request = RouteRequest::new(pathname)
                .with_body(json!({ "authId": "abc", "text": "hello" }))
                .with_query(callback_query("T", "v"));
            assert_eq!(router.resolve(request).await, RouterResult::Next);
        }
    }

    #[actix_web::test]
    async fn test_auth_request_redirects() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        let result = router
            .resolve(RouteRequest::new(AUTH_REQUEST_PATH).with_body(json!({ "authId": "abc" })))
            .await;

        assert_eq!(
            result,
            RouterResult::Redirect(
                "/api/twitter-auth-callback?oauth_token=my_token&oauth_verifier=my_verifier"
                    .to_string()
            )
        );
    }

    #[actix_web::test]
    async fn test_auth_request_without_auth_id_is_validation_error() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        for body in [Value::Null, json!({}), json!({ "authId": "" }), json!({ "authId": 42 })] {
            let result = router
                .resolve(RouteRequest::new(AUTH_REQUEST_PATH).with_body(body))
                .await;
            assert_eq!(
                error_code(&result),
                (StatusCode::BAD_REQUEST, "validation_error".to_string())
            );
        }
    }

    #[actix_web::test]
    async fn test_callback_logs_in_with_public_identity() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        let user = login(&router, "abc").await;

        assert_eq!(user.display_name, "solotter");
        assert!(!user.access_token.is_empty());
        assert_ne!(user.access_token, "stub_access_token");
    }

    #[actix_web::test]
    async fn test_callback_replay_is_invalid_flow() {
        let router = router_with(Arc::new(RecordingTwitter::default()));
        login(&router, "abc").await;

        let result = router
            .resolve(
                RouteRequest::new(AUTH_CALLBACK_PATH)
                    .with_query(callback_query(STUB_TOKEN, STUB_VERIFIER)),
            )
            .await;

        assert_eq!(
            error_code(&result),
            (StatusCode::BAD_REQUEST, "invalid_flow".to_string())
        );
    }

    #[actix_web::test]
    async fn test_callback_without_verifier_is_validation_error() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        let query = HashMap::from([("oauth_token".to_string(), STUB_TOKEN.to_string())]);
        let result = router
            .resolve(RouteRequest::new(AUTH_CALLBACK_PATH).with_query(query))
            .await;

        assert_eq!(
            error_code(&result),
            (StatusCode::BAD_REQUEST, "validation_error".to_string())
        );
    }

    #[actix_web::test]
    async fn test_callback_denied_is_invalid_flow() {
        let router = router_with(Arc::new(RecordingTwitter::default()));

        let query = HashMap::from([("denied".to_string(), STUB_TOKEN.to_string())]);
        let result = router
            .resolve(RouteRequest::new(AUTH_CALLBACK_PATH).with_query(query))
            .await;

        assert_eq!(
            error_code(&result),
            (StatusCode::BAD_REQUEST, "invalid_flow".to_string())
        );
    }

    #[actix_web::test]
    async fn test_callback_before_credential_is_ready_is_pending() {
        let router = ServerRouter::new(
            Arc::new(PendingOAuth),
            Arc::new(RecordingTwitter::default()),
        );

        let result = router
            .resolve(RouteRequest::new(AUTH_CALLBACK_PATH).with_query(callback_query("T", "v")))
            .await;

        assert_eq!(
            result,
            RouterResult::Json(JsonPayload::new(
                StatusCode::ACCEPTED,
                json!({ "status": "pending" })
            ))
        );
    }

    #[actix_web::test]
    async fn test_tweet_without_session_never_reaches_twitter() {
        let twitter = Arc::new(RecordingTwitter::default());
        let router = router_with(twitter.clone());

        let anonymous = router
            .resolve(RouteRequest::new(TWEET_PATH).with_body(json!({ "text": "hello" })))
            .await;
        let unknown_handle = router
            .resolve(
                RouteRequest::new(TWEET_PATH)
                    .with_body(json!({ "text": "hello" }))
                    .with_user(Some(AccessUser::new("forged", "someone"))),
            )
            .await;

        for result in [anonymous, unknown_handle] {
            assert_eq!(
                error_code(&result),
                (StatusCode::UNAUTHORIZED, "unauthenticated".to_string())
            );
        }
        assert!(twitter.posted().is_empty());
    }

    #[actix_web::test]
    async fn test_tweet_posts_with_server_side_credential() {
        let twitter = Arc::new(RecordingTwitter::default());
        let router = router_with(twitter.clone());
        let user = login(&router, "abc").await;

        let result = router
            .resolve(
                RouteRequest::new(TWEET_PATH)
                    .with_body(json!({ "text": "hello", "inReplyTo": "42" }))
                    .with_user(Some(user)),
            )
            .await;

        assert_eq!(
            result,
            RouterResult::Json(JsonPayload::ok(json!({ "id": "1050118621198921728" })))
        );

        let posted = twitter.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "stub_access_token");
        assert_eq!(posted[0].1.status, "hello");
        assert_eq!(posted[0].1.in_reply_to_status_id.as_deref(), Some("42"));
    }

    #[actix_web::test]
    async fn test_tweet_text_is_validated() {
        let twitter = Arc::new(RecordingTwitter::default());
        let router = router_with(twitter.clone());
        let user = login(&router, "abc").await;

        for body in [
            json!({}),
            json!({ "text": "" }),
            json!({ "text": "   " }),
            json!({ "text": "a".repeat(281) }),
        ] {
            let result = router
                .resolve(
                    RouteRequest::new(TWEET_PATH)
                        .with_body(body)
                        .with_user(Some(user.clone())),
                )
                .await;
            assert_eq!(
                error_code(&result),
                (StatusCode::BAD_REQUEST, "validation_error".to_string())
            );
        }
        assert!(twitter.posted().is_empty());
    }

    #[actix_web::test]
    async fn test_tweet_text_is_trimmed_before_posting() {
        let twitter = Arc::new(RecordingTwitter::default());
        let router = router_with(twitter.clone());
        let user = login(&router, "abc").await;

        let padded_max = format!("  {}\n", "a".repeat(MAX_TWEET_LENGTH as usize));
        for text in ["  hello \n", padded_max.as_str()] {
            let result = router
                .resolve(
                    RouteRequest::new(TWEET_PATH)
                        .with_body(json!({ "text": text }))
                        .with_user(Some(user.clone())),
                )
                .await;
            assert_eq!(
                result,
                RouterResult::Json(JsonPayload::ok(json!({ "id": "1050118621198921728" })))
            );
        }

        let posted = twitter.posted();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0].1.status, "hello");
        assert_eq!(posted[1].1.status, "a".repeat(MAX_TWEET_LENGTH as usize));
    }

    #[actix_web::test]
    async fn test_expired_request_token_is_invalid_flow() {
        let oauth = Arc::new(StubOAuthService::new(TokenStore::new(
            chrono::Duration::zero(),
            chrono::Duration::hours(24),
        )));
        let router = ServerRouter::new(oauth, Arc::new(RecordingTwitter::default()));

        router
            .resolve(RouteRequest::new(AUTH_REQUEST_PATH).with_body(json!({ "authId": "abc" })))
            .await;
        let result = router
            .resolve(
                RouteRequest::new(AUTH_CALLBACK_PATH)
                    .with_query(callback_query(STUB_TOKEN, STUB_VERIFIER)),
            )
            .await;

        assert_eq!(
            error_code(&result),
            (StatusCode::BAD_REQUEST, "invalid_flow".to_string())
        );
    }

    #[actix_web::test]
    async fn test_upstream_failure_becomes_bad_gateway() {
        let router = router_with(Arc::new(RecordingTwitter::failing()));
        let user = login(&router, "abc").await;

        let result = router
            .resolve(
                RouteRequest::new(TWEET_PATH)
                    .with_body(json!({ "text": "hello" }))
                    .with_user(Some(user)),
            )
            .await;

        assert_eq!(
            error_code(&result),
            (StatusCode::BAD_GATEWAY, "upstream_error".to_string())
        );
    }

    #[test]
    fn test_callback_params_from_query() {
        let params = callback_params(&callback_query("T", "v")).unwrap();
        assert_eq!(params.oauth_token, "T");
        assert_eq!(params.oauth_verifier, "v");
        assert!(params.denied.is_none());

        let denied = HashMap::from([("denied".to_string(), "T".to_string())]);
        let params = callback_params(&denied).unwrap();
        assert_eq!(params.denied.as_deref(), Some("T"));
    }
}
