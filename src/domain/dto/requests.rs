//! 요청 DTO
//!
//! 브라우저가 보내는 본문/쿼리와 Twitter REST 호출 파라미터를 매핑합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed_string};

/// 트윗 본문의 최대 길이 (문자 수)
pub const MAX_TWEET_LENGTH: u64 = 280;

/// `authId`의 최대 길이
pub const MAX_AUTH_ID_LENGTH: u64 = 128;

/// `POST /api/twitter-auth-request` 본문
#[derive(Debug, Deserialize, Validate)]
pub struct TwitterAuthRequest {
    #[serde(rename = "authId", default)]
    #[validate(length(min = 1, max = MAX_AUTH_ID_LENGTH, message = "authId는 1-128자여야 합니다"))]
    pub auth_id: String,
}

/// `GET /api/twitter-auth-callback` 쿼리 파라미터
///
/// 사용자가 인가를 거부하면 Twitter는 `oauth_verifier` 없이 `denied`만 전달합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OAuthCallbackParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "oauth_token이 필요합니다"))]
    pub oauth_token: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "oauth_verifier가 필요합니다"))]
    pub oauth_verifier: String,

    pub denied: Option<String>,
}

impl OAuthCallbackParams {
    pub fn new(oauth_token: impl Into<String>, oauth_verifier: impl Into<String>) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            oauth_verifier: oauth_verifier.into(),
            denied: None,
        }
    }
}

/// `POST /api/tweet` 본문
#[derive(Debug, Deserialize, Validate)]
pub struct TweetRequest {
    /// 앞뒤 공백을 제거한 본문. 길이 검증도 제거 후 기준입니다.
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, max = MAX_TWEET_LENGTH, message = "트윗은 1-280자여야 합니다"))]
    pub text: String,

    #[serde(rename = "inReplyTo", default, deserialize_with = "deserialize_optional_string")]
    pub in_reply_to: Option<String>,
}

/// `POST /statuses/update` 파라미터
#[derive(Debug, Clone, Serialize)]
pub struct PostTweet {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<String>,
}

impl PostTweet {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            in_reply_to_status_id: None,
        }
    }

    pub fn in_reply_to(mut self, status_id: Option<String>) -> Self {
        self.in_reply_to_status_id = status_id;
        self
    }

    /// 서명과 form 본문에 함께 쓰는 파라미터 목록
    ///
    /// 응답에 사용자 객체를 포함하지 않도록 `trim_user=true`를 항상 붙입니다.
    pub fn form_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("status".to_string(), self.status.clone())];
        if let Some(id) = &self.in_reply_to_status_id {
            params.push(("in_reply_to_status_id".to_string(), id.clone()));
        }
        params.push(("trim_user".to_string(), "true".to_string()));
        params
    }
}
