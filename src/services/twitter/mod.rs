//! # Twitter REST API
//!
//! 서명된 두 가지 호출만 제공합니다.
//!
//! - `GET /statuses/show.json` - 트윗 하나 조회
//! - `POST /statuses/update.json` - 트윗 작성 (`trim_user=true`)
//!
//! 호출자는 완전한 자격 증명([`TwitterAuth`])을 넘겨야 하며, 클라이언트는
//! 자격 증명을 직접 해석하지 않습니다. 네트워크 오류나 2xx가 아닌 응답은
//! 재시도 없이 `UpstreamError`로 전파됩니다.

pub mod rest_client;

pub use rest_client::TwitterRestClient;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION};
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::requests::PostTweet;
use crate::domain::dto::responses::TweetCreated;
use crate::domain::models::twitter_auth::TwitterAuth;

/// 모든 Twitter 요청에 붙는 `User-Agent`
pub const USER_AGENT: &str = "solotter-web";

/// Twitter 호출용 HTTP 클라이언트
///
/// `Accept: */*`, `Connection: close` 헤더와 고정 `User-Agent`를 기본으로 사용합니다.
pub fn http_client() -> AppResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))
}

/// Twitter REST API 계약
#[async_trait]
pub trait TwitterApi: Send + Sync {
    /// 트윗 하나를 조회합니다.
    async fn get_status(&self, auth: &TwitterAuth, id: &str) -> AppResult<Value>;

    /// 트윗을 작성합니다.
    async fn post_tweet(&self, auth: &TwitterAuth, tweet: &PostTweet) -> AppResult<TweetCreated>;
}
