//! reqwest 기반 Twitter REST 클라이언트

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::requests::PostTweet;
use crate::domain::dto::responses::TweetCreated;
use crate::domain::models::twitter_auth::TwitterAuth;
use crate::services::oauth::signer::OAuthSigner;
use crate::services::twitter::{http_client, TwitterApi};

pub struct TwitterRestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TwitterRestClient {
    /// * `base_url` - 예: `https://api.twitter.com/1.1`
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "{} 실패 (HTTP {}): {}",
                path, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 응답 파싱 실패: {}", path, e)))
    }
}

#[async_trait]
impl TwitterApi for TwitterRestClient {
    async fn get_status(&self, auth: &TwitterAuth, id: &str) -> AppResult<Value> {
        let path = "statuses/show";
        let url = self.endpoint(path);
        let params = vec![("id".to_string(), id.to_string())];
        let authorization = OAuthSigner::from_auth(auth).authorize("GET", &url, &params, &[])?;

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 요청 실패: {}", path, e)))?;

        Self::read_json(response, path).await
    }

    async fn post_tweet(&self, auth: &TwitterAuth, tweet: &PostTweet) -> AppResult<TweetCreated> {
        let path = "statuses/update";
        let url = self.endpoint(path);
        let params = tweet.form_params();
        let authorization = OAuthSigner::from_auth(auth).authorize("POST", &url, &params, &[])?;

        let response = self
            .client
            .post(&url)
            .form(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 요청 실패: {}", path, e)))?;

        let created: TweetCreated = Self::read_json(response, path).await?;
        log::info!("트윗 작성 완료: id={}", created.id_str);
        Ok(created)
    }
}
