//! # OAuth 1.0a 요청 서명
//!
//! RFC 5849의 HMAC-SHA1 서명 방식으로 `Authorization: OAuth ...` 헤더를 만듭니다.
//!
//! ```text
//! base string = METHOD & enc(base_url) & enc(sorted(enc(k)=enc(v) ...))
//! signing key = enc(consumer_secret) & enc(token_secret)
//! signature   = base64(HMAC-SHA1(signing key, base string))
//! ```
//!
//! 퍼센트 인코딩은 RFC 3986 비예약 문자(`A-Z a-z 0-9 - . _ ~`)만 그대로 둡니다.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::twitter_auth::{ConsumerCredentials, TwitterAuth};

type HmacSha1 = Hmac<Sha1>;

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// 요청 하나를 서명하는 데 필요한 자격 증명
#[derive(Debug, Clone)]
pub struct OAuthSigner<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<&'a str>,
    token_secret: &'a str,
}

impl<'a> OAuthSigner<'a> {
    /// 사용자 토큰 없이 consumer 자격 증명만으로 서명합니다 (요청 토큰 발급 단계).
    pub fn consumer(consumer: &'a ConsumerCredentials) -> Self {
        Self {
            consumer_key: &consumer.key,
            consumer_secret: &consumer.secret,
            token: None,
            token_secret: "",
        }
    }

    /// 요청 토큰(또는 access token)과 그 secret을 추가합니다.
    pub fn with_token(mut self, token: &'a str, token_secret: &'a str) -> Self {
        self.token = Some(token);
        self.token_secret = token_secret;
        self
    }

    /// 완전한 사용자 자격 증명으로 서명합니다 (REST API 호출).
    pub fn from_auth(auth: &'a TwitterAuth) -> Self {
        Self {
            consumer_key: &auth.consumer_key,
            consumer_secret: &auth.consumer_secret,
            token: Some(&auth.token),
            token_secret: &auth.token_secret,
        }
    }

    /// 새 nonce와 현재 시각으로 `Authorization` 헤더 값을 만듭니다.
    ///
    /// * `url` - 쿼리 문자열을 제외한 요청 URL
    /// * `params` - 쿼리 및 form 본문 파라미터 (서명 대상)
    /// * `oauth_extra` - `oauth_callback`, `oauth_verifier` 같은 추가 프로토콜 파라미터
    pub fn authorize(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_extra: &[(&str, &str)],
    ) -> AppResult<String> {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp().to_string();
        self.authorize_with(method, url, params, oauth_extra, &nonce, &timestamp)
    }

    /// nonce와 timestamp를 지정해 `Authorization` 헤더 값을 만듭니다.
    pub fn authorize_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_extra: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> AppResult<String> {
        let mut oauth_params: Vec<(String, String)> = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.to_string()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        if let Some(token) = self.token {
            oauth_params.push(("oauth_token".to_string(), token.to_string()));
        }
        for (key, value) in oauth_extra {
            oauth_params.push((key.to_string(), value.to_string()));
        }

        let base_string = signature_base_string(
            method,
            url,
            params.iter().chain(oauth_params.iter()),
        );
        let signature = self.sign(&base_string)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", fields))
    }

    fn sign(&self, base_string: &str) -> AppResult<String> {
        let key = format!("{}&{}", encode(self.consumer_secret), encode(self.token_secret));
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| AppError::InternalError(format!("HMAC 초기화 실패: {}", e)))?;
        mac.update(base_string.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

fn signature_base_string<'p>(
    method: &str,
    url: &str,
    params: impl Iterator<Item = &'p (String, String)>,
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&parameter_string)
    )
}
