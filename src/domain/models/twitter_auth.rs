//! Twitter 자격 증명 모델
//!
//! 사용자 인가가 끝난 뒤 얻는 완전한 OAuth 1.0a 자격 증명입니다.
//! 서버 메모리에만 존재하며 쿠키나 응답 본문으로 직렬화되지 않습니다.

use std::fmt;

/// 애플리케이션(관리자) OAuth 앱의 consumer 자격 증명
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    pub key: String,
    pub secret: String,
}

impl ConsumerCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for ConsumerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// 사용자 한 명의 완전한 Twitter 자격 증명
///
/// consumer key/secret(앱)과 access token/secret(사용자)을 모두 포함하므로
/// REST 호출 서명에 그대로 사용할 수 있습니다.
#[derive(Clone, PartialEq, Eq)]
pub struct TwitterAuth {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
    /// access token 교환 응답의 `user_id`
    pub user_id: Option<String>,
    /// access token 교환 응답의 `screen_name`
    pub screen_name: Option<String>,
}

impl TwitterAuth {
    /// consumer 자격 증명과 사용자 토큰을 결합합니다.
    pub fn from_consumer(
        consumer: &ConsumerCredentials,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer.key.clone(),
            consumer_secret: consumer.secret.clone(),
            token: token.into(),
            token_secret: token_secret.into(),
            user_id: None,
            screen_name: None,
        }
    }

    pub fn with_identity(mut self, user_id: Option<String>, screen_name: Option<String>) -> Self {
        self.user_id = user_id;
        self.screen_name = screen_name;
        self
    }

    /// 세션에 노출해도 안전한 표시 이름
    pub fn display_name(&self) -> &str {
        self.screen_name.as_deref().unwrap_or("twitter-user")
    }
}

impl fmt::Debug for TwitterAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterAuth")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("screen_name", &self.screen_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_secrets() {
        let consumer = ConsumerCredentials::new("ck", "consumer-secret-value");
        let auth = TwitterAuth::from_consumer(&consumer, "user-token-value", "user-secret-value")
            .with_identity(Some("42".to_string()), Some("vain0x".to_string()));

        let debug = format!("{:?}", auth);
        assert!(debug.contains("vain0x"));
        assert!(!debug.contains("consumer-secret-value"));
        assert!(!debug.contains("user-token-value"));
        assert!(!debug.contains("user-secret-value"));
    }

    #[test]
    fn test_display_name_falls_back_without_screen_name() {
        let consumer = ConsumerCredentials::new("ck", "cs");
        let auth = TwitterAuth::from_consumer(&consumer, "t", "ts");

        assert_eq!(auth.display_name(), "twitter-user");
    }
}
