//! 응답 DTO
//!
//! OAuth 서비스가 라우터에 돌려주는 값과 Twitter API 응답을 매핑합니다.

use serde::{Deserialize, Serialize};

/// `oauth_request` 결과: 클라이언트가 이동해야 할 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthRedirect {
    pub redirect: String,
}

/// `POST /statuses/update` 응답 중 필요한 필드
///
/// 숫자 ID는 JavaScript 정밀도를 넘으므로 `id_str`만 사용합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetCreated {
    pub id_str: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// `POST /api/tweet` 성공 응답
#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub id: String,
}
