use serde::{Deserialize, Serialize};

/// 세션 쿠키에 담기는 로그인 사용자의 공개 정보
///
/// `access_token`은 Twitter 토큰이 아니라 서버가 발급한 불투명한 세션 핸들입니다.
/// 실제 자격 증명은 OAuth 서비스의 서버 측 저장소에서 이 핸들로 조회합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessUser {
    pub access_token: String,
    pub display_name: String,
}

impl AccessUser {
    pub fn new(access_token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            display_name: display_name.into(),
        }
    }
}
