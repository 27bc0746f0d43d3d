//! 라우터 결과 모델
//!
//! 라우터가 해석한 요청마다 정확히 하나의 변형을 돌려줍니다.
//! HTTP 어댑터는 와일드카드 없이 모든 변형을 `match`로 처리합니다.

use actix_web::http::StatusCode;
use serde_json::Value;

use crate::domain::models::access_user::AccessUser;

/// 상태 코드가 붙은 JSON 응답 본문
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonPayload {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// 라우터 결과
#[derive(Debug, Clone, PartialEq)]
pub enum RouterResult {
    /// JSON 응답 (성공 페이로드 또는 에러 페이로드)
    Json(JsonPayload),
    /// 로그인 완료: 세션에 사용자 정보를 저장하고 `/`로 리다이렉트
    Login(AccessUser),
    /// 지정된 URL로 302 리다이렉트
    Redirect(String),
    /// 처리하지 않음: 정적 파일 또는 404로 넘김
    Next,
    /// 본문 없는 200 응답
    Ack,
}
