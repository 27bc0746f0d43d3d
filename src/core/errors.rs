//! # Application Error Handling System
//!
//! Solotter 서버 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
//! HTTP 응답으로 자동 변환됩니다.
//!
//! ## 에러 분류
//!
//! | AppError | HTTP Status | 에러 코드 | 사용 시나리오 |
//! |----------|-------------|-----------|---------------|
//! | `UpstreamError` | 502 Bad Gateway | `upstream_error` | Twitter 엔드포인트 실패 (네트워크/API) |
//! | `InvalidFlowError` | 400 Bad Request | `invalid_flow` | 알 수 없거나 재사용/만료된 OAuth 토큰 |
//! | `UnauthenticatedError` | 401 Unauthorized | `unauthenticated` | 세션 없이 트윗 시도 |
//! | `ValidationError` | 400 Bad Request | `validation_error` | `authId`, `text` 등 입력값 오류 |
//! | `ConfigError` | 500 Internal Server Error | `internal_error` | 필수 환경 변수 누락 |
//! | `InternalError` | 500 Internal Server Error | `internal_error` | 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! 모든 에러는 동일한 JSON 형식으로 응답됩니다. 5xx 에러는 내부 메시지를
//! 클라이언트에 노출하지 않습니다.
//!
//! ```json
//! { "error": "invalid_flow", "message": "Invalid flow: 유효하지 않은 인증 흐름입니다" }
//! ```
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! fn find_secret(token: &str) -> AppResult<String> {
//!     store.take(token)
//!         .ok_or_else(|| AppError::InvalidFlowError("유효하지 않은 인증 흐름입니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::domain::models::router_result::JsonPayload;

/// 애플리케이션 전역 에러 타입
///
/// 서비스 계층과 Twitter 클라이언트는 에러를 삼키지 않고 그대로 전파하며,
/// 라우터가 이를 [`JsonPayload`]로 변환합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// Twitter 엔드포인트 실패 (502 Bad Gateway)
    ///
    /// 네트워크 오류, 2xx가 아닌 응답, 해석할 수 없는 응답 본문을 모두 포함합니다.
    /// Twitter 토큰 엔드포인트는 안전하게 재시도할 수 없으므로 재시도하지 않습니다.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// 알 수 없거나 이미 소비된 OAuth 토큰 (400 Bad Request)
    #[error("Invalid flow: {0}")]
    InvalidFlowError(String),

    /// 세션 없이 인증이 필요한 작업을 시도함 (401 Unauthorized)
    #[error("Unauthenticated: {0}")]
    UnauthenticatedError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필수 설정 누락 또는 잘못된 설정 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidFlowError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 클라이언트가 분기 처리에 사용하는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UpstreamError(_) => "upstream_error",
            AppError::InvalidFlowError(_) => "invalid_flow",
            AppError::UnauthenticatedError(_) => "unauthenticated",
            AppError::ValidationError(_) => "validation_error",
            AppError::ConfigError(_) | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 라우터가 반환하는 JSON 에러 페이로드로 변환합니다.
    ///
    /// 500 계열 에러는 상세 메시지 대신 고정 문구를 사용합니다.
    pub fn to_payload(&self) -> JsonPayload {
        let status = self.status();
        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            "서버 내부 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        };

        JsonPayload::new(
            status,
            json!({
                "error": self.code(),
                "message": message,
            }),
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 라우터의 에러 페이로드와 동일한 매핑을 사용하므로,
    /// 어댑터 단계에서 발생한 에러(잘못된 JSON 본문 등)도 같은 형식으로 응답됩니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let payload = self.to_payload();
        actix_web::HttpResponse::build(payload.status).json(payload.body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
