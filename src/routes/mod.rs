//! API 라우트 설정 모듈
//!
//! Solotter의 API 경로는 actix-web 라우트 테이블이 아니라 [`router::ServerRouter`]가
//! 해석합니다. actix-web에는 헬스체크만 등록하고, 나머지 요청은 모두
//! `handlers::serve::serve_route` (default service)로 넘어갑니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .configure(configure_all_routes)
//!     .default_service(web::to(handlers::serve::serve_route));
//! ```

pub mod router;

pub use router::{RouteRequest, ServerRouter};

use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}

/// 헬스체크 엔드포인트
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "solotter_web",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
