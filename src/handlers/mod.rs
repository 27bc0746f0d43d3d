//! # HTTP Request Handlers Module
//!
//! actix-web과 라우터 사이의 어댑터 계층입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser (Solotter front-end)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response, 세션 쿠키
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - 본문/쿼리/쿠키 해석, 응답 작성   ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Routes::ServerRouter - 경로별 처리               ← Routing
//! ├─────────────────────────────────────────────┤
//!   Services - OAuth 흐름, Twitter REST             ← Service Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`serve`**: default service 핸들러, `RouterResult` → HTTP 응답 변환, 정적 파일
//! - **`session`**: 서명된 세션 쿠키 읽기/쓰기
//!
//! ## 설정 예제
//!
//! ```rust,ignore
//! use actix_web::{web, App, HttpServer};
//! use solotter_web::handlers::serve::{serve_route, AppState};
//!
//! let state = web::Data::new(state);
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(state.clone())
//!         .configure(configure_all_routes)
//!         .default_service(web::to(serve_route))
//! })
//! ```

pub mod serve;
pub mod session;

pub use serve::{serve_route, AppState};
pub use session::SessionKeys;
