//! # HTTP 어댑터
//!
//! actix-web 요청을 [`RouteRequest`]로 바꾸어 라우터에 넘기고,
//! [`RouterResult`]의 모든 변형을 HTTP 응답으로 변환합니다.
//!
//! | RouterResult | HTTP 응답 |
//! |--------------|-----------|
//! | `Ack` | 200, 본문 없음 |
//! | `Json(payload)` | `payload.status` + JSON 본문 |
//! | `Login(user)` | 세션 쿠키 설정 + 302 `Location: /` |
//! | `Redirect(url)` | 302 `Location: url` |
//! | `Next` | `DIST_DIR/public`의 정적 파일, 없으면 404 |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use actix_files::NamedFile;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::access_user::AccessUser;
use crate::domain::models::router_result::RouterResult;
use crate::handlers::session::SessionKeys;
use crate::routes::router::{RouteRequest, ServerRouter};
use crate::utils::string_utils::{parse_auth_header, parse_form_encoded};

/// 요청 처리에 필요한 공유 상태
pub struct AppState {
    pub router: ServerRouter,
    pub sessions: SessionKeys,
    pub public_dir: PathBuf,
}

/// 모든 경로를 처리하는 default service 핸들러
pub async fn serve_route(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let route_request = RouteRequest {
        pathname: req.path().to_string(),
        body: decode_body(&req, &body)?,
        query: decode_query(req.query_string()),
        access_user: access_user(&req, &state.sessions),
    };

    let result = state.router.resolve(route_request).await;
    respond(result, &req, &state).await
}

/// 세션 쿠키의 사용자. 쿠키가 없으면 `Authorization: Bearer <세션 핸들>`을 사용합니다.
fn access_user(req: &HttpRequest, sessions: &SessionKeys) -> Option<AccessUser> {
    sessions.read(req).or_else(|| {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        parse_auth_header(header).map(|token| AccessUser::new(token, ""))
    })
}

/// 요청 본문을 `Content-Type`에 따라 JSON 값으로 해석합니다.
///
/// - `application/json` → JSON 값 (비어 있으면 `null`)
/// - `application/x-www-form-urlencoded` → 문자열 값을 가진 JSON 객체
/// - 그 외 → `null`
pub fn decode_body(req: &HttpRequest, body: &[u8]) -> AppResult<Value> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if body.is_empty() {
        return Ok(Value::Null);
    }

    if content_type.starts_with("application/json") {
        return serde_json::from_slice(body)
            .map_err(|e| AppError::ValidationError(format!("잘못된 JSON 본문: {}", e)));
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let text = std::str::from_utf8(body)
            .map_err(|_| AppError::ValidationError("form 본문이 UTF-8이 아닙니다".to_string()))?;
        let object: Map<String, Value> = parse_form_encoded(text)
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        return Ok(Value::Object(object));
    }

    Ok(Value::Null)
}

/// 쿼리 문자열을 해석합니다. 잘못된 쿼리는 빈 맵으로 취급합니다.
pub fn decode_query(query_string: &str) -> HashMap<String, String> {
    web::Query::<HashMap<String, String>>::from_query(query_string)
        .map(|query| query.into_inner())
        .unwrap_or_default()
}

/// 라우터 결과를 HTTP 응답으로 변환합니다.
pub async fn respond(
    result: RouterResult,
    req: &HttpRequest,
    state: &AppState,
) -> Result<HttpResponse, AppError> {
    match result {
        RouterResult::Ack => Ok(HttpResponse::Ok().finish()),
        RouterResult::Json(payload) => Ok(HttpResponse::build(payload.status).json(payload.body)),
        RouterResult::Login(user) => {
            let cookie = state.sessions.login_cookie(&user)?;
            Ok(HttpResponse::Found()
                .cookie(cookie)
                .insert_header((LOCATION, "/"))
                .finish())
        }
        RouterResult::Redirect(url) => Ok(HttpResponse::Found()
            .insert_header((LOCATION, url))
            .finish()),
        RouterResult::Next => Ok(serve_static(req, &state.public_dir).await),
    }
}

/// 정적 파일을 제공합니다. 없으면 404 JSON.
pub async fn serve_static(req: &HttpRequest, public_dir: &Path) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return not_found();
    }

    let Some(path) = resolve_static_path(public_dir, req.path()) else {
        return not_found();
    };

    match NamedFile::open_async(&path).await {
        Ok(file) => file.into_response(req),
        Err(e) => {
            log::warn!("정적 파일 열기 실패 {}: {}", path.display(), e);
            not_found()
        }
    }
}

/// 요청 경로를 `public_dir` 아래의 파일 경로로 변환합니다.
///
/// `..` 세그먼트가 있으면 거부하고, 디렉터리는 `index.html`로 대응합니다.
fn resolve_static_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;

    let mut path = public_dir.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment if segment.contains('\\') || segment.contains('\0') => return None,
            segment => path.push(segment),
        }
    }

    if path.is_dir() {
        path.push("index.html");
    }

    path.is_file().then_some(path)
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "not_found",
        "message": "요청한 리소스를 찾을 수 없습니다",
    }))
}
