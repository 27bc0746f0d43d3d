//! Solotter 서버 메인 애플리케이션
//!
//! 설정을 읽어 OAuth 서비스와 Twitter 클라이언트를 조립하고 Actix-web 서버를 구동합니다.
//! 필수 설정이 없으면 에러를 기록하고 시작을 중단합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use solotter_web::config::{
    Environment, ServerConfig, SessionConfig, TwitterConfig, TwitterEndpoints, TwitterOAuthConfig,
};
use solotter_web::core::errors::AppResult;
use solotter_web::handlers::{serve_route, AppState, SessionKeys};
use solotter_web::routes::{configure_all_routes, ServerRouter};
use solotter_web::services::oauth::{OAuthService, StubOAuthService, TokenStore, TwitterOAuthService};
use solotter_web::services::twitter::TwitterRestClient;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 Solotter 서버 시작중... (환경: {:?})", Environment::current());

    let state = build_state().map_err(|e| {
        error!("서버 초기화 실패: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("📁 정적 파일 경로: {}", state.public_dir.display());

    start_http_server(web::Data::new(state)).await
}

/// 설정에서 OAuth 서비스, Twitter 클라이언트, 세션 키를 조립합니다
///
/// `TWITTER_OAUTH_STUB`이 켜져 있으면 Twitter 앱 설정 없이 스텁 서비스를 사용합니다.
fn build_state() -> AppResult<AppState> {
    let store = TokenStore::with_ttl_minutes(
        TwitterOAuthConfig::flow_ttl_minutes(),
        SessionConfig::MAX_AGE_HOURS,
    );

    let (oauth, api_base_url): (Arc<dyn OAuthService>, String) = if TwitterOAuthConfig::use_stub() {
        warn!("⚠️ 스텁 OAuth 서비스를 사용합니다. Twitter에 연결하지 않습니다");
        (
            Arc::new(StubOAuthService::new(store)),
            TwitterEndpoints::default().api_base_url,
        )
    } else {
        let config = TwitterConfig::from_env()?;
        let api_base_url = config.endpoints.api_base_url.clone();
        (Arc::new(TwitterOAuthService::new(config, store)?), api_base_url)
    };

    let twitter = Arc::new(TwitterRestClient::new(api_base_url)?);

    Ok(AppState {
        router: ServerRouter::new(oauth, twitter),
        sessions: SessionKeys::from_env()?,
        public_dir: ServerConfig::public_dir(),
    })
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 헬스체크 이외의 모든 요청은 `serve_route`로 전달됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 올바르지 않습니다")
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
            .default_service(web::to(serve_route))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로 출력
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 개발 서버(3000)와 자체 서버(8080)를 허용하며, 세션 쿠키를 위해
/// 자격 증명 전송을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 10)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 30)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 10 사용", e);
            10
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "30".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 30 사용", e);
            30
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
