//! 서버 및 실행 환경 설정 관리 모듈
//!
//! 서버 바인딩, 정적 파일 경로, 실행 환경 관련 설정을 관리합니다.

use std::env;
use std::path::PathBuf;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 프론트엔드 개발 서버와 함께 3000번 포트 사용
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(
            &env::var("ENVIRONMENT")
                .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string())),
        )
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 서버 바인딩 및 정적 파일 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: 커스텀 포트 설정
    ///
    /// 설정되지 않았거나 숫자가 아니면 실행 환경별 기본값을 사용합니다.
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or_else(|| Self::default_port_for_env(&Environment::current()))
    }

    /// 실행 환경별 기본 포트
    ///
    /// - Development: 3000
    /// - 그 외: 8080
    pub fn default_port_for_env(env: &Environment) -> u16 {
        match env {
            Environment::Development => 3000,
            _ => 8080,
        }
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// 기본값: "127.0.0.1"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// 빌드된 프론트엔드 산출물 디렉터리 (`DIST_DIR`, 기본값 `./dist`)
    pub fn dist_dir() -> PathBuf {
        PathBuf::from(env::var("DIST_DIR").unwrap_or_else(|_| "./dist".to_string()))
    }

    /// 정적 파일 루트 (`DIST_DIR/public`)
    pub fn public_dir() -> PathBuf {
        Self::dist_dir().join("public")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_default_port_for_each_environment() {
        assert_eq!(
            ServerConfig::default_port_for_env(&Environment::Development),
            3000
        );
        assert_eq!(ServerConfig::default_port_for_env(&Environment::Test), 8080);
        assert_eq!(
            ServerConfig::default_port_for_env(&Environment::Production),
            8080
        );
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }

        if env::var("DIST_DIR").is_err() {
            assert_eq!(ServerConfig::public_dir(), PathBuf::from("./dist/public"));
        }
    }
}
