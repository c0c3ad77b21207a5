//! 실행 환경과 데이터 계층 관련 설정
//!
//! 환경 변수 기반으로 서버 바인딩, 실행 프로파일, 비밀번호 해싱 강도를
//! 관리합니다.

use std::env;

/// 실행 환경 구분
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로부터 현재 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 개발 환경으로 간주합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|s| Self::from_str(&s))
            .unwrap_or(Environment::Development)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" => Environment::Staging,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }
}

/// 비밀번호 해싱 설정
///
/// bcrypt cost 는 보안 강도와 응답 시간 사이의 트레이드오프입니다.
/// 개발 환경에서는 낮게, 운영 환경에서는 높게 설정합니다.
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 적용할 bcrypt cost 를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경 변수가 있으면 그 값을 우선하며,
    /// 유효 범위(4~15)를 벗어나면 환경별 기본값으로 대체합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 환경별 기본 bcrypt cost
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 6,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트 (기본값: 8080)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 (기본값: 127.0.0.1)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("prod"), Environment::Production);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("unknown"), Environment::Development);
    }

    #[test]
    fn test_bcrypt_cost_for_env() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 6);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
        assert!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging) < 12);
    }
}
