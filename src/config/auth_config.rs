//! # 인증 관련 설정 모듈
//!
//! 카카오 OAuth, JWT 토큰, OAuth state 보안 설정을 관리합니다.
//! 민감한 값은 환경 변수로만 공급되며, 개발 편의를 위한 기본값은
//! 엔드포인트 URI 처럼 공개되어도 무방한 값에만 제공됩니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # 카카오 디벨로퍼 콘솔에서 발급
//! export KAKAO_CLIENT_ID="your-rest-api-key"
//! export KAKAO_CLIENT_SECRET="your-client-secret"
//! export KAKAO_REDIRECT_URI="http://localhost:8080/api/v1/auth/kakao/callback"
//!
//! # JWT 서명 키와 수명
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="14"
//!
//! # OAuth state 서명용 시크릿
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! ```

use std::env;

/// 카카오 OAuth 2.0 설정
///
/// 카카오 디벨로퍼 콘솔에서 발급받은 클라이언트 정보와
/// 카카오 API 엔드포인트 URI 를 관리합니다.
pub struct KakaoOAuthConfig;

impl KakaoOAuthConfig {
    /// 카카오 REST API 키 (Client ID)
    ///
    /// # Panics
    ///
    /// `KAKAO_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("KAKAO_CLIENT_ID")
            .expect("KAKAO_CLIENT_ID must be set")
    }

    /// 카카오 Client Secret
    ///
    /// 서버 사이드에서만 사용하며 로그에 출력하지 않습니다.
    ///
    /// # Panics
    ///
    /// `KAKAO_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("KAKAO_CLIENT_SECRET")
            .expect("KAKAO_CLIENT_SECRET must be set")
    }

    /// 인증 완료 후 리디렉션될 URI
    ///
    /// 카카오 디벨로퍼 콘솔의 Redirect URI 목록에 등록되어 있어야 합니다.
    ///
    /// # Panics
    ///
    /// `KAKAO_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("KAKAO_REDIRECT_URI")
            .expect("KAKAO_REDIRECT_URI must be set")
    }

    /// 카카오 인가 코드 발급 엔드포인트
    pub fn auth_uri() -> String {
        env::var("KAKAO_AUTH_URI")
            .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/authorize".to_string())
    }

    /// 인가 코드를 액세스 토큰으로 교환하는 엔드포인트
    pub fn token_uri() -> String {
        env::var("KAKAO_TOKEN_URI")
            .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/token".to_string())
    }

    /// 사용자 프로필 조회 엔드포인트
    pub fn user_info_uri() -> String {
        env::var("KAKAO_USER_INFO_URI")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string())
    }

    /// 프로바이더 세션 로그아웃(토큰 폐기) 엔드포인트
    pub fn logout_uri() -> String {
        env::var("KAKAO_LOGOUT_URI")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v1/user/logout".to_string())
    }
}

/// JSON Web Token (JWT) 관련 설정
///
/// 액세스 토큰은 시간 단위의 짧은 수명, 리프레시 토큰은 주 단위의
/// 긴 수명을 가집니다. 리프레시 토큰의 만료 시점은 발급 시점에
/// 회원 문서에도 함께 기록됩니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 없으면 개발용 기본값을 사용하되 경고를 남깁니다.
    /// 운영 환경에서는 최소 256비트 랜덤 키를 사용해야 합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본값: 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    /// 리프레시 토큰 만료 시간 (일 단위, 기본값: 14)
    ///
    /// 리프레시 토큰이 탈취되면 이 기간 동안 악용될 수 있으므로
    /// 서비스 성격에 맞게 보수적으로 설정합니다.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "14".to_string())
            .parse()
            .unwrap_or(14)
    }
}

/// OAuth 공통 보안 설정
///
/// CSRF 방지용 state 매개변수 서명과 프로바이더 호출 제한 시간을 관리합니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 서명용 비밀키
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
                "oauth-state-secret".to_string()
            })
    }

    /// 프로바이더 HTTP 호출 제한 시간 (초 단위, 기본값: 10)
    ///
    /// 프로바이더 장애가 로그인 요청을 무한정 붙잡아 두지 않도록
    /// 모든 외부 호출에 적용됩니다. 재시도는 하지 않습니다.
    pub fn request_timeout_secs() -> u64 {
        env::var("OAUTH_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}
