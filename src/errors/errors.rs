//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 백엔드에서 발생하는 모든 실패를 하나의 열거형으로 관리합니다.
//! `thiserror` 와 `actix_web::ResponseError` 를 사용하여 각 실패가
//! 항상 동일한 HTTP 상태 코드와 JSON 응답으로 변환되도록 보장합니다.
//!
//! 인증 실패 중 `UnknownEmail` 과 `BadCredential` 은 내부 로그에서는
//! 구분되지만, 클라이언트 응답에서는 동일한 메시지로 표현됩니다.
//! 어떤 이메일이 가입되어 있는지 응답만으로 알아낼 수 없게 하기 위함입니다.

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 핸들러에서 `Result<_, AppError>` 를 반환하면 자동으로
/// 적절한 HTTP 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 이미 등록된 이메일로 가입을 시도함 (409 Conflict)
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// 등록되지 않은 이메일로 로그인을 시도함 (401 Unauthorized)
    ///
    /// 응답은 `BadCredential` 과 동일하게 표현됩니다.
    #[error("Unknown email: {0}")]
    UnknownEmail(String),

    /// 비밀번호 불일치 또는 비밀번호 인증이 불가능한 계정 (401 Unauthorized)
    #[error("Bad credential")]
    BadCredential,

    /// 저장된 세션과 일치하지 않는 리프레시 토큰 (401 Unauthorized)
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// 만료 시점이 지난 리프레시 토큰, 재로그인이 필요함 (401 Unauthorized)
    #[error("Expired refresh token")]
    ExpiredRefreshToken,

    /// 존재하지 않는 회원 (404 Not Found)
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// 등급 상승이 불가능한 회원 상태 (409 Conflict)
    #[error("Role not eligible for promotion")]
    IneligibleRole,

    /// 인가 코드를 프로바이더 액세스 토큰으로 교환하지 못함 (502 Bad Gateway)
    #[error("Provider code exchange failed: {0}")]
    ProviderExchangeFailed(String),

    /// 프로바이더 프로필 조회 또는 해석에 실패함 (502 Bad Gateway)
    #[error("Provider profile fetch failed: {0}")]
    ProviderProfileFailed(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 토큰 누락 등 일반 인증 실패 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 호출 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 내려보낼 메시지
    ///
    /// 가입 여부를 노출하지 않기 위해 `UnknownEmail` 과 `BadCredential` 은
    /// 같은 문자열을 돌려줍니다. 내부 로그용 `Display` 와는 별개입니다.
    fn public_message(&self) -> String {
        match self {
            AppError::UnknownEmail(_) | AppError::BadCredential => {
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string()
            }
            AppError::DuplicateEmail(_) => "이미 등록된 이메일입니다".to_string(),
            AppError::InvalidRefreshToken => "유효하지 않은 리프레시 토큰입니다".to_string(),
            AppError::ExpiredRefreshToken => {
                "리프레시 토큰이 만료되었습니다. 다시 로그인해주세요".to_string()
            }
            AppError::UserNotFound(_) => "회원을 찾을 수 없습니다".to_string(),
            AppError::IneligibleRole => "등급을 변경할 수 없는 회원입니다".to_string(),
            AppError::ProviderExchangeFailed(_) | AppError::ProviderProfileFailed(_) => {
                "소셜 로그인 처리 중 오류가 발생했습니다".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownEmail(_)
            | AppError::BadCredential
            | AppError::InvalidRefreshToken
            | AppError::ExpiredRefreshToken
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_) | AppError::IneligibleRole => StatusCode::CONFLICT,
            AppError::ProviderExchangeFailed(_) | AppError::ProviderProfileFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.public_message()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;

    fn body_bytes(error: &AppError) -> Vec<u8> {
        error
            .error_response()
            .into_body()
            .try_into_bytes()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_duplicate_email_response() {
        let error = AppError::DuplicateEmail("a@x.com".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_login_failures_are_unauthorized() {
        let unknown = AppError::UnknownEmail("ghost@x.com".to_string());
        let bad = AppError::BadCredential;

        assert_eq!(unknown.error_response().status(), actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(bad.error_response().status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_login_failures_share_public_body() {
        // 응답 본문만으로는 이메일 존재 여부를 구분할 수 없어야 한다
        let unknown = AppError::UnknownEmail("ghost@x.com".to_string());
        let bad = AppError::BadCredential;

        assert_eq!(body_bytes(&unknown), body_bytes(&bad));
        // 내부 로그 문자열은 서로 다르다
        assert_ne!(unknown.to_string(), bad.to_string());
    }

    #[test]
    fn test_refresh_token_failures_are_distinct() {
        let invalid = AppError::InvalidRefreshToken;
        let expired = AppError::ExpiredRefreshToken;

        assert_eq!(invalid.error_response().status(), actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(expired.error_response().status(), actix_web::http::StatusCode::UNAUTHORIZED);
        assert_ne!(body_bytes(&invalid), body_bytes(&expired));
    }

    #[test]
    fn test_user_not_found_response() {
        let error = AppError::UserNotFound("652f...".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_ineligible_role_response() {
        let error = AppError::IneligibleRole;
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_provider_failures_are_bad_gateway() {
        let exchange = AppError::ProviderExchangeFailed("timeout".to_string());
        let profile = AppError::ProviderProfileFailed("malformed body".to_string());

        assert_eq!(exchange.error_response().status(), actix_web::http::StatusCode::BAD_GATEWAY);
        assert_eq!(profile.error_response().status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
