//! 회원 가입 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 새로운 회원 가입 요청
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
/// 비밀번호 원문은 해싱 직후 폐기되며 어디에도 저장되지 않습니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    /// 로그인 식별자로 사용할 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 계정 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    /// 표시 이름 (1-50자)
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes() {
        let request = SignUpRequest {
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
            display_name: "Al".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let request = SignUpRequest {
            email: "not-an-email".to_string(),
            password: "pw123456".to_string(),
            display_name: "Al".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let request = SignUpRequest {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
            display_name: "Al".to_string(),
        };

        assert!(request.validate().is_err());
    }
}
