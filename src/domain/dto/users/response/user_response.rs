//! 회원 관련 응답 DTO
//!
//! 엔티티를 그대로 내보내지 않고 공개 가능한 필드만 담은 DTO 로
//! 변환합니다. 비밀번호 해시, 리프레시 토큰, 프로바이더 토큰은
//! 어떤 응답에도 포함되지 않습니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::{Role, User};

/// 회원 공개 정보 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub join_date: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            profile_image_url: user.profile_image_url,
            join_date: user.join_date.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// 회원 가입 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub message: String,
}

/// 로그인 성공 응답
///
/// 로컬 로그인, 카카오 로그인, 등급 상승 모두 같은 구조로 응답하므로
/// 클라이언트는 로그인 경로와 무관하게 동일하게 처리할 수 있습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl LoginResponse {
    pub fn new(user: User, access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

/// 로그아웃 결과 응답
///
/// 로컬 세션은 항상 종료되지만 프로바이더 측 폐기는 실패할 수 있으므로
/// 부분 성공 여부를 함께 내려줍니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// 프로바이더 토큰 폐기 호출이 성공했는지 여부.
    /// 소셜 세션이 없던 회원은 true (폐기할 것이 없음)
    pub provider_revoked: bool,
    /// 프로바이더가 돌려준 확인 응답 본문
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_secrets() {
        let mut user = User::new_local(
            "a@x.com".to_string(),
            "Al".to_string(),
            "$2b$06$secret-hash".to_string(),
        );
        user.refresh_token = Some("refresh-secret".to_string());
        user.provider_access_token = Some("provider-secret".to_string());

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("refresh-secret"));
        assert!(!json.contains("provider-secret"));
        assert!(json.contains("a@x.com"));
    }
}
