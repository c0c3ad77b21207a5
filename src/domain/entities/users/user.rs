//! 회원 엔티티 구현
//!
//! 로컬 가입 회원과 카카오 소셜 로그인 회원을 하나의 모델로 표현합니다.
//! 세션 정보(리프레시 토큰, 만료 시점, 프로바이더 액세스 토큰)는 별도
//! 엔티티가 아니라 회원 문서에 포함되며, 회원당 하나의 세션만 유지됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 회원 등급
///
/// 닫힌 열거형으로, 전이는 [`Role::promoted`] 를 통해서만 이루어집니다.
/// 허용되는 전이는 `COMMON → PREMIUM` 단방향 하나뿐이며 강등은 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// 일반 회원. 가입 직후의 기본 등급
    #[serde(rename = "COMMON")]
    Common,
    /// 프리미엄 회원
    #[serde(rename = "PREMIUM")]
    Premium,
}

impl Role {
    /// 등급 상승 결과를 반환합니다.
    ///
    /// 일반 회원만 상승할 수 있으며, 그 외에는 `None` 을 반환합니다.
    /// 필드를 직접 수정하는 대신 이 함수를 거치게 하여
    /// 역방향 전이가 코드 상에 존재할 수 없게 합니다.
    pub fn promoted(self) -> Option<Role> {
        match self {
            Role::Common => Some(Role::Premium),
            Role::Premium => None,
        }
    }

    /// 저장소 필터와 로그에 사용하는 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Common => "COMMON",
            Role::Premium => "PREMIUM",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "COMMON" => Ok(Role::Common),
            "PREMIUM" => Ok(Role::Premium),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }
}

/// 회원 엔티티
///
/// 이메일이 로그인 식별자이며 저장소의 유니크 인덱스로 중복이 차단됩니다.
/// `password_hash` 가 없는 회원은 카카오 로그인으로만 가입한 계정입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 회원 이메일 (unique)
    pub email: String,
    /// 표시 이름
    pub display_name: String,
    /// 해시된 비밀번호 (소셜 전용 계정의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 회원 등급
    pub role: Role,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// 카카오 로그인 시 발급받은 프로바이더 액세스 토큰
    ///
    /// 값이 있으면 현재 소셜 세션이 살아있다는 뜻이며, 로그아웃 시
    /// 프로바이더 폐기 호출에 사용된 뒤 제거됩니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_access_token: Option<String>,
    /// 현재 세션의 리프레시 토큰
    ///
    /// `refresh_token_expiry` 와 반드시 함께 기록되고 함께 제거됩니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 리프레시 토큰 만료 시점. 이 시각 이후의 세션은 무효
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expiry: Option<DateTime>,
    /// 가입 일시
    pub join_date: DateTime,
    /// 수정 일시
    pub updated_at: DateTime,
}

impl User {
    /// 이메일/비밀번호 기반의 새 로컬 회원을 생성합니다.
    ///
    /// 일반 등급으로 시작하며 아직 세션은 없습니다.
    pub fn new_local(email: String, display_name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            display_name,
            password_hash: Some(password_hash),
            role: Role::Common,
            profile_image_url: None,
            provider_access_token: None,
            refresh_token: None,
            refresh_token_expiry: None,
            join_date: now,
            updated_at: now,
        }
    }

    /// 카카오 프로필로부터 새 회원을 생성합니다.
    ///
    /// 비밀번호 해시가 없으므로 이 계정으로는 비밀번호 로그인을 할 수 없고,
    /// 발급받은 프로바이더 액세스 토큰이 즉시 기록됩니다.
    pub fn new_kakao(
        email: String,
        display_name: String,
        profile_image_url: Option<String>,
        provider_access_token: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            display_name,
            password_hash: None,
            role: Role::Common,
            profile_image_url,
            provider_access_token: Some(provider_access_token),
            refresh_token: None,
            refresh_token_expiry: None,
            join_date: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 계정인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 현재 소셜 세션이 살아있는지 확인
    pub fn has_provider_session(&self) -> bool {
        self.provider_access_token.is_some()
    }

    /// 주어진 시점 기준으로 리프레시 세션이 만료되었는지 확인
    ///
    /// 만료 시점이 기록되어 있지 않으면 만료된 것으로 취급합니다.
    pub fn refresh_session_expired(&self, now: DateTime) -> bool {
        match self.refresh_token_expiry {
            Some(expiry) => expiry <= now,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_promotion_is_one_way() {
        assert_eq!(Role::Common.promoted(), Some(Role::Premium));
        // 프리미엄 회원은 다시 상승할 수 없다
        assert_eq!(Role::Premium.promoted(), None);
    }

    #[test]
    fn test_role_string_roundtrip() {
        assert_eq!(Role::Common.as_str(), "COMMON");
        assert_eq!(Role::Premium.as_str(), "PREMIUM");
        assert_eq!(Role::from_str("COMMON").unwrap(), Role::Common);
        assert_eq!(Role::from_str("PREMIUM").unwrap(), Role::Premium);
        assert!(Role::from_str("ADMIN").is_err());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Common).unwrap(), "\"COMMON\"");
        let parsed: Role = serde_json::from_str("\"PREMIUM\"").unwrap();
        assert_eq!(parsed, Role::Premium);
    }

    #[test]
    fn test_new_local_user_defaults() {
        let user = User::new_local(
            "a@x.com".to_string(),
            "Al".to_string(),
            "$2b$06$hash".to_string(),
        );

        assert_eq!(user.role, Role::Common);
        assert!(user.can_authenticate_with_password());
        assert!(!user.has_provider_session());
        assert!(user.refresh_token.is_none());
        assert!(user.refresh_token_expiry.is_none());
    }

    #[test]
    fn test_new_kakao_user_has_no_usable_password() {
        let user = User::new_kakao(
            "k@x.com".to_string(),
            "카카오회원".to_string(),
            Some("https://img.example.com/p.jpg".to_string()),
            "provider-token".to_string(),
        );

        assert!(!user.can_authenticate_with_password());
        assert!(user.has_provider_session());
        assert_eq!(user.role, Role::Common);
    }

    #[test]
    fn test_refresh_session_expiry_window() {
        let mut user = User::new_local(
            "a@x.com".to_string(),
            "Al".to_string(),
            "hash".to_string(),
        );
        let now = DateTime::now();

        // 세션이 기록되지 않은 회원은 만료 상태로 취급
        assert!(user.refresh_session_expired(now));

        // 미래 만료 시점이면 유효
        user.refresh_token = Some("rt".to_string());
        user.refresh_token_expiry = Some(DateTime::from_millis(now.timestamp_millis() + 60_000));
        assert!(!user.refresh_session_expired(now));

        // 만료 시점과 같은 순간부터 무효
        user.refresh_token_expiry = Some(now);
        assert!(user.refresh_session_expired(now));

        // 과거 만료 시점이면 무효
        user.refresh_token_expiry = Some(DateTime::from_millis(now.timestamp_millis() - 60_000));
        assert!(user.refresh_session_expired(now));
    }
}
