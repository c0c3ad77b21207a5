//! 카카오 사용자 정보 API 응답 모델
//!
//! `GET /v2/user/me` 가 돌려주는 프로바이더 종속적인 중첩 구조를 그대로
//! 매핑합니다. 이 구조는 프로바이더 계약이 바뀔 수 있으므로 서비스 계층에는
//! 노출하지 않고, [`into_profile`](KakaoUserInfo::into_profile) 로 내부
//! 프로필 형태로 변환한 뒤에만 사용합니다.

use serde::{Deserialize, Serialize};
use crate::domain::models::oauth::kakao::provider_profile::ProviderProfile;

/// 카카오 사용자 정보 응답의 최상위 구조
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoUserInfo {
    /// 카카오 회원번호
    pub id: i64,

    /// 서비스 연결 시각
    #[serde(default)]
    pub connected_at: Option<String>,

    /// 카카오 계정 정보
    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,
}

/// `kakao_account` 블록
///
/// 각 항목은 사용자의 제공 동의 여부에 따라 빠질 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoAccount {
    /// 카카오 계정 이메일. 이메일 제공에 동의하지 않으면 없음
    #[serde(default)]
    pub email: Option<String>,

    /// 프로필 정보 블록
    #[serde(default)]
    pub profile: Option<KakaoProfile>,
}

/// `kakao_account.profile` 블록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoProfile {
    /// 닉네임
    #[serde(default)]
    pub nickname: Option<String>,

    /// 프로필 이미지 URL
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl KakaoUserInfo {
    /// 프로바이더 응답을 내부 프로필 형태로 변환합니다.
    ///
    /// 이메일은 로컬 계정과의 연결 키이므로 없으면 프로필 전체를
    /// 만들 수 없습니다. 닉네임이 없으면 이메일의 로컬 파트를
    /// 표시 이름으로 사용합니다.
    pub fn into_profile(self) -> Option<ProviderProfile> {
        let account = self.kakao_account?;
        let email = account.email?;

        let (nickname, avatar_url) = match account.profile {
            Some(profile) => (profile.nickname, profile.profile_image_url),
            None => (None, None),
        };

        let display_name = nickname.unwrap_or_else(|| {
            email.split('@').next().unwrap_or(&email).to_string()
        });

        Some(ProviderProfile {
            email,
            display_name,
            avatar_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let json = r#"{
            "id": 123456789,
            "connected_at": "2024-05-20T01:45:28Z",
            "kakao_account": {
                "profile_nickname_needs_agreement": false,
                "profile": {
                    "nickname": "홍길동",
                    "thumbnail_image_url": "http://k.kakaocdn.net/sample_110x110.jpg",
                    "profile_image_url": "http://k.kakaocdn.net/sample_640x640.jpg"
                },
                "has_email": true,
                "email_needs_agreement": false,
                "is_email_valid": true,
                "is_email_verified": true,
                "email": "hong@sample.com"
            }
        }"#;

        let info: KakaoUserInfo = serde_json::from_str(json).unwrap();
        let profile = info.into_profile().unwrap();

        assert_eq!(profile.email, "hong@sample.com");
        assert_eq!(profile.display_name, "홍길동");
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("http://k.kakaocdn.net/sample_640x640.jpg")
        );
    }

    #[test]
    fn test_payload_without_email_yields_no_profile() {
        // 이메일 제공에 동의하지 않은 계정
        let json = r#"{
            "id": 42,
            "kakao_account": {
                "profile": { "nickname": "익명" }
            }
        }"#;

        let info: KakaoUserInfo = serde_json::from_str(json).unwrap();
        assert!(info.into_profile().is_none());
    }

    #[test]
    fn test_payload_without_profile_falls_back_to_email_local_part() {
        let json = r#"{
            "id": 42,
            "kakao_account": { "email": "fallback@sample.com" }
        }"#;

        let info: KakaoUserInfo = serde_json::from_str(json).unwrap();
        let profile = info.into_profile().unwrap();

        assert_eq!(profile.display_name, "fallback");
        assert!(profile.avatar_url.is_none());
    }
}
