//! 카카오 OAuth 연동 관련 응답 DTO

use serde::{Deserialize, Serialize};

/// 카카오 토큰 엔드포인트 응답
///
/// 인가 코드를 교환하면 내려오는 구조입니다. 이 중 로컬 계정에
/// 기록되는 것은 `access_token` 하나뿐입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoTokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// 프론트엔드에 전달하는 카카오 로그인 시작 정보
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthLoginUrlResponse {
    /// 사용자를 리디렉션할 카카오 인가 페이지 URL
    pub login_url: String,
    /// 콜백 검증에 사용할 state 값
    pub state: String,
}
