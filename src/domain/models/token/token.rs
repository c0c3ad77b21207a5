//! JWT 인증 토큰 클레임과 토큰 쌍
//!
//! RFC 7519 표준 클레임에 회원 등급 클레임을 더한 구조입니다.
//! 개인정보 보호를 위해 최소한의 정보만 담습니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::Role;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (회원 ID)
/// - `role`: 회원 등급. 등급 변경 시 토큰이 재발급된다
/// - `iat` / `exp`: 발급, 만료 시간 (Unix timestamp)
/// - `jti`: 리프레시 토큰에만 부여되는 고유 식별자.
///   같은 회원에게 같은 순간 발급된 토큰끼리도 값이 달라지게 한다
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (회원 ID)
    pub sub: String,
    /// 회원 등급
    pub role: Role,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 토큰 고유 식별자 (리프레시 토큰 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// 로그인 성공 시 클라이언트에게 전달되는 토큰 쌍
///
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
