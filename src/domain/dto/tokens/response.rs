//! 토큰 갱신 응답 DTO

use serde::{Deserialize, Serialize};

/// 액세스 토큰 갱신 응답
///
/// 리프레시 토큰은 회전되지 않으므로 새 액세스 토큰만 내려갑니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}
