//! 프로바이더 중립적인 내부 프로필 모델

use serde::{Deserialize, Serialize};

/// 소셜 로그인 프로바이더에서 가져온 프로필의 안정적인 내부 표현
///
/// 프로바이더별 응답 구조는 이 형태로 변환된 뒤에만 서비스 계층으로
/// 전달됩니다. 프로바이더 계약이 바뀌어도 수정 범위가 변환 함수
/// 하나로 한정됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// 로컬 계정과 연결되는 이메일
    pub email: String,
    /// 표시 이름
    pub display_name: String,
    /// 프로필 이미지 URL
    pub avatar_url: Option<String>,
}
