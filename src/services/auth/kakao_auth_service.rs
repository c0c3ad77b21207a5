//! # 카카오 OAuth 2.0 게이트웨이
//!
//! 카카오 인증 서버, API 서버와의 통신만을 담당하는 서비스입니다.
//! 인가 코드 교환, 프로필 조회, 세션 폐기의 세 가지 호출을 제공하며,
//! 계정 생성이나 토큰 발급 같은 로컬 처리는 하지 않습니다.
//!
//! 모든 호출에는 제한 시간이 걸려 있고 재시도는 하지 않습니다.
//! 카카오 측의 비정상 응답, 타임아웃, 해석 불가능한 본문은 전부
//! 호출 종류별로 구분된 에러로 변환됩니다.
//!
//! ## 인가 코드 플로우
//!
//! 1. 프론트엔드가 [`get_login_url`](KakaoAuthService::get_login_url) 로
//!    받은 주소로 사용자를 보냄
//! 2. 사용자가 카카오에서 인증을 마치면 redirect URI 로 인가 코드가 돌아옴
//! 3. 콜백 처리에서 state 검증 후 [`exchange_code`](KakaoAuthService::exchange_code),
//!    [`fetch_profile`](KakaoAuthService::fetch_profile) 순서로 호출

use std::time::Duration;
use sha2::{Digest, Sha256};
use singleton_macro::service;
use crate::config::{KakaoOAuthConfig, OAuthConfig};
use crate::domain::dto::users::response::{KakaoTokenResponse, OAuthLoginUrlResponse};
use crate::domain::models::oauth::kakao::kakao_user::KakaoUserInfo;
use crate::domain::models::oauth::kakao::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;

/// 카카오 OAuth 게이트웨이 서비스
#[service(name = "kakaoauth")]
pub struct KakaoAuthService {
    // 외부 의존성 없음
}

impl KakaoAuthService {
    /// 카카오 로그인 시작 URL 생성
    ///
    /// CSRF 방지용 state 값을 포함한 인가 페이지 URL 을 만들어
    /// 프론트엔드에 전달합니다.
    pub fn get_login_url(&self) -> Result<OAuthLoginUrlResponse, AppError> {
        let state = self.generate_oauth_state()?;

        let params = [
            ("client_id", KakaoOAuthConfig::client_id()),
            ("redirect_uri", KakaoOAuthConfig::redirect_uri()),
            ("response_type", "code".to_string()),
            ("scope", "account_email profile_nickname profile_image".to_string()),
            ("state", state.clone()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let login_url = format!("{}?{}", KakaoOAuthConfig::auth_uri(), query_string);

        Ok(OAuthLoginUrlResponse { login_url, state })
    }

    /// 인가 코드를 프로바이더 액세스 토큰으로 교환
    ///
    /// 인가 코드는 일회성이므로 수신 즉시 교환해야 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchangeFailed` - 통신 실패, 비정상 상태 코드,
    ///   응답 본문 해석 실패
    pub async fn exchange_code(&self, auth_code: &str) -> Result<KakaoTokenResponse, AppError> {
        let client = self.http_client()
            .map_err(AppError::ProviderExchangeFailed)?;

        let params = [
            ("grant_type", "authorization_code".to_string()),
            ("client_id", KakaoOAuthConfig::client_id()),
            ("client_secret", KakaoOAuthConfig::client_secret()),
            ("redirect_uri", KakaoOAuthConfig::redirect_uri()),
            ("code", auth_code.to_string()),
        ];

        let response = client
            .post(KakaoOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ProviderExchangeFailed(format!("카카오 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderExchangeFailed(format!(
                "카카오 토큰 교환 실패: {}", error_text
            )));
        }

        response
            .json::<KakaoTokenResponse>()
            .await
            .map_err(|e| AppError::ProviderExchangeFailed(format!("카카오 토큰 응답 파싱 실패: {}", e)))
    }

    /// 프로바이더 액세스 토큰으로 카카오 프로필 조회
    ///
    /// 프로바이더 종속적인 응답은 여기서 곧바로 내부
    /// [`ProviderProfile`] 형태로 변환되며, 이후 계층은 카카오 응답
    /// 구조를 알지 못합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderProfileFailed` - 통신 실패, 비정상 상태 코드,
    ///   본문 해석 실패, 이메일이 없는 프로필
    pub async fn fetch_profile(&self, provider_access_token: &str) -> Result<ProviderProfile, AppError> {
        let client = self.http_client()
            .map_err(AppError::ProviderProfileFailed)?;

        let response = client
            .get(KakaoOAuthConfig::user_info_uri())
            .bearer_auth(provider_access_token)
            .send()
            .await
            .map_err(|e| AppError::ProviderProfileFailed(format!("카카오 프로필 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderProfileFailed(format!(
                "카카오 프로필 조회 실패: {}", error_text
            )));
        }

        let user_info = response
            .json::<KakaoUserInfo>()
            .await
            .map_err(|e| AppError::ProviderProfileFailed(format!("카카오 프로필 파싱 실패: {}", e)))?;

        user_info.into_profile().ok_or_else(|| {
            AppError::ProviderProfileFailed(
                "카카오 계정이 이메일을 제공하지 않았습니다".to_string(),
            )
        })
    }

    /// 프로바이더 세션 폐기 (카카오 로그아웃)
    ///
    /// 성공 시 카카오가 돌려준 확인 응답 본문을 반환합니다.
    /// 호출부(로그아웃 처리)는 이 호출이 실패해도 로컬 세션 정리를
    /// 계속 진행합니다.
    pub async fn revoke(&self, provider_access_token: &str) -> Result<String, AppError> {
        let client = self.http_client()
            .map_err(AppError::ExternalServiceError)?;

        let response = client
            .post(KakaoOAuthConfig::logout_uri())
            .bearer_auth(provider_access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 로그아웃 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "카카오 로그아웃 실패: {}", error_text
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 로그아웃 응답 읽기 실패: {}", e)))
    }

    /// OAuth state 매개변수 검증
    ///
    /// 콜백으로 돌아온 state 가 이 서버가 만든 형식(64자리 16진수
    /// SHA-256 해시)인지 확인합니다.
    pub fn verify_oauth_state(&self, state: &str) -> Result<(), AppError> {
        let looks_valid = state.len() == 64
            && state.chars().all(|c| c.is_ascii_hexdigit());

        if !looks_valid {
            return Err(AppError::AuthenticationError("유효하지 않은 OAuth state".to_string()));
        }

        Ok(())
    }

    /// OAuth state 매개변수 생성
    ///
    /// 타임스탬프와 서버 시크릿을 결합해 SHA-256 으로 해싱합니다.
    /// 시크릿을 모르는 쪽에서는 예측할 수 없는 값이 됩니다.
    fn generate_oauth_state(&self) -> Result<String, AppError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_nanos();

        let state_data = format!("{}:{}", timestamp, OAuthConfig::state_secret());

        let mut hasher = Sha256::new();
        hasher.update(state_data.as_bytes());

        let digest = hasher.finalize();
        Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    /// 제한 시간이 걸린 HTTP 클라이언트 생성
    fn http_client(&self) -> Result<reqwest::Client, String> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(OAuthConfig::request_timeout_secs()))
            .build()
            .map_err(|e| format!("HTTP 클라이언트 생성 실패: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_state_passes_verification() {
        let service = KakaoAuthService::instance();

        let state = service.generate_oauth_state().unwrap();

        assert_eq!(state.len(), 64);
        assert!(service.verify_oauth_state(&state).is_ok());
    }

    #[test]
    fn test_states_differ_per_generation() {
        let service = KakaoAuthService::instance();

        let first = service.generate_oauth_state().unwrap();
        let second = service.generate_oauth_state().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_bad_state() {
        let service = KakaoAuthService::instance();

        assert!(service.verify_oauth_state("").is_err());
        assert!(service.verify_oauth_state("short").is_err());
        // 길이는 맞지만 16진수가 아닌 경우
        assert!(service.verify_oauth_state(&"z".repeat(64)).is_err());
    }
}
