//! # 인증 및 세션 수명주기 서비스
//!
//! 가입, 로그인, 토큰 갱신, 등급 상승, 카카오 로그인 연결, 로그아웃을
//! 총괄하는 핵심 비즈니스 로직입니다. 비밀번호 해싱, 토큰 발급, 저장소
//! 접근, 프로바이더 통신은 각각의 하위 서비스에 위임하고, 이 서비스는
//! 흐름과 상태 전이만을 책임집니다.
//!
//! ## 세션 모델
//!
//! 회원당 세션은 하나입니다. 세션은 회원 문서의
//! `(refresh_token, refresh_token_expiry, provider_access_token)` 세 필드로
//! 표현되며, 새 로그인은 이전 세션을 덮어써서 무효화합니다. 같은 회원에
//! 대한 동시 로그인/갱신/로그아웃 경쟁은 마지막 쓰기가 이기는 정책이고,
//! 덮어써진 리프레시 토큰은 다음 사용 시점에 `InvalidRefreshToken` 으로
//! 드러납니다.
//!
//! ## 실패 구분
//!
//! 로그인 실패는 내부적으로 `UnknownEmail` 과 `BadCredential` 로 구분해
//! 보안 로그에 남기지만, 클라이언트 응답은 동일합니다. 리프레시 토큰
//! 실패는 "저장된 세션과 일치하지 않음" 과 "세션 만료" 를 구분하여
//! 클라이언트가 재로그인 여부를 판단할 수 있게 합니다. 프로바이더
//! 장애는 단계별로 구분되며 로컬 상태를 절대 건드리지 않습니다.

use std::sync::Arc;
use mongodb::bson::DateTime;
use singleton_macro::service;
use crate::{
    domain::{
        entities::users::user::{Role, User},
        dto::users::{
            request::SignUpRequest,
            response::{CreateUserResponse, LoginResponse, LogoutResponse, UserResponse},
        },
        dto::tokens::RefreshTokenResponse,
    },
    repositories::users::user_repo::UserRepository,
    services::auth::{
        kakao_auth_service::KakaoAuthService,
        password_service::PasswordService,
        token_service::{TokenService, TokenValidationError},
    },
};
use crate::config::JwtConfig;
use crate::errors::errors::AppError;

/// 인증 오케스트레이션 서비스
#[service(name = "auth")]
pub struct AuthService {
    /// 회원 저장소
    user_repo: Arc<UserRepository>,
    /// JWT 발급/검증
    token_service: Arc<TokenService>,
    /// 비밀번호 해싱/검증
    password_service: Arc<PasswordService>,
    /// 카카오 프로바이더 게이트웨이
    kakao_auth_service: Arc<KakaoAuthService>,
}

impl AuthService {
    /// 새 회원 가입
    ///
    /// 이메일 중복을 먼저 확인해 친절하게 실패시키지만, 최종 방어선은
    /// 저장소의 유니크 인덱스입니다. 사전 검사를 동시에 통과한 요청도
    /// 저장 시점에 `DuplicateEmail` 로 실패하며, 어느 경로든 두 번째
    /// 문서는 만들어지지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateEmail` - 이미 등록된 이메일
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<CreateUserResponse, AppError> {
        if self.user_repo.exists_by_email(&request.email).await? {
            return Err(AppError::DuplicateEmail(request.email));
        }

        let password_hash = self.password_service.hash(&request.password)?;

        let user = User::new_local(request.email, request.display_name, password_hash);
        let created = self.user_repo.create(user).await?;

        log::info!("회원 가입 완료 - email: {}", created.email);

        Ok(CreateUserResponse {
            user: UserResponse::from(created),
            message: "회원 가입이 완료되었습니다".to_string(),
        })
    }

    /// 이메일 등록 여부 확인
    pub async fn check_email(&self, email: &str) -> Result<bool, AppError> {
        self.user_repo.exists_by_email(email).await
    }

    /// 회원 공개 정보 조회
    ///
    /// # Errors
    ///
    /// * `AppError::UserNotFound` - 존재하지 않는 회원
    pub async fn find_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 성공 시 새 토큰 쌍을 발급하고 리프레시 세션을 회원 문서에
    /// 기록합니다. 실패한 로그인은 세션 필드를 일절 변경하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UnknownEmail` - 등록되지 않은 이메일
    /// * `AppError::BadCredential` - 비밀번호 불일치 또는 소셜 전용 계정
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::UnknownEmail(email.to_string()))?;

        let password_hash = match user.password_hash.as_deref() {
            Some(hash) => hash,
            None => {
                // 카카오로만 가입한 계정. 응답은 일반 실패와 동일하다
                log::warn!("소셜 전용 계정에 비밀번호 로그인 시도 - email: {}", email);
                return Err(AppError::BadCredential);
            }
        };

        if !self.password_service.verify(password, password_hash)? {
            log::warn!("비밀번호 불일치 - email: {}", email);
            return Err(AppError::BadCredential);
        }

        log::info!("로그인 성공 - email: {}", email);

        self.issue_session(user, None).await
    }

    /// 리프레시 토큰으로 액세스 토큰 갱신
    ///
    /// 회원 문서에 기록된 만료 시점이 최종 기준입니다. 토큰 자체가
    /// 유효하더라도 기록된 시점이 지났으면 세션은 끝난 것이고, 반대로
    /// 저장소에서 찾을 수 없는 토큰은 (로그아웃이나 재로그인으로
    /// 대체된 경우를 포함해) 전부 무효입니다.
    ///
    /// 리프레시 토큰은 이 연산에서 회전되지 않고 자체 만료 시점까지
    /// 재사용됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidRefreshToken` - 서명 불일치, 형식 오류,
    ///   저장된 세션과 불일치
    /// * `AppError::ExpiredRefreshToken` - 세션 만료, 재로그인 필요
    pub async fn renew_access_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse, AppError> {
        if let Err(e) = self.token_service.verify_token(refresh_token) {
            return Err(match e {
                TokenValidationError::Expired => AppError::ExpiredRefreshToken,
                TokenValidationError::Malformed | TokenValidationError::SignatureInvalid => {
                    AppError::InvalidRefreshToken
                }
            });
        }

        let user = self.user_repo
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        if user.refresh_session_expired(DateTime::now()) {
            log::info!("만료된 세션의 갱신 시도 - email: {}", user.email);
            return Err(AppError::ExpiredRefreshToken);
        }

        let access_token = self.token_service.generate_access_token(&user)?;

        log::debug!("액세스 토큰 갱신 - email: {}", user.email);

        Ok(RefreshTokenResponse {
            access_token,
            expires_in: JwtConfig::expiration_hours() * 3600,
            token_type: "Bearer".to_string(),
        })
    }

    /// 일반 회원을 프리미엄으로 상승
    ///
    /// 호출자가 관찰한 등급이 조건부 업데이트의 필터에 들어가므로,
    /// 동시에 들어온 두 번의 상승 요청 중 한 쪽은 반드시
    /// `IneligibleRole` 을 받습니다. 등급 클레임이 바뀌므로 토큰 쌍을
    /// 재발급해 다음 요청부터 새 등급이 반영되게 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UserNotFound` - 존재하지 않는 회원
    /// * `AppError::IneligibleRole` - 일반 회원이 아니거나 이미 상승됨
    pub async fn promote(&self, user_id: &str, current_role: Role) -> Result<LoginResponse, AppError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::UserNotFound(user_id.to_string()));
        }

        let target = current_role.promoted().ok_or(AppError::IneligibleRole)?;

        let promoted = self.user_repo
            .update_role(user_id, current_role, target)
            .await?
            .ok_or(AppError::IneligibleRole)?;

        log::info!("등급 상승 완료 - email: {}, 이전 등급: {}", promoted.email, current_role.as_str());

        self.issue_session(promoted, None).await
    }

    /// 카카오 인가 코드로 로그인 (가입 겸용)
    ///
    /// 프로바이더 호출이 모두 성공한 뒤에야 로컬 저장소를 건드립니다.
    /// 프로필 이메일로 기존 계정을 찾으면 그대로 재사용하면서
    /// 프로바이더 액세스 토큰만 갱신하고, 없으면 프로필을 시드로 새
    /// 계정을 만듭니다. 이후의 토큰 발급과 세션 기록은 로컬 로그인과
    /// 동일하므로 클라이언트는 로그인 경로를 구분할 필요가 없습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchangeFailed` - 인가 코드 교환 실패
    /// * `AppError::ProviderProfileFailed` - 프로필 조회/해석 실패
    pub async fn kakao_login(&self, code: &str, state: &str) -> Result<LoginResponse, AppError> {
        self.kakao_auth_service.verify_oauth_state(state)?;

        let token_response = self.kakao_auth_service.exchange_code(code).await?;
        let profile = self.kakao_auth_service
            .fetch_profile(&token_response.access_token)
            .await?;

        let user = match self.user_repo.find_by_email(&profile.email).await? {
            Some(existing) => {
                log::info!("기존 회원 카카오 로그인 - email: {}", existing.email);
                existing
            }
            None => {
                let fresh = User::new_kakao(
                    profile.email.clone(),
                    profile.display_name,
                    profile.avatar_url,
                    token_response.access_token.clone(),
                );

                match self.user_repo.create(fresh).await {
                    Ok(created) => {
                        log::info!("새 카카오 회원 등록 - email: {}", created.email);
                        created
                    }
                    // 같은 계정의 첫 로그인이 동시에 들어온 경우. 인덱스가
                    // 한 쪽만 통과시키므로 진 쪽은 이긴 쪽의 계정을 재사용한다
                    Err(AppError::DuplicateEmail(_)) => self.user_repo
                        .find_by_email(&profile.email)
                        .await?
                        .ok_or_else(|| {
                            AppError::InternalError("중복 가입 경합 후 회원 조회 실패".to_string())
                        })?,
                    Err(e) => return Err(e),
                }
            }
        };

        self.issue_session(user, Some(&token_response.access_token)).await
    }

    /// 로그아웃
    ///
    /// 소셜 세션이 있으면 프로바이더 폐기를 먼저 시도하지만, 그 성패와
    /// 무관하게 로컬 세션은 항상 종료됩니다. 프로바이더 폐기 실패는
    /// 응답의 `provider_revoked` 로만 드러나는 부분 성공입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UserNotFound` - 존재하지 않는 회원
    pub async fn logout(&self, user_id: &str) -> Result<LogoutResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        let (provider_revoked, provider_response) = match user.provider_access_token.as_deref() {
            // 순수 로컬 세션. 폐기할 프로바이더 토큰이 없다
            None => (true, None),
            Some(provider_token) => match self.kakao_auth_service.revoke(provider_token).await {
                Ok(body) => (true, Some(body)),
                Err(e) => {
                    log::warn!(
                        "프로바이더 토큰 폐기 실패, 로컬 세션만 종료 - user_id: {}, error: {}",
                        user_id, e
                    );
                    (false, None)
                }
            },
        };

        self.user_repo.clear_session(user_id).await?;

        log::info!("로그아웃 완료 - user_id: {}", user_id);

        Ok(LogoutResponse {
            provider_revoked,
            provider_response,
            message: "로그아웃 되었습니다".to_string(),
        })
    }

    /// 토큰 쌍 발급과 세션 기록
    ///
    /// 리프레시 토큰의 만료 시점은 토큰 자신의 `exp` 에서 추출해
    /// 회원 문서에 함께 기록합니다. 토큰과 만료 시점이 항상 한 번의
    /// 원자 업데이트로 같이 쓰이도록 이 경로 하나로만 세션을 만듭니다.
    async fn issue_session(
        &self,
        user: User,
        provider_access_token: Option<&str>,
    ) -> Result<LoginResponse, AppError> {
        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("회원 ID가 없습니다".to_string())
        })?;

        let token_pair = self.token_service.generate_token_pair(&user)?;

        let expiry = self.token_service
            .expiry_of(&token_pair.refresh_token)
            .map_err(|e| AppError::InternalError(format!("리프레시 토큰 만료 시점 추출 실패: {}", e)))?;
        let expiry = DateTime::from_millis(expiry.timestamp_millis());

        let stored = match provider_access_token {
            Some(provider_token) => {
                self.user_repo
                    .update_provider_session(&user_id, provider_token, &token_pair.refresh_token, expiry)
                    .await?
            }
            None => {
                self.user_repo
                    .update_session(&user_id, &token_pair.refresh_token, expiry)
                    .await?
            }
        }
        .ok_or(AppError::UserNotFound(user_id))?;

        Ok(LoginResponse::new(
            stored,
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
        ))
    }
}
