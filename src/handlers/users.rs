//! 회원 관련 HTTP 핸들러
//!
//! 가입과 프로필 조회 엔드포인트를 처리합니다.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::SignUpRequest;
use crate::errors::errors::AppError;
use crate::services::auth::AuthService;

/// 이메일 중복 확인 쿼리
#[derive(Debug, Deserialize)]
pub struct CheckEmailQuery {
    pub email: String,
}

/// 회원 가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/users`
#[post("")]
pub async fn sign_up(
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    let response = auth_service.sign_up(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 이메일 중복 확인 핸들러
///
/// 가입 폼에서 이메일 입력 직후 사용 가능 여부를 확인할 때 사용합니다.
///
/// # Endpoint
/// `GET /api/v1/users/check?email=user@example.com`
#[get("/check")]
pub async fn check_email(
    query: web::Query<CheckEmailQuery>,
) -> Result<HttpResponse, AppError> {
    let email = query.email.trim();

    if email.is_empty() {
        return Err(AppError::ValidationError("이메일이 없습니다".to_string()));
    }

    let auth_service = AuthService::instance();
    let duplicated = auth_service.check_email(email).await?;

    Ok(HttpResponse::Ok().json(json!({ "duplicated": duplicated })))
}

/// 현재 인증된 회원 정보 조회 핸들러
///
/// 미들웨어가 검증한 토큰의 주체로 최신 회원 정보를 조회합니다.
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let auth_service = AuthService::instance();

    let response = auth_service.find_user(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}
