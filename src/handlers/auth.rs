//! 인증 HTTP 핸들러
//!
//! 로컬 로그인, 토큰 갱신, 카카오 소셜 로그인, 등급 상승, 로그아웃
//! 엔드포인트를 처리합니다. 핸들러는 요청 해석과 응답 변환만 담당하고
//! 모든 판단은 `AuthService` 에 위임합니다.

use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest};
use crate::errors::errors::AppError;
use crate::services::auth::{AuthService, KakaoAuthService, TokenService};

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn local_login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    let response = auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 액세스 토큰 갱신 핸들러
///
/// 리프레시 토큰은 쿠키 또는 요청 본문으로 전달받습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh_token(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let auth_service = AuthService::instance();

    let rt = extract_refresh_token(&req, body.as_deref())?;

    let response = auth_service.renew_access_token(&rt).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 카카오 로그인 URL 생성 핸들러
///
/// # Endpoint
/// `GET /api/v1/auth/kakao`
#[get("/kakao")]
pub async fn kakao_login_url() -> Result<HttpResponse, AppError> {
    let kakao_service = KakaoAuthService::instance();
    let url_response = kakao_service.get_login_url()?;

    Ok(HttpResponse::Ok().json(url_response))
}

/// 카카오 OAuth 콜백 처리 핸들러
///
/// # Endpoint
/// `GET /api/v1/auth/kakao/callback?code={code}&state={state}`
#[get("/kakao/callback")]
pub async fn kakao_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("카카오 OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    // 유효성 검사
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    let response = auth_service.kakao_login(&query.code, &query.state).await?;

    log::info!("카카오 로그인 성공 - email: {}", response.user.email);
    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 검증 엔드포인트
///
/// 클라이언트가 보유한 액세스 토큰의 유효성을 확인합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/verify`
#[post("/verify")]
pub async fn verify_token(
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "user_id": claims.sub,
        "role": claims.role
    })))
}

/// 등급 상승 핸들러
///
/// 미들웨어가 검증한 토큰의 주체와 그 토큰이 담고 있던 등급을
/// 기준으로 상승을 시도합니다. 성공 시 새 등급이 반영된 토큰 쌍이
/// 함께 내려갑니다.
///
/// # Endpoint
/// `PUT /api/v1/me/promote`
#[put("/promote")]
pub async fn promote(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let auth_service = AuthService::instance();

    let response = auth_service.promote(&user.user_id, user.role).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /api/v1/me/logout`
#[post("/logout")]
pub async fn logout(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let auth_service = AuthService::instance();

    let response = auth_service.logout(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// HTTP 요청에서 리프레시 토큰 추출
fn extract_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> Result<String, AppError> {
    // 1. 쿠키에서 리프레시 토큰 찾기
    if let Some(cookie_header) = req.headers().get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie_pair in cookie_str.split(';') {
                let cookie_pair = cookie_pair.trim();
                if let Some((name, value)) = cookie_pair.split_once('=') {
                    if name.trim() == "refresh_token" {
                        let token = value.trim();
                        if !token.is_empty() {
                            return Ok(token.to_string());
                        }
                    }
                }
            }
        }
    }

    // 2. 요청 본문에서 리프레시 토큰 찾기
    if let Some(body) = body {
        if !body.refresh_token.is_empty() {
            return Ok(body.refresh_token.clone());
        }
    }

    // 3. 토큰을 찾을 수 없음
    Err(AppError::AuthenticationError(
        "리프레시 토큰이 제공되지 않았습니다".to_string()
    ))
}
