//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//!
//! # Route Groups
//!
//! ## Public 라우트 (인증 불필요)
//! - `POST /api/v1/users` - 회원 가입
//! - `GET  /api/v1/users/check` - 이메일 중복 확인
//! - `POST /api/v1/auth/login` - 로컬 로그인
//! - `POST /api/v1/auth/refresh` - 액세스 토큰 갱신
//! - `POST /api/v1/auth/verify` - 토큰 유효성 확인
//! - `GET  /api/v1/auth/kakao` - 카카오 로그인 URL 생성
//! - `GET  /api/v1/auth/kakao/callback` - 카카오 콜백 처리
//!
//! ## Protected 라우트 (인증 필요)
//! - `GET  /api/v1/me` - 내 정보 조회
//! - `PUT  /api/v1/me/promote` - 프리미엄 등급 상승
//! - `POST /api/v1/me/logout` - 로그아웃

use crate::domain::entities::users::user::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_user_routes(cfg);
    configure_auth_routes(cfg);
}

/// 회원 관련 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::sign_up)
            .service(handlers::users::check_email)
    );

    // Protected routes - 검증된 주체만 접근
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::required_with_roles(vec![Role::Common, Role::Premium]))
            .service(handlers::users::get_me)
            .service(handlers::auth::promote)
            .service(handlers::auth::logout)
    );
}

/// 인증 관련 라우트를 설정합니다
///
/// 인증을 얻기 위한 엔드포인트이므로 모두 Public 접근이 가능합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 로컬 인증
            .service(handlers::auth::local_login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::verify_token)
            // 카카오 OAuth
            .service(handlers::auth::kakao_login_url)
            .service(handlers::auth::kakao_callback)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "member_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
