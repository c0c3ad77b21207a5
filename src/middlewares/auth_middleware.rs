//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 토큰을 검증하고 회원 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::authentication_request::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 등급 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 등급 요구사항이 있는 인증 미들웨어 생성
    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 등급 요구 인증 미들웨어 생성
    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    /// 복수 등급 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: Vec<Role>) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(roles))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}


#[cfg(test)]
mod tests {
    use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
    use super::*;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single(Role::Premium);

        assert!(required.is_satisfied(Role::Premium));
        assert!(!required.is_satisfied(Role::Common));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec![Role::Common, Role::Premium]);

        assert!(required.is_satisfied(Role::Common));
        assert!(required.is_satisfied(Role::Premium));

        let premium_only = RequiredRole::Any(vec![Role::Premium]);
        assert!(!premium_only.is_satisfied(Role::Common));
    }

    #[test]
    fn test_authenticated_user_role_checks() {
        let common = AuthenticatedUser {
            user_id: "test_id".to_string(),
            role: Role::Common,
        };
        let premium = AuthenticatedUser {
            user_id: "test_id".to_string(),
            role: Role::Premium,
        };

        assert!(common.has_role(Role::Common));
        assert!(!common.is_premium());
        assert!(premium.is_premium());
    }
}
