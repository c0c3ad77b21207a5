//! 인증 미들웨어가 주입하는 회원 식별 정보

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::Role;

/// JWT 토큰에서 추출된 회원 정보
///
/// 등급 변경이나 로그아웃처럼 "이미 검증된 주체" 를 요구하는 연산은
/// 이 구조체를 통해 호출자의 신원을 전달받습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 회원 고유 ID
    pub user_id: String,

    /// 토큰 발급 시점의 회원 등급
    pub role: Role,
}

impl AuthenticatedUser {
    /// 특정 등급인지 확인
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 프리미엄 회원인지 확인
    pub fn is_premium(&self) -> bool {
        self.has_role(Role::Premium)
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
