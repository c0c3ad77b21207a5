//! 인증 서비스 계층
//!
//! - [`auth_service`] - 가입, 로그인, 갱신, 등급 상승, 카카오 연결, 로그아웃 오케스트레이션
//! - [`token_service`] - JWT 발급과 검증
//! - [`password_service`] - bcrypt 해싱과 검증
//! - [`kakao_auth_service`] - 카카오 프로바이더 게이트웨이

pub mod auth_service;
pub mod token_service;
pub mod password_service;
pub mod kakao_auth_service;

pub use auth_service::AuthService;
pub use token_service::{TokenService, TokenValidationError};
pub use password_service::PasswordService;
pub use kakao_auth_service::KakaoAuthService;
