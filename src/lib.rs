//! 회원 인증 서비스 백엔드
//!
//! JWT 토큰 기반 인증, 카카오 OAuth 2.0 소셜 로그인, 회원 등급 관리,
//! 그리고 싱글톤 매크로를 활용한 의존성 주입을 제공하는
//! 인증/세션 수명주기 백엔드입니다.
//!
//! # Features
//!
//! - **회원 관리**: 로컬 가입, 이메일 중복 확인, 프로필 조회
//! - **JWT 인증**: 액세스/리프레시 토큰 기반 상태 없는 인증
//! - **세션 수명주기**: 회원당 단일 세션, 만료 시점 영속화, 갱신과 로그아웃
//! - **OAuth 2.0**: 카카오 소셜 로그인과 로컬 계정 연결
//! - **등급 관리**: 일반 → 프리미엄 단방향 등급 상승
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 회원 데이터 영구 저장
//! - **Redis**: 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 인증/세션 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use member_auth_backend::services::auth::AuthService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let auth_service = AuthService::instance();
//!
//! // 로그인과 토큰 발급
//! let response = auth_service.login("user@example.com", "password").await?;
//! println!("access token: {}", response.access_token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
