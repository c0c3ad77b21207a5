//! 외부 OAuth 프로바이더 연동 모델

pub mod kakao;
