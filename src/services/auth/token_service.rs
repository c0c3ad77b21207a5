//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//! HMAC-SHA256 서명을 사용하며, 클레임은 서명 검증을 통과한 뒤에만
//! 읽을 수 있습니다. 검증 실패는 원인별로 구분된 타입으로 반환되어
//! 호출부가 실패 종류에 따라 다르게 반응할 수 있습니다.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use thiserror::Error;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    domain::entities::users::user::User,
};
use crate::domain::models::token::token::{TokenClaims, TokenPair};
use crate::errors::errors::AppError;

/// 토큰 검증 실패 원인
///
/// 서명이 깨진 토큰과 수명이 다한 토큰은 전혀 다른 상황이므로
/// 하나의 "검증 실패" 로 뭉개지 않습니다.
#[derive(Error, Debug, PartialEq)]
pub enum TokenValidationError {
    /// JWT 형식 자체가 아니거나 해석할 수 없는 토큰
    #[error("malformed token")]
    Malformed,
    /// 서명이 일치하지 않는 토큰
    #[error("invalid token signature")]
    SignatureInvalid,
    /// 서명은 유효하지만 만료된 토큰
    #[error("expired token")]
    Expired,
}

impl From<TokenValidationError> for AppError {
    fn from(err: TokenValidationError) -> Self {
        match err {
            TokenValidationError::Expired => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            TokenValidationError::SignatureInvalid => {
                AppError::AuthenticationError("토큰 서명이 유효하지 않습니다".to_string())
            }
            TokenValidationError::Malformed => {
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
        }
    }
}

/// JWT 토큰 관리 서비스
///
/// 액세스 토큰은 시간 단위, 리프레시 토큰은 주 단위의 수명을 가집니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 회원을 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 회원 ID 없음
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("회원 ID가 없습니다".to_string())
            })?,
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: None,
        };

        self.encode_claims(&claims)
    }

    /// 회원을 위한 리프레시 토큰 생성
    ///
    /// `jti` 클레임을 부여해 같은 회원에게 같은 순간 발급되더라도
    /// 토큰 값이 유일하도록 합니다. 발급된 토큰의 만료 시점은
    /// [`expiry_of`](Self::expiry_of) 로 추출하여 회원 문서에 함께
    /// 기록합니다.
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::days(JwtConfig::refresh_expiration_days());

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("회원 ID가 없습니다".to_string())
            })?,
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        };

        self.encode_claims(&claims)
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user)?;
        let expires_in = JwtConfig::expiration_hours() * 3600; // 초 단위로 변환

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 검증 순서는 항상 서명 → 만료 → 클레임 해석입니다.
    /// 서명이 확인되지 않은 클레임은 절대 반환되지 않습니다.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenValidationError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenValidationError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    TokenValidationError::SignatureInvalid
                }
                _ => TokenValidationError::Malformed,
            })
    }

    /// 토큰의 만료 시점을 추출합니다.
    ///
    /// 서명 검증을 통과한 토큰의 `exp` 클레임만 신뢰합니다.
    pub fn expiry_of(&self, token: &str) -> Result<DateTime<Utc>, TokenValidationError> {
        let claims = self.verify_token(token)?;

        Utc.timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenValidationError::Malformed)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서
    /// 토큰 부분만을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        if auth_header.starts_with("Bearer ") {
            Ok(&auth_header[7..])
        } else {
            Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
        }
    }

    fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AppError> {
        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::users::user::Role;

    fn sample_user() -> User {
        let mut user = User::new_local(
            "a@x.com".to_string(),
            "Al".to_string(),
            "hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    /// 만료 시점을 직접 지정한 토큰 생성 (만료 케이스 재현용)
    fn encode_with_exp(user: &User, iat: i64, exp: i64) -> String {
        let claims = TokenClaims {
            sub: user.id_string().unwrap(),
            role: user.role,
            iat,
            exp,
            jti: None,
        };
        let secret = JwtConfig::secret();
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = TokenService::instance();
        let user = sample_user();

        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.role, Role::Common);
        assert!(claims.exp > claims.iat);
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_token_pair_tokens_are_distinct() {
        let service = TokenService::instance();
        let user = sample_user();

        let pair = service.generate_token_pair(&user).unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.expires_in, JwtConfig::expiration_hours() * 3600);

        // 리프레시 토큰만 jti 를 가진다
        let refresh_claims = service.verify_token(&pair.refresh_token).unwrap();
        assert!(refresh_claims.jti.is_some());
    }

    #[test]
    fn test_refresh_tokens_are_unique_per_issue() {
        let service = TokenService::instance();
        let user = sample_user();

        let first = service.generate_refresh_token(&user).unwrap();
        let second = service.generate_refresh_token(&user).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_expired_token_fails_with_expired() {
        let service = TokenService::instance();
        let user = sample_user();

        // 검증 leeway 를 훨씬 넘긴 과거 시점에 만료된 토큰
        let now = Utc::now().timestamp();
        let token = encode_with_exp(&user, now - 7200, now - 3600);

        assert_eq!(service.verify_token(&token), Err(TokenValidationError::Expired));
    }

    #[test]
    fn test_tampered_signature_fails_with_signature_invalid() {
        let service = TokenService::instance();
        let user = sample_user();

        let token = service.generate_access_token(&user).unwrap();

        // 페이로드를 한 글자 바꾸면 서명이 더 이상 본문과 일치하지 않는다
        let parts: Vec<&str> = token.split('.').collect();
        let mut payload: String = parts[1].to_string();
        let first = payload.remove(0);
        payload.insert(0, if first == 'e' { 'f' } else { 'e' });
        let tampered = format!("{}.{}.{}", parts[0], payload, parts[2]);

        assert_eq!(
            service.verify_token(&tampered),
            Err(TokenValidationError::SignatureInvalid)
        );
    }

    #[test]
    fn test_garbage_fails_with_malformed() {
        let service = TokenService::instance();

        assert_eq!(
            service.verify_token("not-a-token"),
            Err(TokenValidationError::Malformed)
        );
        assert_eq!(service.verify_token(""), Err(TokenValidationError::Malformed));
    }

    #[test]
    fn test_expiry_of_matches_refresh_lifetime() {
        let service = TokenService::instance();
        let user = sample_user();

        let refresh_token = service.generate_refresh_token(&user).unwrap();
        let expiry = service.expiry_of(&refresh_token).unwrap();

        let expected = Utc::now() + Duration::days(JwtConfig::refresh_expiration_days());
        let drift = (expiry - expected).num_seconds().abs();
        assert!(drift < 60, "expiry drifted {}s from configured lifetime", drift);
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::instance();

        assert_eq!(service.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }
}
