//! 비밀번호 해싱 서비스 구현
//!
//! bcrypt 기반의 단방향 해싱과 검증을 제공합니다. bcrypt 는 호출마다
//! 새로운 솔트를 생성하므로 같은 비밀번호라도 저장되는 해시는 매번
//! 다르며, 검증은 불일치 위치와 무관하게 일정한 시간이 걸립니다.

use singleton_macro::service;
use crate::config::PasswordConfig;
use crate::errors::errors::AppError;

/// 비밀번호 해싱 서비스
///
/// cost 는 환경 설정을 따릅니다. 비밀번호 원문은 해싱 호출 이후
/// 어디에도 남기지 않습니다.
#[service(name = "password")]
pub struct PasswordService {
    // 외부 의존성 없음
}

impl PasswordService {
    /// 비밀번호를 해싱합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - bcrypt 해싱 실패
    pub fn hash(&self, raw_password: &str) -> Result<String, AppError> {
        let cost = PasswordConfig::bcrypt_cost();

        bcrypt::hash(raw_password, cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 비밀번호가 저장된 해시와 일치하는지 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 해시 형식 오류 등 검증 자체의 실패.
    ///   단순 불일치는 `Ok(false)` 입니다.
    pub fn verify(&self, raw_password: &str, password_hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(raw_password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_per_call() {
        let service = PasswordService::instance();

        let first = service.hash("pw123456").unwrap();
        let second = service.hash("pw123456").unwrap();

        // 같은 입력이라도 솔트가 달라 해시가 다르다
        assert_ne!(first, second);
        assert!(service.verify("pw123456", &first).unwrap());
        assert!(service.verify("pw123456", &second).unwrap());
    }

    #[test]
    fn test_wrong_password_never_verifies() {
        let service = PasswordService::instance();

        let hash = service.hash("pw123456").unwrap();

        assert!(!service.verify("wrong", &hash).unwrap());
        assert!(!service.verify("pw1234567", &hash).unwrap());
        assert!(!service.verify("", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        let service = PasswordService::instance();

        assert!(service.verify("pw123456", "not-a-bcrypt-hash").is_err());
    }
}
