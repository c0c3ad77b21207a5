//! # 회원 리포지토리 구현
//!
//! 회원 엔티티의 데이터 액세스 계층입니다. MongoDB 를 주 저장소로 사용하고
//! Redis 읽기 캐시를 지원합니다.
//!
//! 이메일 유니크 인덱스가 중복 가입의 최종 방어선입니다. 서비스 계층의
//! 사전 중복 검사는 친절한 실패를 위한 것일 뿐이고, 동시에 들어온 동일
//! 가입 요청은 인덱스 위반으로만 걸러낼 수 있습니다.
//!
//! 세션 필드(`refresh_token`, `refresh_token_expiry`,
//! `provider_access_token`)의 변경은 전부 단일 원자 업데이트로 수행합니다.
//! 조회 후 저장하는 두 번의 왕복은 쓰지 않습니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use mongodb::error::{ErrorKind, WriteFailure};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::{Role, User},
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 캐시 TTL (초)
const CACHE_TTL_SECS: usize = 600;

/// 회원 데이터 액세스 리포지토리
///
/// 조회는 캐시 우선, 변경은 원자 업데이트 후 캐시 무효화 순서로
/// 동작합니다. 캐시 계층의 실패는 조회/변경 자체를 실패시키지 않습니다.
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

/// MongoDB 유니크 인덱스 위반(E11000) 여부 판단
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

impl UserRepository {
    /// 이메일 주소로 회원 조회
    ///
    /// # 캐싱 정책
    ///
    /// - 캐시 키: `user:email:{email}`
    /// - TTL: 600초
    /// - 캐시 미스 시 MongoDB 조회 후 캐시에 저장
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    /// ID로 회원 조회
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_object_id(id)?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    /// 리프레시 토큰 값으로 회원 조회
    ///
    /// 세션 검증 경로이므로 캐시를 거치지 않고 항상 저장소를 직접
    /// 조회합니다. 로그아웃이나 재로그인으로 방금 무효화된 토큰이
    /// 캐시에서 살아나는 일을 막기 위함입니다.
    pub async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "refresh_token": refresh_token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일 등록 여부 확인
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    /// 새 회원 생성
    ///
    /// 유니크 인덱스 위반은 사전 검사를 통과한 동시 요청까지 포함해
    /// 전부 `DuplicateEmail` 로 변환됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateEmail` - 이미 등록된 이메일
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::DuplicateEmail(user.email.clone())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 로그인 세션 기록
    ///
    /// 리프레시 토큰과 만료 시점을 한 번의 원자 업데이트로 함께
    /// 기록합니다. 이전 세션이 있었다면 덮어써서 무효화됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 업데이트된 회원
    /// * `Ok(None)` - 해당 ID의 회원이 존재하지 않음
    pub async fn update_session(
        &self,
        id: &str,
        refresh_token: &str,
        expiry: DateTime,
    ) -> Result<Option<User>, AppError> {
        self.apply_update(id, doc! {
            "$set": {
                "refresh_token": refresh_token,
                "refresh_token_expiry": expiry,
                "updated_at": DateTime::now(),
            }
        }).await
    }

    /// 소셜 로그인 세션 기록
    ///
    /// 프로바이더 액세스 토큰까지 포함하여 세션 세 필드를 한 번에
    /// 기록합니다.
    pub async fn update_provider_session(
        &self,
        id: &str,
        provider_access_token: &str,
        refresh_token: &str,
        expiry: DateTime,
    ) -> Result<Option<User>, AppError> {
        self.apply_update(id, doc! {
            "$set": {
                "provider_access_token": provider_access_token,
                "refresh_token": refresh_token,
                "refresh_token_expiry": expiry,
                "updated_at": DateTime::now(),
            }
        }).await
    }

    /// 세션 전체 해제 (로그아웃)
    ///
    /// 리프레시 토큰, 만료 시점, 프로바이더 토큰을 함께 제거합니다.
    pub async fn clear_session(&self, id: &str) -> Result<Option<User>, AppError> {
        self.apply_update(id, doc! {
            "$unset": {
                "refresh_token": "",
                "refresh_token_expiry": "",
                "provider_access_token": "",
            },
            "$set": { "updated_at": DateTime::now() }
        }).await
    }

    /// 등급 변경
    ///
    /// 현재 등급을 필터에 포함한 조건부 업데이트라서, 같은 회원에 대한
    /// 동시 등급 변경은 한 쪽만 성공합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 변경된 회원
    /// * `Ok(None)` - 회원이 없거나 현재 등급이 `from` 과 다름
    pub async fn update_role(&self, id: &str, from: Role, to: Role) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_object_id(id)?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id, "role": from.as_str() },
                doc! { "$set": { "role": to.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated_user {
            self.invalidate_user_cache(id, &user.email).await;
        }

        Ok(updated_user)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출합니다.
    ///
    /// 1. `email` 유니크 인덱스 - 중복 가입의 최종 방어선
    /// 2. `refresh_token` 유니크 sparse 인덱스 - 세션 조회 최적화와
    ///    살아있는 세션 간 토큰 유일성 보장. 세션이 없는 회원 문서에는
    ///    필드 자체가 없으므로 sparse 로 선언합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let refresh_token_index = IndexModel::builder()
            .keys(doc! { "refresh_token": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("refresh_token_unique".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, refresh_token_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 단일 원자 업데이트를 적용하고 갱신된 문서를 돌려줍니다.
    async fn apply_update(
        &self,
        id: &str,
        update: mongodb::bson::Document,
    ) -> Result<Option<User>, AppError> {
        let object_id = Self::parse_object_id(id)?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(doc! { "_id": object_id }, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated_user {
            self.invalidate_user_cache(id, &user.email).await;
        }

        Ok(updated_user)
    }

    /// ID 키와 이메일 키를 함께 무효화
    ///
    /// 이메일 키를 빠뜨리면 세션을 덮어쓴 직후의 이메일 조회가
    /// 낡은 세션 필드를 돌려줄 수 있습니다.
    async fn invalidate_user_cache(&self, id: &str, email: &str) {
        let keys = vec![self.cache_key(id), Self::email_cache_key(email)];
        let _ = self.redis.del_multiple(&keys).await;
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_cache_key_format() {
        assert_eq!(
            UserRepository::email_cache_key("a@x.com"),
            "user:email:a@x.com"
        );
    }

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(UserRepository::parse_object_id("not-an-object-id").is_err());
        assert!(UserRepository::parse_object_id("652f1f77bcf86cd799439011").is_ok());
    }
}
