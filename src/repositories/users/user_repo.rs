//! # User Repository
//!
//! `users` 컬렉션 접근과 Redis 캐시를 담당합니다.
//!
//! - 조회: id / email 단건 조회는 Redis(600초)를 먼저 확인하는 read-through 캐시
//! - 쓰기: 저장/삭제 후 해당 사용자의 id, email 캐시 키를 무효화
//! - 검색: 조건 문서를 받아 `updatedAt` 내림차순 페이지 조회
//!
//! 이메일 유일성은 `email_unique` 인덱스가 최종적으로 보장하며, 중복 키 에러는
//! `ConflictError`로 변환됩니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::dto::page::PageRequest,
    domain::dto::users::request::UserSearchQuery,
    domain::entities::users::user::User,
};
use crate::errors::errors::AppError;
use crate::utils::string_utils::{contains_pattern, split_list};

const USER_CACHE_TTL_SECS: usize = 600;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

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
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    /// 캐시를 거치지 않고 이메일 사용 여부를 확인합니다.
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    pub async fn create(&self, user: User) -> Result<User, AppError> {
        if self.exists_by_email(&user.email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }

        self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    /// 문서 전체를 교체합니다. 이메일이 바뀌었다면 이전 이메일 캐시도 지웁니다.
    pub async fn replace(&self, user: &User, previous_email: Option<&str>) -> Result<(), AppError> {
        let result = self.collection::<User>()
            .replace_one(doc! { "_id": user.id.as_str() }, user)
            .await
            .map_err(map_write_error)?;

        self.evict(&user.id, &user.email, previous_email).await;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete(&self, user: &User) -> Result<bool, AppError> {
        let result = self.collection::<User>()
            .delete_one(doc! { "_id": user.id.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.evict(&user.id, &user.email, None).await;

        Ok(result.deleted_count > 0)
    }

    /// 조건에 맞는 사용자 한 페이지와 전체 건수
    pub async fn search(&self, filter: Document, page: PageRequest) -> Result<(Vec<User>, u64), AppError> {
        let collection = self.collection::<User>();

        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let users: Vec<User> = collection
            .find(filter)
            .sort(doc! { "updatedAt": -1 })
            .skip(page.skip())
            .limit(page.limit())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((users, total))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let updated_at_index = IndexModel::builder()
            .keys(doc! { "updatedAt": -1 })
            .options(IndexOptions::builder()
                .name("updated_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, updated_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn evict(&self, id: &str, email: &str, previous_email: Option<&str>) {
        let _ = self.invalidate_cache(id).await;

        let mut keys = vec![Self::email_cache_key(email)];
        if let Some(previous) = previous_email.filter(|p| *p != email) {
            keys.push(Self::email_cache_key(previous));
        }
        let _ = self.redis.del_multiple(&keys).await;
    }
}

/// 검색 조건 → MongoDB 필터
///
/// - `name`: 대소문자 무시 부분 일치 (입력은 정규식 이스케이프)
/// - `email`, `gender`: 정확히 일치
/// - `dateOfBirth`: 이상 (ISO 문자열 비교)
/// - `country`, `stateOrProvince`, `city`: 주소 필드 정확히 일치
/// - `otherWebsites`: 하나라도 포함
pub fn build_search_filter(query: &UserSearchQuery) -> Document {
    let mut filter = Document::new();

    if let Some(name) = &query.name {
        filter.insert("name", doc! { "$regex": contains_pattern(name), "$options": "i" });
    }
    if let Some(email) = &query.email {
        filter.insert("email", email.to_lowercase());
    }
    if let Some(gender) = &query.gender {
        filter.insert("gender", gender.as_str());
    }
    if let Some(date_of_birth) = &query.date_of_birth {
        filter.insert("dateOfBirth", doc! { "$gte": date_of_birth.as_str() });
    }
    if let Some(country) = &query.country {
        filter.insert("address.country", country.as_str());
    }
    if let Some(state) = &query.state_or_province {
        filter.insert("address.stateOrProvince", state.as_str());
    }
    if let Some(city) = &query.city {
        filter.insert("address.city", city.as_str());
    }
    if let Some(websites) = &query.other_websites {
        let websites = split_list([websites]);
        if !websites.is_empty() {
            filter.insert("otherWebsites", doc! { "$in": websites });
        }
    }

    filter
}

fn map_write_error(e: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&e) {
        AppError::ConflictError("Email is already in use".to_string())
    } else {
        AppError::DatabaseError(e.to_string())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(build_search_filter(&UserSearchQuery::default()).is_empty());
    }

    #[test]
    fn test_filter_fields() {
        let query = UserSearchQuery {
            name: Some("al.ce".into()),
            email: Some("Alice@Example.com".into()),
            date_of_birth: Some("1990-01-01".into()),
            state_or_province: Some("NSW".into()),
            other_websites: Some("https://a.dev, https://b.dev".into()),
            ..Default::default()
        };

        let filter = build_search_filter(&query);

        assert_eq!(
            filter.get_document("name").unwrap(),
            &doc! { "$regex": "al\\.ce", "$options": "i" }
        );
        assert_eq!(filter.get_str("email").unwrap(), "alice@example.com");
        assert_eq!(filter.get_document("dateOfBirth").unwrap(), &doc! { "$gte": "1990-01-01" });
        assert_eq!(filter.get_str("address.stateOrProvince").unwrap(), "NSW");
        assert_eq!(
            filter.get_document("otherWebsites").unwrap(),
            &doc! { "$in": ["https://a.dev", "https://b.dev"] }
        );
        assert!(!filter.contains_key("gender"));
    }

    #[test]
    fn test_email_cache_key() {
        assert_eq!(UserRepository::email_cache_key("a@b.c"), "user:email:a@b.c");
    }
}
