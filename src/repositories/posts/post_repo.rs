//! # Post Repository
//!
//! `posts` 컬렉션 접근을 담당합니다. 단건 조회는 60초 동안 Redis에 캐시하고,
//! 수정/좋아요/삭제 시 해당 키를 무효화합니다. 수정은 문서 전체를 덮어쓰지 않고
//! 바뀐 필드만 `$set`합니다. 목록 조회는 캐시하지 않습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::dto::page::PageRequest,
    domain::entities::posts::media_type::MediaType,
    domain::entities::posts::post::Post,
};
use crate::errors::errors::AppError;
use crate::utils::string_utils::contains_pattern;

const POST_CACHE_TTL_SECS: usize = 60;

#[repository(name = "post", collection = "posts")]
pub struct PostRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PostRepository {
    pub async fn create(&self, mut post: Post) -> Result<Post, AppError> {
        let result = self.collection::<Post>()
            .insert_one(&post)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("insert did not return an ObjectId".to_string())
        })?;
        post.id = Some(id);

        Ok(post)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<Post>(&cache_key).await {
            return Ok(Some(cached));
        }

        let post = self.collection::<Post>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref post) = post {
            let _ = self.redis
                .set_with_expiry(&cache_key, post, POST_CACHE_TTL_SECS)
                .await;
        }

        Ok(post)
    }

    /// 최신순 한 페이지와 전체 건수
    pub async fn find_page(&self, filter: Document, page: PageRequest) -> Result<(Vec<Post>, u64), AppError> {
        let collection = self.collection::<Post>();

        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let posts: Vec<Post> = collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .skip(page.skip())
            .limit(page.limit())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((posts, total))
    }

    /// 작성자의 모든 게시글 (최신순)
    pub async fn find_all_by_creator(&self, creator_id: &str) -> Result<Vec<Post>, AppError> {
        self.collection::<Post>()
            .find(doc! { "creator.id": creator_id })
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 제목/본문/태그(와 새 미디어)만 `$set`으로 갱신하고 갱신된 문서를 반환합니다.
    ///
    /// `likes`는 건드리지 않으므로 동시에 들어온 좋아요가 덮어써지지 않습니다.
    pub async fn update_content(
        &self,
        id: &ObjectId,
        content: PostContentUpdate,
    ) -> Result<Option<Post>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Post>()
            .find_one_and_update(doc! { "_id": *id }, content.to_update())
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(&id.to_hex()).await;

        Ok(updated)
    }

    /// 좋아요 수를 원자적으로 1 증가시키고 갱신된 문서를 반환합니다.
    pub async fn increment_likes(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Post>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$inc": { "likes": 1 } })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(&id.to_hex()).await;

        Ok(updated)
    }

    pub async fn delete_by_id(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Post>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.invalidate_cache(&id.to_hex()).await;

        Ok(result.deleted_count > 0)
    }

    /// 작성자의 게시글을 모두 삭제하고 삭제 건수를 반환합니다.
    pub async fn delete_all_by_creator(&self, creator_id: &str) -> Result<u64, AppError> {
        let filter = doc! { "creator.id": creator_id };
        let collection = self.collection::<Document>();

        // 캐시 무효화를 위해 삭제 전에 id를 모은다
        let ids: Vec<ObjectId> = collection
            .find(filter.clone())
            .projection(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .iter()
            .filter_map(|document| document.get_object_id("_id").ok())
            .collect();

        let result = collection
            .delete_many(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let keys: Vec<String> = ids.iter().map(|id| self.cache_key(&id.to_hex())).collect();
        let _ = self.redis.del_multiple(&keys).await;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "creator.id": 1, "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("creator_created_at".to_string())
                .build())
            .build();

        self.collection::<Post>()
            .create_indexes([created_at_index, creator_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 게시글 수정 시 바뀌는 필드
#[derive(Debug, Clone)]
pub struct PostContentUpdate {
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    /// 새로 올린 미디어 키와 종류. `None`이면 기존 미디어 유지
    pub media: Option<(String, MediaType)>,
}

impl PostContentUpdate {
    pub fn to_update(&self) -> Document {
        let mut set = doc! {
            "title": self.title.as_str(),
            "text": self.text.as_str(),
            "tags": self.tags.clone(),
        };

        if let Some((key, media_type)) = &self.media {
            set.insert("mediaUrl", key.as_str());
            set.insert("mediaType", media_type.as_str());
        }

        doc! { "$set": set }
    }
}

/// 제목, 본문, 태그 중 하나라도 키워드를 포함 (대소문자 무시)
pub fn text_search_filter(keyword: &str) -> Document {
    let pattern = contains_pattern(keyword);
    if pattern.is_empty() {
        return Document::new();
    }

    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "text": { "$regex": pattern.as_str(), "$options": "i" } },
            { "tags": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}
