//! # 게시글 서비스
//!
//! 게시글 CRUD, 좋아요, 목록/검색과 작성자 단위 정리를 담당합니다.
//! 응답을 만들 때 저장된 오브젝트 키를 presigned URL로 바꾸고,
//! 요청자가 작성자인지(`owner`)를 표시합니다.

use std::sync::Arc;
use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::page::{PageRequest, PageResponse},
        dto::posts::request::PostRequest,
        dto::posts::response::PostResponse,
        entities::posts::post::{Post, PostCreator},
        models::auth::authenticated_user::AuthenticatedUser,
        models::media::uploaded_file::UploadedFile,
    },
    repositories::posts::post_repo::{text_search_filter, PostContentUpdate, PostRepository},
    services::media::MediaService,
};
use crate::errors::errors::AppError;

#[service(name = "post")]
pub struct PostService {
    post_repo: Arc<PostRepository>,
    media: Arc<MediaService>,
}

impl PostService {
    /// 게시글 작성. 작성자 정보는 토큰에서 가져옵니다.
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: PostRequest,
        media_file: Option<UploadedFile>,
    ) -> Result<PostResponse, AppError> {
        let creator = PostCreator {
            id: caller.user_id.clone(),
            name: caller.name.clone(),
        };
        let mut post = Post::new(request.title, request.text, request.tags, creator);

        if let Some(file) = media_file {
            let (key, media_type) = self.media.store_post_media(file).await?;
            post.replace_media(key, media_type);
        }

        let post = match self.post_repo.create(post.clone()).await {
            Ok(created) => created,
            Err(e) => {
                if let Some(key) = &post.media_url {
                    self.media.delete_quietly(key).await;
                }
                return Err(e);
            }
        };

        info!("📝 게시글 작성: {} by {}", post.id_string().unwrap_or_default(), caller.user_id);
        Ok(self.to_response(post, Some(&caller.user_id)).await)
    }

    /// 최신순 목록. 검색어가 있으면 제목/본문/태그에서 찾습니다.
    pub async fn list(
        &self,
        viewer: &AuthenticatedUser,
        search_criteria: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<PostResponse>, AppError> {
        let filter = search_criteria.map(text_search_filter).unwrap_or_default();
        self.page_of(filter, page, viewer).await
    }

    pub async fn search(
        &self,
        viewer: &AuthenticatedUser,
        keyword: &str,
        page: PageRequest,
    ) -> Result<PageResponse<PostResponse>, AppError> {
        self.page_of(text_search_filter(keyword), page, viewer).await
    }

    pub async fn get(&self, viewer: &AuthenticatedUser, id: &str) -> Result<PostResponse, AppError> {
        let post = self.find_post(&parse_post_id(id)?).await?;
        Ok(self.to_response(post, Some(&viewer.user_id)).await)
    }

    /// 게시글 수정 (작성자만)
    ///
    /// 새 파일이 오면 기존 미디어를 교체하고, 없으면 기존 미디어를 유지합니다.
    /// 좋아요 수는 저장소의 값을 그대로 둡니다.
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: &str,
        request: PostRequest,
        media_file: Option<UploadedFile>,
    ) -> Result<PostResponse, AppError> {
        let object_id = parse_post_id(id)?;
        let existing = self.find_post(&object_id).await?;
        ensure_creator(&existing, caller)?;

        let media = match media_file {
            Some(file) => Some(self.media.store_post_media(file).await?),
            None => None,
        };
        let new_key = media.as_ref().map(|(key, _)| key.clone());

        let content = PostContentUpdate {
            title: request.title,
            text: request.text,
            tags: request.tags,
            media,
        };

        let result = self
            .post_repo
            .update_content(&object_id, content)
            .await
            .and_then(|updated| updated.ok_or_else(post_not_found));

        let updated = match result {
            Ok(post) => post,
            Err(e) => {
                // 새로 올린 미디어가 고아가 되지 않도록 정리
                if let Some(key) = &new_key {
                    self.media.delete_quietly(key).await;
                }
                return Err(e);
            }
        };

        if let (Some(old_key), Some(_)) = (&existing.media_url, &new_key) {
            self.media.delete_quietly(old_key).await;
        }

        Ok(self.to_response(updated, Some(&caller.user_id)).await)
    }

    /// 게시글 삭제 (작성자만). 미디어를 먼저 지우고 문서를 지웁니다.
    pub async fn delete(&self, caller: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        let object_id = parse_post_id(id)?;
        let post = self.find_post(&object_id).await?;
        ensure_creator(&post, caller)?;

        if let Some(key) = &post.media_url {
            self.media.delete(key).await?;
        }

        if !self.post_repo.delete_by_id(&object_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        info!("🗑️ 게시글 삭제: {} by {}", id, caller.user_id);
        Ok(())
    }

    pub async fn like(&self, viewer: &AuthenticatedUser, id: &str) -> Result<PostResponse, AppError> {
        let post = self
            .post_repo
            .increment_likes(&parse_post_id(id)?)
            .await?
            .ok_or_else(post_not_found)?;

        Ok(self.to_response(post, Some(&viewer.user_id)).await)
    }

    /// 작성자의 모든 게시글 (최신순)
    pub async fn by_creator(&self, viewer: &AuthenticatedUser, creator_id: &str) -> Result<Vec<PostResponse>, AppError> {
        let posts = self.post_repo.find_all_by_creator(creator_id).await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            responses.push(self.to_response(post, Some(&viewer.user_id)).await);
        }
        Ok(responses)
    }

    pub async fn page_by_creator(
        &self,
        viewer: &AuthenticatedUser,
        creator_id: &str,
        page: PageRequest,
    ) -> Result<PageResponse<PostResponse>, AppError> {
        self.page_of(doc! { "creator.id": creator_id }, page, viewer).await
    }

    /// `DELETE /posts/creator/delete`: 본인 게시글 전체와 미디어 삭제
    pub async fn delete_all_by_creator(&self, caller: &AuthenticatedUser, creator_id: &str) -> Result<u64, AppError> {
        caller.ensure_self(creator_id).map_err(|_| forbidden_bulk_delete())?;
        self.purge_creator(creator_id).await
    }

    /// `DELETE /posts/user/{userId}`
    pub async fn delete_all_posts_by_user(&self, caller: &AuthenticatedUser, user_id: &str) -> Result<u64, AppError> {
        if caller.user_id != user_id {
            return Err(forbidden_bulk_delete());
        }
        self.purge_creator(user_id).await
    }

    /// 게시글이 존재하고 작성자가 `user_id`인지. 잘못된 id는 `false`.
    pub async fn is_owner(&self, post_id: &str, user_id: &str) -> Result<bool, AppError> {
        let Ok(object_id) = ObjectId::parse_str(post_id) else {
            return Ok(false);
        };

        Ok(self
            .post_repo
            .find_by_id(&object_id)
            .await?
            .is_some_and(|post| post.is_created_by(user_id)))
    }

    async fn purge_creator(&self, creator_id: &str) -> Result<u64, AppError> {
        let posts = self.post_repo.find_all_by_creator(creator_id).await?;

        for key in posts.iter().filter_map(|post| post.media_url.as_deref()) {
            if let Err(e) = self.media.delete(key).await {
                warn!("⚠️ 게시글 미디어 삭제 실패, 계속 진행: {} - {}", key, e);
            }
        }

        let deleted = self.post_repo.delete_all_by_creator(creator_id).await?;
        info!("🗑️ 작성자 게시글 일괄 삭제: {} ({}개)", creator_id, deleted);
        Ok(deleted)
    }

    async fn find_post(&self, id: &ObjectId) -> Result<Post, AppError> {
        self.post_repo.find_by_id(id).await?.ok_or_else(post_not_found)
    }

    async fn page_of(
        &self,
        filter: Document,
        page: PageRequest,
        viewer: &AuthenticatedUser,
    ) -> Result<PageResponse<PostResponse>, AppError> {
        let (posts, total) = self.post_repo.find_page(filter, page).await?;

        let mut content = Vec::with_capacity(posts.len());
        for post in posts {
            content.push(self.to_response(post, Some(&viewer.user_id)).await);
        }

        Ok(PageResponse::new(content, page, total))
    }

    async fn to_response(&self, post: Post, viewer_id: Option<&str>) -> PostResponse {
        let media_url = self.media.presigned_opt(post.media_url.as_deref()).await;
        let creator_photo = self.media.presigned_profile_photo(&post.creator.id).await;

        PostResponse::from_post(post, media_url, creator_photo, viewer_id)
    }
}

/// 24자리 hex가 아니면 400
pub fn parse_post_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError(format!("Invalid post id: {}", id)))
}

fn ensure_creator(post: &Post, caller: &AuthenticatedUser) -> Result<(), AppError> {
    if post.is_created_by(&caller.user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(
            "You do not have permission to modify this post".to_string(),
        ))
    }
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

fn forbidden_bulk_delete() -> AppError {
    AppError::AuthorizationError("You do not have permission to delete these posts".to_string())
}
