//! # Post HTTP Handlers
//!
//! `/posts` 스코프의 엔드포인트입니다. 스코프 전체가 `AuthMiddleware::required()`로
//! 보호됩니다.
//!
//! 고정 경로(`/search`, `/ownership`, `/creator/...`, `/user/...`)는 `/{id}`보다
//! 먼저 등록해야 합니다.

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use crate::{
    config::UploadConfig,
    domain::dto::page::PageRequest,
    domain::dto::posts::request::{CreatorQuery, OwnershipQuery, PageQuery, PostListQuery, PostRequest, PostSearchQuery},
    domain::models::auth::authenticated_user::AuthenticatedUser,
    errors::errors::AppError,
    services::posts::PostService,
    utils::multipart::{FormData, FormLimits},
};

const MEDIA_FIELD: &str = "mediaFile";

fn upload_limits() -> FormLimits {
    FormLimits::new(&[MEDIA_FIELD], UploadConfig::max_upload_bytes())
}

/// 게시글 작성
///
/// ```bash
/// curl -X POST http://localhost:8080/posts \
///   -H "Authorization: Bearer $TOKEN" \
///   -F title=Hello -F text=World -F tags=rust,actix -F mediaFile=@clip.mp4
/// ```
#[post("")]
pub async fn create_post(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
    let mut form = FormData::read(payload, &upload_limits()).await?;
    let request = PostRequest::from_form(&form)?;
    let media = form.take_file(MEDIA_FIELD);

    let response = PostService::instance().create(&user, request, media).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_posts(
    user: AuthenticatedUser,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::of(query.page, query.size)?;

    let response = PostService::instance()
        .list(&user, query.search_criteria.as_deref(), page)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/search")]
pub async fn search_posts(
    user: AuthenticatedUser,
    query: web::Query<PostSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::of(query.page, query.size)?;

    let response = PostService::instance().search(&user, &query.keyword, page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/ownership")]
pub async fn check_ownership(
    _user: AuthenticatedUser,
    query: web::Query<OwnershipQuery>,
) -> Result<HttpResponse, AppError> {
    let is_owner = PostService::instance()
        .is_owner(&query.post_id, &query.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(is_owner))
}

#[get("/creator/{creator_id}")]
pub async fn posts_by_creator(
    user: AuthenticatedUser,
    creator_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().by_creator(&user, &creator_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// `page`/`size`가 주어지면 페이지로, 아니면 전체 목록으로 응답
#[get("/user/{user_id}")]
pub async fn posts_by_user(
    user: AuthenticatedUser,
    user_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = PostService::instance();

    if query.page.is_none() && query.size.is_none() {
        let response = service.by_creator(&user, &user_id).await?;
        return Ok(HttpResponse::Ok().json(response));
    }

    let page = PageRequest::of(query.page, query.size)?;
    let response = service.page_by_creator(&user, &user_id, page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/creator/delete")]
pub async fn delete_posts_by_creator(
    user: AuthenticatedUser,
    query: web::Query<CreatorQuery>,
) -> Result<HttpResponse, AppError> {
    PostService::instance()
        .delete_all_by_creator(&user, &query.creator_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Deleted successfully" })))
}

#[delete("/user/{user_id}")]
pub async fn delete_posts_by_user(
    user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = PostService::instance()
        .delete_all_posts_by_user(&user, &user_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Deleted successfully",
        "deleted": deleted,
    })))
}

#[get("/{id}")]
pub async fn get_post(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().get(&user, &id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/{id}")]
pub async fn update_post(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut form = FormData::read(payload, &upload_limits()).await?;
    let request = PostRequest::from_form(&form)?;
    let media = form.take_file(MEDIA_FIELD);

    let response = PostService::instance().update(&user, &id, request, media).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
pub async fn delete_post(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    PostService::instance().delete(&user, &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Post deleted successfully" })))
}

#[post("/{id}/like")]
pub async fn like_post(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().like(&user, &id).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// `/posts` 스코프에 핸들러 등록
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_post)
        .service(list_posts)
        .service(search_posts)
        .service(check_ownership)
        .service(posts_by_creator)
        .service(posts_by_user)
        .service(delete_posts_by_creator)
        .service(delete_posts_by_user)
        .service(get_post)
        .service(update_post)
        .service(delete_post)
        .service(like_post);
}
