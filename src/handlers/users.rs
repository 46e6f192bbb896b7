//! # User HTTP Handlers
//!
//! `/user` 스코프의 엔드포인트입니다. 스코프 전체에 `AuthMiddleware::optional()`이
//! 적용되어 있어, 회원가입/로그인은 토큰 없이 호출할 수 있고 나머지 핸들러는
//! `AuthenticatedUser` 추출 단계에서 401로 거부됩니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/user/signup` | 회원가입 (multipart) | 200 OK |
//! | `POST` | `/user/signin` | 로그인 (JSON) | 200 OK |
//! | `GET` | `/user/{id}/user-detail` | 사용자 조회 | 200 OK |
//! | `PUT` | `/user/{id}/update` | 이름/이메일/사진 수정 | 200 OK |
//! | `GET` | `/user/search` | 사용자 검색 (페이징) | 200 OK |
//! | `PUT` | `/user/{id}` | 부분 수정 | 200 OK |
//! | `DELETE` | `/user/{id}` | 회원 탈퇴 | 204 No Content |

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    config::UploadConfig,
    domain::dto::users::request::{LoginRequest, SignupRequest, UpdateProfileRequest, UpdateUserRequest, UserSearchQuery},
    domain::models::auth::authenticated_user::AuthenticatedUser,
    errors::errors::AppError,
    services::users::UserService,
    utils::multipart::{FormData, FormLimits},
};

const PROFILE_PHOTO_FIELD: &str = "profilePhoto";

fn upload_limits() -> FormLimits {
    FormLimits::new(&[PROFILE_PHOTO_FIELD], UploadConfig::max_upload_bytes())
}

/// 회원가입
///
/// ```bash
/// curl -X POST http://localhost:8080/user/signup \
///   -F name=Alice -F email=alice@example.com -F password=password123 \
///   -F profilePhoto=@me.png
/// ```
#[post("/signup")]
pub async fn signup(payload: Multipart) -> Result<HttpResponse, AppError> {
    let mut form = FormData::read(payload, &upload_limits()).await?;
    let request = SignupRequest::from_form(&form)?;
    let photo = form.take_file(PROFILE_PHOTO_FIELD);

    let response = UserService::instance().register(request, photo).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로그인
///
/// ```bash
/// curl -X POST http://localhost:8080/user/signin \
///   -H "Content-Type: application/json" \
///   -d '{"email":"alice@example.com","password":"password123"}'
/// ```
#[post("/signin")]
pub async fn signin(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()?;

    let response = UserService::instance().authenticate(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/search")]
pub async fn search_users(
    _user: AuthenticatedUser,
    query: web::Query<UserSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let page = UserService::instance().search_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}/user-detail")]
pub async fn get_user_detail(
    _user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().get_user(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/{id}/update")]
pub async fn update_profile(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    // 본문을 읽기 전에 권한부터 확인
    user.ensure_self(&id)?;

    let mut form = FormData::read(payload, &upload_limits()).await?;
    let request = UpdateProfileRequest::from_form(&form)?;
    let photo = form.take_file(PROFILE_PHOTO_FIELD);

    let response = UserService::instance()
        .update_profile(&user, &id, request, photo)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/{id}")]
pub async fn update_user(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    user.ensure_self(&id)?;

    let mut form = FormData::read(payload, &upload_limits()).await?;
    let request = UpdateUserRequest::from_form(&form)?;
    let photo = form.take_file(PROFILE_PHOTO_FIELD);

    let response = UserService::instance()
        .update_user(&user, &id, request, photo)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
pub async fn delete_user(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    UserService::instance().delete_user(&user, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `/user` 스코프에 핸들러 등록
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup)
        .service(signin)
        .service(search_users)
        .service(get_user_detail)
        .service(update_profile)
        .service(update_user)
        .service(delete_user);
}
