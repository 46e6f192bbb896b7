//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 프로필 조회/수정/검색, 탈퇴를 담당합니다.
//!
//! ```text
//! UserService
//!  ├─ UserRepository   users 컬렉션 + Redis 캐시
//!  ├─ PostRepository   탈퇴 시 작성 게시글 정리
//!  ├─ MediaService     프로필 사진 / 게시글 미디어
//!  └─ TokenService     로그인 토큰 발급
//! ```
//!
//! 수정과 삭제는 본인만 할 수 있으며, 위반 시 `AuthorizationError`(403)를 반환합니다.

use std::sync::Arc;
use std::time::Instant;
use bcrypt::{hash, verify};
use log::{info, warn};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    domain::{
        dto::page::{PageRequest, PageResponse},
        dto::users::request::{LoginRequest, SignupRequest, UpdateProfileRequest, UpdateUserRequest, UserSearchQuery},
        dto::users::request::signup_request::normalize_email,
        dto::users::response::{LoginResponse, UserDetailResponse, UserResponse},
        entities::users::user::User,
        models::auth::authenticated_user::AuthenticatedUser,
        models::media::uploaded_file::UploadedFile,
    },
    repositories::posts::post_repo::PostRepository,
    repositories::users::user_repo::{build_search_filter, UserRepository},
    services::auth::TokenService,
    services::media::MediaService,
};
use crate::errors::errors::AppError;

/// 사용자 관리 비즈니스 로직 서비스
///
/// `#[service]` 매크로로 싱글톤 관리되며 리포지토리와 하위 서비스가 자동 주입됩니다.
///
/// ```rust,ignore
/// let user_service = UserService::instance();
/// let detail = user_service.register(request, photo).await?;
/// ```
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    post_repo: Arc<PostRepository>,
    media: Arc<MediaService>,
    token: Arc<TokenService>,
}

impl UserService {
    /// 회원가입
    ///
    /// 사용자 id는 저장 전에 발급되므로 프로필 사진을 먼저 올리고, 저장이 실패하면
    /// 올린 사진을 지웁니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일
    /// * `AppError::ValidationError` - 이미지가 아닌 프로필 사진
    pub async fn register(
        &self,
        request: SignupRequest,
        profile_photo: Option<UploadedFile>,
    ) -> Result<UserDetailResponse, AppError> {
        let start_time = Instant::now();

        if self.user_repo.exists_by_email(&request.email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(request.name, request.email, password_hash);
        user.gender = request.gender;
        user.date_of_birth = request.date_of_birth;
        user.other_websites = request.other_websites;
        user.address = request.address;

        if let Some(file) = profile_photo {
            let key = self.media.store_profile_photo(&user.id, file).await?;
            user.profile_photo = Some(key);
        }

        let user = match self.user_repo.create(user.clone()).await {
            Ok(created) => created,
            Err(e) => {
                if let Some(key) = &user.profile_photo {
                    self.media.delete_quietly(key).await;
                }
                return Err(e);
            }
        };

        info!("👤 회원가입 완료: {} ({:?})", user.id, start_time.elapsed());
        Ok(self.to_detail(user).await)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 메시지로 응답합니다.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::AuthenticationError("Invalid email or password".to_string());

        let email = normalize_email(&request.email);
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("🔒 로그인 실패: 존재하지 않는 이메일");
                return Err(invalid());
            }
        };

        if !verify(&request.password, &user.password)? {
            warn!("🔒 로그인 실패: 비밀번호 불일치 ({})", user.id);
            return Err(invalid());
        }

        let token = self.token.generate_token(&user)?;
        let profile_photo = self.media.presigned_opt(user.profile_photo.as_deref()).await;

        info!("🔑 로그인 성공: {}", user.id);
        Ok(LoginResponse {
            token,
            id: user.id,
            name: user.name,
            email: user.email,
            profile_photo,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self.find_user(id).await?;
        let profile_photo = self.media.presigned_opt(user.profile_photo.as_deref()).await;

        Ok(UserResponse::from_user(&user, profile_photo))
    }

    /// 이름/이메일/프로필 사진 수정 (`PUT /user/{id}/update`)
    pub async fn update_profile(
        &self,
        caller: &AuthenticatedUser,
        id: &str,
        request: UpdateProfileRequest,
        profile_photo: Option<UploadedFile>,
    ) -> Result<UserResponse, AppError> {
        caller.ensure_self(id)?;

        let mut user = self.find_user(id).await?;
        let previous_email = user.email.clone();

        self.ensure_email_available(&user, &request.email).await?;
        user.name = request.name;
        user.email = request.email;

        if let Some(file) = profile_photo {
            user.profile_photo = Some(self.media.store_profile_photo(&user.id, file).await?);
        }

        user.touch();
        self.user_repo.replace(&user, Some(&previous_email)).await?;

        let photo_url = self.media.presigned_opt(user.profile_photo.as_deref()).await;
        Ok(UserResponse::from_user(&user, photo_url))
    }

    /// 부분 수정 (`PUT /user/{id}`). 전달된 필드만 바꿉니다.
    pub async fn update_user(
        &self,
        caller: &AuthenticatedUser,
        id: &str,
        request: UpdateUserRequest,
        profile_photo: Option<UploadedFile>,
    ) -> Result<UserDetailResponse, AppError> {
        caller.ensure_self(id)?;

        let mut user = self.find_user(id).await?;
        let previous_email = user.email.clone();

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            self.ensure_email_available(&user, &email).await?;
            user.email = email;
        }
        if let Some(password) = request.password {
            user.password = hash_password(&password)?;
        }
        if let Some(gender) = request.gender {
            user.gender = Some(gender);
        }
        if let Some(date_of_birth) = request.date_of_birth {
            user.date_of_birth = Some(date_of_birth);
        }
        if let Some(websites) = request.other_websites {
            user.other_websites = websites;
        }
        if let Some(changes) = request.address {
            let mut address = user.address.take().unwrap_or_default();
            address.merge(changes);
            user.address = address.non_empty();
        }
        if let Some(file) = profile_photo {
            user.profile_photo = Some(self.media.store_profile_photo(&user.id, file).await?);
        }

        user.touch();
        self.user_repo.replace(&user, Some(&previous_email)).await?;

        info!("✏️ 사용자 정보 수정: {}", user.id);
        Ok(self.to_detail(user).await)
    }

    pub async fn search_users(&self, query: UserSearchQuery) -> Result<PageResponse<UserDetailResponse>, AppError> {
        let page = PageRequest::of(query.page, query.size)?;
        let filter = build_search_filter(&query);

        let (users, total) = self.user_repo.search(filter, page).await?;

        let mut content = Vec::with_capacity(users.len());
        for user in users {
            content.push(self.to_detail(user).await);
        }

        Ok(PageResponse::new(content, page, total))
    }

    /// 회원 탈퇴
    ///
    /// 프로필 사진, 작성한 게시글의 미디어, 게시글, 사용자 순서로 지웁니다.
    /// 오브젝트 삭제 실패는 로그만 남기고 계속 진행합니다.
    pub async fn delete_user(&self, caller: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        caller.ensure_self(id)?;

        let user = self.find_user(id).await?;

        if let Some(key) = &user.profile_photo {
            self.media.delete_quietly(key).await;
        }

        let posts = self.post_repo.find_all_by_creator(&user.id).await?;
        for key in posts.iter().filter_map(|post| post.media_url.as_deref()) {
            self.media.delete_quietly(key).await;
        }
        let deleted_posts = self.post_repo.delete_all_by_creator(&user.id).await?;

        if !self.user_repo.delete(&user).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!("🗑️ 회원 탈퇴: {} (게시글 {}개 삭제)", user.id, deleted_posts);
        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 다른 사용자가 쓰고 있는 이메일로는 바꿀 수 없다
    async fn ensure_email_available(&self, user: &User, email: &str) -> Result<(), AppError> {
        if user.email != email && self.user_repo.exists_by_email(email).await? {
            return Err(AppError::ConflictError("Email is already in use".to_string()));
        }
        Ok(())
    }

    async fn to_detail(&self, user: User) -> UserDetailResponse {
        let profile_photo = self.media.presigned_opt(user.profile_photo.as_deref()).await;
        UserDetailResponse::from_user(user, profile_photo)
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let hash_start = Instant::now();
    let password_hash = hash(password, PasswordConfig::bcrypt_cost())?;
    log::debug!("Password hashing took: {:?}", hash_start.elapsed());

    Ok(password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies() {
        let hashed = hash_password("password123").unwrap();

        assert_ne!(hashed, "password123");
        assert!(verify("password123", &hashed).unwrap());
        assert!(!verify("password124", &hashed).unwrap());
    }
}
