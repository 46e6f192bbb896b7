//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 받아 DTO로 변환하고 서비스 계층을 호출한 뒤 응답을 만듭니다.
//! 비즈니스 규칙은 서비스에 두고, 핸들러는 다음만 담당합니다.
//!
//! - 요청 파싱: JSON(`web::Json`), 쿼리(`web::Query`), multipart(`FormData`)
//! - 인증 사용자 추출: `AuthenticatedUser`
//! - 상태 코드 선택: 200 / 201 / 204
//!
//! 에러는 모두 `AppError`로 전파되며 `ResponseError` 구현이 JSON 응답으로 바꿉니다.
//!
//! ```rust,ignore
//! #[get("/{id}")]
//! pub async fn get_post(
//!     user: AuthenticatedUser,
//!     id: web::Path<String>,
//! ) -> Result<HttpResponse, AppError> {
//!     let response = PostService::instance().get(&user, &id).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```
//!
//! ## 모듈 구성
//!
//! - **`users`**: `/user` 회원가입, 로그인, 프로필, 검색, 탈퇴
//! - **`posts`**: `/posts` 게시글 CRUD, 좋아요, 검색, 작성자별 목록

pub mod users;
pub mod posts;
