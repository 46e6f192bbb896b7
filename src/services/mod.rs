//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//!
//! - `auth`: JWT 발급/검증
//! - `media`: 오브젝트 스토리지 업로드와 presigned URL
//! - `users`: 회원가입, 로그인, 프로필, 탈퇴
//! - `posts`: 게시글, 좋아요, 검색
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, posts::PostService};
//!
//! let user_service = UserService::instance();
//! let post_service = PostService::instance();
//! ```

pub mod auth;
pub mod media;
pub mod users;
pub mod posts;
