//! 소셜 미디어 백엔드
//!
//! 사용자 가입/인증, 미디어가 첨부된 게시글 작성과 검색을 제공하는 REST 서비스입니다.
//! 싱글톤 매크로 기반 의존성 주입 위에 MongoDB, Redis 캐시, S3 오브젝트 스토리지를
//! 사용합니다.
//!
//! # Features
//!
//! - **사용자**: multipart 회원가입(프로필 사진), 로그인, 프로필 수정/검색, 탈퇴
//! - **게시글**: 이미지/영상 첨부, 좋아요, 키워드 검색, 작성자별 목록
//! - **JWT 인증**: HS256 액세스 토큰
//! - **미디어**: 비공개 버킷 + presigned URL
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /user, /posts, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │  Repositories   │     │ ObjectStorage   │
//! └─────────────────┘     └─────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ MongoDB + Redis │     │       S3        │
//! └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use social_media_backend::services::users::UserService;
//! use social_media_backend::services::posts::PostService;
//!
//! let login = UserService::instance().authenticate(request).await?;
//! let post = PostService::instance().get(&user, &post_id).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod storage;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
