//! 사용자 관리 서비스 모듈
//!
//! 회원가입/로그인, 프로필 수정과 검색, 탈퇴 시 연관 데이터 정리를 담당합니다.
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.authenticate(request).await?;
//! ```

pub mod user_service;

pub use user_service::*;
