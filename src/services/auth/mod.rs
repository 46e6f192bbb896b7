//! 인증 서비스 모듈
//!
//! HS256 JWT 발급과 검증을 담당합니다.
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token = TokenService::instance().generate_token(&user)?;
//! let claims = TokenService::instance().verify_token(&token)?;
//! ```

pub mod token_service;

pub use token_service::*;
