//! # Domain Layer
//!
//! ```text
//! domain
//! ├── entities  - MongoDB에 저장되는 문서 (User, Address, Post)
//! ├── dto       - API 요청/응답 계약
//! └── models    - 인증 정보, 토큰 클레임, 업로드 파일 등 요청 처리용 모델
//! ```

pub mod entities;
pub mod dto;
pub mod models;
