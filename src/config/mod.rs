//! # Configuration Module
//!
//! 환경 변수 기반 설정 모듈입니다. `PROFILE`에 따라 `.env.dev` / `.env.prod`가
//! 먼저 로드된 뒤(main.rs 참고) 각 설정 구조체가 값을 읽습니다.
//!
//! - [`data_config`] - 실행 환경, 서버, 업로드, CORS, Rate Limit
//! - [`auth_config`] - JWT
//! - [`storage_config`] - S3 오브젝트 스토리지

pub mod data_config;
pub mod auth_config;
pub mod storage_config;

pub use data_config::*;
pub use auth_config::*;
pub use storage_config::*;
