//! 미디어 저장 서비스 모듈

pub mod media_service;

pub use media_service::*;
