//! # Repositories
//!
//! MongoDB 컬렉션 접근 계층. 각 리포지토리는 `#[repository]` 매크로로 등록되어
//! `XxxRepository::instance()`로 얻습니다.

pub mod posts;
pub mod users;
