//! # Data Transfer Objects
//!
//! API 요청/응답 계약을 정의합니다. 엔티티를 그대로 노출하지 않고
//! 필요한 필드만 camelCase JSON으로 내보냅니다.

pub mod page;
pub mod posts;
pub mod users;

pub use page::{PageRequest, PageResponse};
