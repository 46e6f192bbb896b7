//! Post DTOs

pub mod request;
pub mod response;
