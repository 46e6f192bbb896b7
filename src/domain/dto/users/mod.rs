//! User DTOs

pub mod request;
pub mod response;
