//! 공통 유틸리티

pub mod multipart;
pub mod string_utils;
pub mod time_utils;
