//! # Core
//!
//! 싱글톤 의존성 주입 레지스트리. `singleton_macro`가 생성하는 코드는
//! `crate::core::registry` 경로를 사용합니다.

pub mod registry;

pub use registry::*;
