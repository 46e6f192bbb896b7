//! Users Entity Module

pub mod address;
pub mod user;
