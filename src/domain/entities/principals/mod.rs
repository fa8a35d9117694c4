//! Principals Entity Module
//!
//! 인증 주체 엔티티와 역할 타입을 정의합니다.

pub mod principal;

pub use principal::*;
