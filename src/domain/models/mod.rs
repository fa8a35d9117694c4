//! # Domain Models
//!
//! 영속되지 않는 도메인 모델들입니다.
//!
//! - [`token`] - JWT 클레임, 토큰 종류, 토큰 쌍
//! - [`auth`] - 인가 요구 역할과 인증된 주체 컨텍스트

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
