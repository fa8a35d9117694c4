//! HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - 역할 기반 인가 가드

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
