//! 인증/인가 모델 모듈

pub mod authenticated_principal;
pub mod authentication_request;

pub use authenticated_principal::*;
pub use authentication_request::*;
