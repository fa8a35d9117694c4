//! 실험 기록 DTO 모듈

pub mod request;

pub use request::*;
