//! 실험 기록 서비스

pub mod record_service;

pub use record_service::*;
