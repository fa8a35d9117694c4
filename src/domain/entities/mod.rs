//! Domain Entities Module
//!
//! 저장소에 영속되는 핵심 도메인 엔티티들을 정의합니다.
//!
//! - [`principals`] - 인증 주체와 역할
//! - [`records`] - 실험 기록

pub mod principals;
pub mod records;

pub use principals::*;
pub use records::*;
