//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속 객체 (Principal, LabRecord)
//! ├── DTOs      - 요청/응답 계약
//! └── Models    - 토큰 클레임, 인가 요구사항, 인증된 주체
//! ```

pub mod entities;
pub mod dto;
pub mod models;
