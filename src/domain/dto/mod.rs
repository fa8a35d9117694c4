//! # Data Transfer Objects
//!
//! HTTP 계층과 서비스 계층 사이에서 주고받는 요청/응답 구조체입니다.
//! 요청 DTO는 `validator`로 입력값을 검증합니다.
//!
//! - [`auth`] - 회원가입, 로그인, 토큰 갱신, 비밀번호 변경
//! - [`records`] - 실험 기록 생성 및 조회 조건

pub mod auth;
pub mod records;

pub use auth::*;
pub use records::*;
