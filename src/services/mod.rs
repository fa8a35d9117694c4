//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 모든 서비스는 의존성을 생성자로 주입받으며
//! 전역 상태에 접근하지 않습니다.
//!
//! - [`auth`] - 토큰, 자격 증명, 인가 가드, 로그인/가입
//! - [`records`] - 실험 기록 캐시-어사이드 읽기 경로

pub mod auth;
pub mod records;

#[cfg(test)]
pub(crate) mod test_support;
