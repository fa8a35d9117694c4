//! # Core Module
//!
//! 서비스 전반에서 쓰이는 기반 기능입니다.
//!
//! - [`errors`] - `AppError`와 HTTP 응답 변환
//! - [`clock`] - 주입 가능한 시간 소스
//! - [`timeout`] - 어댑터 호출 시간 제한
//! - [`app_state`] - 서비스 그래프 조립
//!
//! 전역 싱글톤을 두지 않습니다. 모든 의존성은 [`AppState::new`]에서
//! 생성자 주입으로 연결됩니다.

pub mod app_state;
pub mod clock;
pub mod errors;
pub mod timeout;

pub use app_state::*;
pub use clock::*;
pub use errors::*;
