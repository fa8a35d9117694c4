//! 인증/인가 서비스
//!
//! - [`TokenService`] - 토큰 발급/검증/갱신
//! - [`CredentialStore`] - 주체 조회와 비밀번호 검증
//! - [`AuthorizationGuard`] - 요청 단위 인가 파이프라인
//! - [`AuthService`] - 로그인/가입/비밀번호 변경

pub mod auth_service;
pub mod authorization_guard;
pub mod credential_store;
pub mod token_service;

pub use auth_service::*;
pub use authorization_guard::*;
pub use credential_store::*;
pub use token_service::*;
