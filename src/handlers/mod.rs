//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 서비스 호출로 옮기는 얇은 어댑터입니다.
//! 요청 DTO 검증은 여기서 `validator`로 수행하고, 서비스는
//! `web::Data<AppState>`에서 꺼내 씁니다. 인가가 필요한 핸들러는
//! [`AuthenticatedPrincipal`](crate::domain::models::auth::AuthenticatedPrincipal) 추출자를 받습니다.
//!
//! ```text
//! Client ─▶ Handlers (이 모듈) ─▶ Services ─▶ Repositories / Cache
//! ```
//!
//! - **`auth`**: 가입, 로그인, 토큰 갱신, 내 정보, 비밀번호 변경
//! - **`records`**: 실험 기록 조회/생성

pub mod auth;
pub mod records;
