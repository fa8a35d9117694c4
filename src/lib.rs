//! 실험 기록 관리 서비스 백엔드
//!
//! 실험 기록 컬렉션을 제공하는 REST 백엔드입니다. 핵심은 접근 제어 계층입니다.
//!
//! # Features
//!
//! - **토큰 서비스**: HS256 액세스/리프레시 토큰 발급, 검증, 갱신
//! - **인가 가드**: 요청마다 토큰을 검증하고 저장소의 현재 역할로 권한 판정
//! - **캐시-어사이드 읽기**: Redis 캐시를 먼저 확인하고 미스 시 MongoDB에서 읽어 TTL과 함께 채움
//! - **자격 증명 저장소**: bcrypt 해시 기반 로그인, 가입, 비밀번호 변경
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, AuthorizationGuard, RecordService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← PrincipalStore / CollectionStore / CacheBackend 포트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 또는 메모리 구현
//! └─────────────────┘
//! ```
//!
//! 모든 의존성은 [`core::AppState::new`]에서 생성자 주입으로 연결됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use lab_records_service::core::{Adapters, AppState, ServiceSettings, SystemClock};
//! use lab_records_service::config::EnvSecretProvider;
//!
//! let state = AppState::new(&EnvSecretProvider, Arc::new(SystemClock), adapters, ServiceSettings::from_env());
//! let pair = state.auth.login("S100", "pw1").await?;
//! let records = state.records.fetch_collection(RecordQuery::all()).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
