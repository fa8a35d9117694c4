//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! 설정값은 시작 시점에 읽어 각 컴포넌트 생성자에 주입되며,
//! 요청 처리 중에 전역 상태를 조회하지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 저장소, 캐시, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT 비밀키 및 토큰 유효 기간 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 필수
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 선택
//! export JWT_ACCESS_TTL_MINUTES="60"
//! export JWT_REFRESH_TTL_DAYS="7"
//! export STORAGE_BACKEND="mongo"          # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="labRecords"
//! export REDIS_URL="redis://localhost:6379"
//! export RECORDS_CACHE_TTL_SECONDS="3600"
//! export ADAPTER_TIMEOUT_MS="2000"
//! export BCRYPT_COST="12"                 # 4-15 범위
//! export CREDENTIAL_HASH_TIMEOUT_MS="10000"
//! export BOOTSTRAP_ADMIN_IDENTIFIER="A001"
//! export BOOTSTRAP_ADMIN_SECRET="change-me"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
