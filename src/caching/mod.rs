//! 캐싱 계층 모듈
//!
//! 캐시-어사이드 읽기 경로가 사용하는 키-값 캐시 포트와 그 구현체를 제공합니다.
//! 캐시 값은 불투명한 바이트열이며, 직렬화 형식은 호출자가 결정합니다.
//!
//! - [`redis::RedisClient`] - Redis 기반 구현 (운영)
//! - [`memory::InMemoryCache`] - 프로세스 내 구현 (개발/테스트)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{CacheBackend, redis::RedisClient};
//!
//! let cache: Arc<dyn CacheBackend> = Arc::new(RedisClient::new().await?);
//! cache.set_with_ttl("lab_records:all", bytes, Duration::from_secs(3600)).await?;
//! let hit = cache.get("lab_records:all").await?;
//! cache.delete("lab_records:all").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod memory;
pub mod redis;

use std::time::Duration;
use async_trait::async_trait;
use crate::core::errors::AppResult;

pub use memory::InMemoryCache;
pub use self::redis::RedisClient;

/// 키-값 캐시 포트
///
/// 모든 메서드는 실패할 수 있으며, 실패는 `AppError::CacheError`로 보고됩니다.
/// 캐시 실패를 어떻게 다룰지는 호출자(읽기 경로)가 결정합니다.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// 키에 저장된 값을 조회합니다. 없거나 만료되었으면 `None`.
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// 값을 저장하고 `ttl` 이후 만료시킵니다. 기존 값은 덮어씁니다.
    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> AppResult<()>;

    /// 키를 삭제합니다. 키가 없어도 성공입니다.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
