//! 프로세스 내 캐시 구현
//!
//! 만료는 조회 시점에 주입된 [`Clock`]으로 판정하며, 만료된 항목은 그때 제거됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use crate::caching::CacheBackend;
use crate::core::clock::Clock;
use crate::core::errors::{AppError, AppResult};

struct Entry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// 메모리 기반 [`CacheBackend`]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// 만료되지 않은 항목 수
    #[cfg(test)]
    pub async fn live_len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // 만료
        self.entries.write().await.remove(key);
        Ok(None)
    }

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> AppResult<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::CacheError(format!("잘못된 TTL: {}", e)))?;
        let expires_at = self.clock.now() + ttl;

        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
