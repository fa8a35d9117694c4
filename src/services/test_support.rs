//! 테스트용 어댑터 대역

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use crate::caching::CacheBackend;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::records::RecordQuery;
use crate::domain::entities::records::LabRecord;
use crate::repositories::records::{CollectionStore, InMemoryRecordStore};

/// 쓰기(또는 모든 호출)가 실패하는 캐시
pub struct FailingCache {
    fail_reads: bool,
}

impl FailingCache {
    /// 조회는 항상 미스, 저장/삭제는 실패
    pub fn on_write() -> Self {
        Self { fail_reads: false }
    }

    /// 모든 호출 실패
    pub fn always() -> Self {
        Self { fail_reads: true }
    }
}

#[async_trait]
impl CacheBackend for FailingCache {
    async fn get(&self, _key: &str) -> AppResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(AppError::CacheError("connection refused".to_string()));
        }
        Ok(None)
    }

    async fn set_with_ttl(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> AppResult<()> {
        Err(AppError::CacheError("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::CacheError("connection refused".to_string()))
    }
}

/// 조회 횟수를 세는 저장소
pub struct CountingRecordStore {
    inner: InMemoryRecordStore,
    reads: AtomicUsize,
}

impl CountingRecordStore {
    pub fn new(inner: InMemoryRecordStore) -> Self {
        Self { inner, reads: AtomicUsize::new(0) }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionStore for CountingRecordStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_all().await
    }

    async fn list_matching(&self, query: &RecordQuery) -> AppResult<Vec<LabRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_matching(query).await
    }

    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord> {
        self.inner.insert(record).await
    }
}

/// 항상 실패하는 저장소
pub struct FailingRecordStore;

#[async_trait]
impl CollectionStore for FailingRecordStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        Err(AppError::DatabaseError("server selection timeout".to_string()))
    }

    async fn insert(&self, _record: LabRecord) -> AppResult<LabRecord> {
        Err(AppError::DatabaseError("server selection timeout".to_string()))
    }
}

/// 읽은 결과를 지연 후 돌려주는 저장소
///
/// 조회 시점의 스냅샷을 먼저 잡고 기다리므로, 그 사이의 쓰기는 반영되지 않습니다.
pub struct LaggingReadStore {
    inner: std::sync::Arc<InMemoryRecordStore>,
    lag: Duration,
}

impl LaggingReadStore {
    pub fn new(inner: std::sync::Arc<InMemoryRecordStore>, lag: Duration) -> Self {
        Self { inner, lag }
    }
}

#[async_trait]
impl CollectionStore for LaggingReadStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        let snapshot = self.inner.list_all().await?;
        tokio::time::sleep(self.lag).await;
        Ok(snapshot)
    }

    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord> {
        self.inner.insert(record).await
    }
}

/// 응답이 느린 저장소
pub struct SlowRecordStore(pub Duration);

#[async_trait]
impl CollectionStore for SlowRecordStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }

    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord> {
        tokio::time::sleep(self.0).await;
        Ok(record)
    }
}

/// 메모리 어댑터로 구성한 애플리케이션 상태
///
/// 역할 변경 시나리오를 위해 주체 저장소 핸들을 함께 돌려줍니다.
pub fn memory_state(
    clock: std::sync::Arc<dyn crate::core::clock::Clock>,
) -> (crate::core::AppState, std::sync::Arc<crate::repositories::InMemoryPrincipalStore>) {
    use std::sync::Arc;
    use crate::caching::InMemoryCache;
    use crate::config::StaticSecretProvider;
    use crate::core::{Adapters, AppState, ServiceSettings};
    use crate::repositories::InMemoryPrincipalStore;

    let principals = Arc::new(InMemoryPrincipalStore::new());
    let adapters = Adapters {
        principals: principals.clone(),
        records: Arc::new(InMemoryRecordStore::new()),
        cache: Arc::new(InMemoryCache::new(clock.clone())),
    };

    let state = AppState::new(
        &StaticSecretProvider::new("test-signing-secret"),
        clock,
        adapters,
        ServiceSettings::default(),
    );

    (state, principals)
}
