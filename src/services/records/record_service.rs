//! # 실험 기록 캐시-어사이드 읽기 경로
//!
//! ```text
//! fetch_collection(query)
//!   ├─ key = cache_key(query)
//!   ├─ cache.get(key) ── hit ──▶ 역직렬화 후 반환 (저장소 접근 없음)
//!   └─ miss
//!        ├─ generation 기록
//!        ├─ store.list_matching(query)   실패 시 RetrievalFailed
//!        ├─ cache.set_with_ttl(key, ..)  generation이 바뀌었으면 생략, 실패해도 로그만 남김
//!        └─ 반환
//! ```
//!
//! ## 캐시 정책
//!
//! 이 서비스를 거친 변경(`create_record`)은 관련 캐시 키를 즉시 삭제하고,
//! 다른 경로로 일어난 변경은 TTL 만료로 반영됩니다.
//!
//! ## 읽기와 무효화의 경쟁
//!
//! 미스 처리 중 저장소를 읽은 뒤 `create_record`가 끝나면, 읽어 둔 목록은 이미 낡았습니다.
//! 쓰기마다 증가하는 generation으로 이를 막습니다. 읽기 전에 본 값과 다르면 캐시에 쓰지 않고,
//! 쓴 직후 다시 확인해 달라졌으면 방금 쓴 키를 지웁니다.
//! generation은 프로세스 안에서만 공유되므로, 여러 인스턴스가 같은 캐시를 쓰면
//! 다른 인스턴스의 쓰기에 대해서는 TTL이 상한입니다.
//!
//! ## 동시 미스
//!
//! 같은 키에 대한 미스가 동시에 일어나면 두 요청 모두 저장소를 읽고 캐시를 씁니다.
//! 마지막 쓰기가 남습니다. 두 목록 모두 같은 generation에서 읽은 것이므로 잠금을 두지 않습니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use sha2::{Digest, Sha256};
use crate::caching::CacheBackend;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::timeout::bounded;
use crate::domain::dto::records::{CreateRecordRequest, RecordQuery};
use crate::domain::entities::records::LabRecord;
use crate::domain::models::auth::AuthenticatedPrincipal;
use crate::repositories::records::CollectionStore;

const KEY_PREFIX: &str = "lab_records";

pub struct RecordService {
    store: Arc<dyn CollectionStore>,
    cache: Arc<dyn CacheBackend>,
    ttl: Duration,
    timeout: Duration,
    generation: AtomicU64,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        cache: Arc<dyn CacheBackend>,
        ttl: Duration,
        timeout: Duration,
    ) -> Self {
        Self { store, cache, ttl, timeout, generation: AtomicU64::new(0) }
    }

    /// 조회 조건에 대한 결정적 캐시 키
    ///
    /// - 조건 없음: `lab_records:all`
    /// - 조건 있음: `lab_records:q:<정규화된 JSON의 SHA-256 hex>`
    pub fn cache_key(query: &RecordQuery) -> AppResult<String> {
        if query.is_unfiltered() {
            return Ok(format!("{}:all", KEY_PREFIX));
        }

        let canonical = serde_json::to_vec(query).context("캐시 키 직렬화 실패")?;

        Ok(format!("{}:q:{:x}", KEY_PREFIX, Sha256::digest(&canonical)))
    }

    /// 캐시를 먼저 확인하고, 미스면 저장소에서 읽어 캐시를 채웁니다.
    ///
    /// # Errors
    ///
    /// * `AppError::RetrievalFailed` - 저장소 조회 실패 또는 시간 초과
    pub async fn fetch_collection(&self, query: RecordQuery) -> AppResult<Vec<LabRecord>> {
        let query = query.normalized();
        let key = Self::cache_key(&query)?;

        if let Some(records) = self.read_cached(&key).await {
            log::debug!("캐시 적중: {}", key);
            return Ok(records);
        }

        log::debug!("캐시 미스: {}", key);
        let observed = self.generation.load(Ordering::SeqCst);
        let records = bounded(self.timeout, "record store read", self.store.list_matching(&query))
            .await
            .map_err(|e| {
                log::error!("기록 조회 실패: {}", e);
                AppError::RetrievalFailed(e.to_string())
            })?;

        self.write_back(&key, &records, observed).await;
        Ok(records)
    }

    /// 새 기록을 저장하고 관련 캐시 키를 무효화합니다.
    ///
    /// 작성자는 인가된 주체입니다.
    pub async fn create_record(
        &self,
        author: &AuthenticatedPrincipal,
        request: CreateRecordRequest,
    ) -> AppResult<LabRecord> {
        let record = LabRecord::new(
            request.title,
            request.description,
            request.file_path,
            author.identifier.clone(),
        );

        let record = bounded(self.timeout, "record store insert", self.store.insert(record)).await?;
        log::info!("기록 생성: {} (작성자 {})", record.id, record.created_by);

        self.generation.fetch_add(1, Ordering::SeqCst);
        self.invalidate(&[RecordQuery::all(), RecordQuery::by_creator(&record.created_by)]).await;
        Ok(record)
    }

    /// 캐시 조회 실패나 손상된 값은 미스로 취급합니다.
    async fn read_cached(&self, key: &str) -> Option<Vec<LabRecord>> {
        match bounded(self.timeout, "cache get", self.cache.get(key)).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<LabRecord>>(&bytes) {
                Ok(records) => Some(records),
                Err(e) => {
                    log::warn!("캐시 값 역직렬화 실패 ({}): {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn write_back(&self, key: &str, records: &[LabRecord], observed: u64) {
        if self.generation.load(Ordering::SeqCst) != observed {
            log::debug!("조회 중 기록이 변경되어 캐시 저장 생략: {}", key);
            return;
        }

        let payload = match serde_json::to_vec(records) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("캐시 값 직렬화 실패 ({}): {}", key, e);
                return;
            }
        };

        if let Err(e) = bounded(self.timeout, "cache set", self.cache.set_with_ttl(key, payload, self.ttl)).await {
            log::warn!("캐시 저장 실패 ({}): {}", key, e);
            return;
        }

        // 확인과 저장 사이에 무효화가 끝났을 수 있음
        if self.generation.load(Ordering::SeqCst) != observed {
            if let Err(e) = bounded(self.timeout, "cache delete", self.cache.delete(key)).await {
                log::warn!("캐시 무효화 실패 ({}): {}", key, e);
            }
        }
    }

    async fn invalidate(&self, queries: &[RecordQuery]) {
        for query in queries {
            let key = match Self::cache_key(query) {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("캐시 키 계산 실패: {}", e);
                    continue;
                }
            };

            if let Err(e) = bounded(self.timeout, "cache delete", self.cache.delete(&key)).await {
                log::warn!("캐시 무효화 실패 ({}): {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::caching::InMemoryCache;
    use crate::core::clock::ManualClock;
    use crate::domain::entities::principals::Role;
    use crate::repositories::records::InMemoryRecordStore;
    use crate::services::test_support::{
        CountingRecordStore, FailingCache, FailingRecordStore, LaggingReadStore, SlowRecordStore,
    };

    const TTL: Duration = Duration::from_secs(3600);
    const TIMEOUT: Duration = Duration::from_secs(2);

    fn seeded_store() -> Arc<CountingRecordStore> {
        Arc::new(CountingRecordStore::new(InMemoryRecordStore::with_records(vec![
            LabRecord::new("Titration".into(), "acid/base".into(), None, "F200".into()),
            LabRecord::new("Spectroscopy".into(), String::new(), Some("/uploads/s.pdf".into()), "F300".into()),
        ])))
    }

    fn author(identifier: &str) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal {
            identifier: identifier.to_string(),
            role: Role::new("faculty"),
            email: None,
        }
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        assert_eq!(RecordService::cache_key(&RecordQuery::all()).unwrap(), "lab_records:all");

        let a = RecordService::cache_key(&RecordQuery::by_creator("F200")).unwrap();
        let b = RecordService::cache_key(&RecordQuery::by_creator("F200")).unwrap();
        let c = RecordService::cache_key(&RecordQuery::by_creator("F300")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("lab_records:q:"));
        assert_eq!(a.len(), "lab_records:q:".len() + 64);
    }

    #[actix_web::test]
    async fn test_second_fetch_within_ttl_hits_cache() {
        let store = seeded_store();
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        let service = RecordService::new(store.clone(), cache.clone(), TTL, TIMEOUT);

        let first = service.fetch_collection(RecordQuery::all()).await.unwrap();
        let second = service.fetch_collection(RecordQuery::all()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(store.reads(), 1);
        assert!(cache.get("lab_records:all").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_expired_entry_is_refetched() {
        let clock = Arc::new(ManualClock::starting_at(Utc::now()));
        let store = seeded_store();
        let cache = Arc::new(InMemoryCache::new(clock.clone()));
        let service = RecordService::new(store.clone(), cache, TTL, TIMEOUT);

        service.fetch_collection(RecordQuery::all()).await.unwrap();
        clock.advance(chrono::Duration::seconds(3600));
        service.fetch_collection(RecordQuery::all()).await.unwrap();

        assert_eq!(store.reads(), 2);
    }

    #[actix_web::test]
    async fn test_cache_write_failure_still_returns_records() {
        let store = seeded_store();
        let service = RecordService::new(store.clone(), Arc::new(FailingCache::on_write()), TTL, TIMEOUT);

        let records = service.fetch_collection(RecordQuery::all()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(store.reads(), 1);
    }

    #[actix_web::test]
    async fn test_cache_read_failure_falls_back_to_store() {
        let store = seeded_store();
        let service = RecordService::new(store.clone(), Arc::new(FailingCache::always()), TTL, TIMEOUT);

        let records = service.fetch_collection(RecordQuery::by_creator("F300")).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_by, "F300");
    }

    #[actix_web::test]
    async fn test_corrupt_cache_entry_is_treated_as_miss() {
        let store = seeded_store();
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        cache.set_with_ttl("lab_records:all", b"not json".to_vec(), TTL).await.unwrap();
        let service = RecordService::new(store.clone(), cache, TTL, TIMEOUT);

        let records = service.fetch_collection(RecordQuery::all()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(store.reads(), 1);
    }

    #[actix_web::test]
    async fn test_store_failure_surfaces_as_retrieval_failed() {
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        let service = RecordService::new(Arc::new(FailingRecordStore), cache, TTL, TIMEOUT);

        let result = service.fetch_collection(RecordQuery::all()).await;
        assert!(matches!(result, Err(AppError::RetrievalFailed(_))));
    }

    #[actix_web::test]
    async fn test_slow_store_times_out_as_retrieval_failed() {
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        let store = Arc::new(SlowRecordStore(Duration::from_millis(500)));
        let service = RecordService::new(store, cache, TTL, Duration::from_millis(20));

        let result = service.fetch_collection(RecordQuery::all()).await;
        assert!(matches!(result, Err(AppError::RetrievalFailed(_))));
    }

    #[actix_web::test]
    async fn test_create_record_invalidates_cached_views() {
        let store = seeded_store();
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        let service = RecordService::new(store.clone(), cache, TTL, TIMEOUT);

        assert_eq!(service.fetch_collection(RecordQuery::all()).await.unwrap().len(), 2);
        assert_eq!(service.fetch_collection(RecordQuery::by_creator("F200")).await.unwrap().len(), 1);

        let request = CreateRecordRequest {
            title: "Chromatography".to_string(),
            description: String::new(),
            file_path: None,
        };
        let created = service.create_record(&author("F200"), request).await.unwrap();
        assert_eq!(created.created_by, "F200");

        let all = service.fetch_collection(RecordQuery::all()).await.unwrap();
        let mine = service.fetch_collection(RecordQuery::by_creator("F200")).await.unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(mine.len(), 2);
        assert_eq!(store.reads(), 4);
    }

    #[actix_web::test]
    async fn test_stale_read_is_not_cached_after_concurrent_create() {
        let inner = Arc::new(InMemoryRecordStore::new());
        let store = Arc::new(LaggingReadStore::new(inner.clone(), Duration::from_millis(100)));
        let cache = Arc::new(InMemoryCache::new(Arc::new(ManualClock::starting_at(Utc::now()))));
        let service = RecordService::new(store, cache.clone(), TTL, TIMEOUT);

        let request = CreateRecordRequest {
            title: "Chromatography".to_string(),
            description: String::new(),
            file_path: None,
        };

        let (before, created) = tokio::join!(
            service.fetch_collection(RecordQuery::all()),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                service.create_record(&author("F200"), request).await
            }
        );

        assert!(before.unwrap().is_empty());
        assert!(created.is_ok());
        assert!(cache.get("lab_records:all").await.unwrap().is_none());

        let after = service.fetch_collection(RecordQuery::all()).await.unwrap();
        assert_eq!(after.len(), 1);
        assert!(cache.get("lab_records:all").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_create_record_survives_invalidation_failure() {
        let store = seeded_store();
        let service = RecordService::new(store, Arc::new(FailingCache::always()), TTL, TIMEOUT);

        let request = CreateRecordRequest {
            title: "Chromatography".to_string(),
            description: String::new(),
            file_path: None,
        };

        assert!(service.create_record(&author("F200"), request).await.is_ok());
    }
}
