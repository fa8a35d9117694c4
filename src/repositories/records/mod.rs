//! 실험 기록 컬렉션 저장소

pub mod memory_record_repo;
pub mod mongo_record_repo;

use async_trait::async_trait;
use crate::core::errors::AppResult;
use crate::domain::dto::records::RecordQuery;
use crate::domain::entities::records::LabRecord;

pub use memory_record_repo::InMemoryRecordStore;
pub use mongo_record_repo::MongoRecordStore;

/// 컬렉션 저장소 포트
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// 전체 기록 조회
    async fn list_all(&self) -> AppResult<Vec<LabRecord>>;

    /// 조건에 맞는 기록 조회
    ///
    /// 기본 구현은 전체를 읽은 뒤 메모리에서 거릅니다.
    /// 저장소가 서버 측 필터를 지원하면 재정의합니다.
    async fn list_matching(&self, query: &RecordQuery) -> AppResult<Vec<LabRecord>> {
        if query.is_unfiltered() {
            return self.list_all().await;
        }

        let records = self.list_all().await?;
        Ok(records.into_iter().filter(|r| query.matches(r)).collect())
    }

    /// 새 기록 저장
    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord>;
}
