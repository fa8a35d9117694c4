//! 메모리 기반 실험 기록 저장소

use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::errors::AppResult;
use crate::domain::entities::records::LabRecord;
use super::CollectionStore;

/// 프로세스 내 [`CollectionStore`]. 최신 기록이 앞에 오도록 반환합니다.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<LabRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LabRecord>) -> Self {
        Self { records: RwLock::new(records) }
    }
}

#[async_trait]
impl CollectionStore for InMemoryRecordStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}
