//! # 실험 기록 MongoDB 리포지토리
//!
//! `lab_records` 컬렉션을 읽고 씁니다. 캐싱은 이 계층이 아니라
//! 읽기 경로(`RecordService`)의 책임입니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, Document}, options::IndexOptions, Collection, IndexModel};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::records::RecordQuery;
use crate::domain::entities::records::LabRecord;
use super::CollectionStore;

const COLLECTION: &str = "lab_records";

/// MongoDB 기반 [`CollectionStore`]
pub struct MongoRecordStore {
    collection: Collection<LabRecord>,
}

impl MongoRecordStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<LabRecord>(COLLECTION),
        }
    }

    /// 작성자 필터와 최신순 정렬을 위한 인덱스 생성
    pub async fn create_indexes(&self) -> AppResult<()> {
        let created_by_index = IndexModel::builder()
            .keys(doc! { "created_by": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_by_created_at".to_string())
                .build())
            .build();

        self.collection
            .create_index(created_by_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, filter: Document) -> AppResult<Vec<LabRecord>> {
        let cursor = self.collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect::<Vec<LabRecord>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl CollectionStore for MongoRecordStore {
    async fn list_all(&self) -> AppResult<Vec<LabRecord>> {
        self.find(doc! {}).await
    }

    async fn list_matching(&self, query: &RecordQuery) -> AppResult<Vec<LabRecord>> {
        let mut filter = Document::new();
        if let Some(created_by) = &query.created_by {
            filter.insert("created_by", created_by.as_str());
        }

        self.find(filter).await
    }

    async fn insert(&self, record: LabRecord) -> AppResult<LabRecord> {
        self.collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(record)
    }
}
