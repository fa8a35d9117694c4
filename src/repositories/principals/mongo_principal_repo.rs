//! # 인증 주체 MongoDB 리포지토리
//!
//! `principals` 컬렉션에 주체를 저장합니다.
//! `identifier` 필드에 유니크 인덱스를 두어 동시 가입 경쟁에서도 중복을 막습니다.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, to_bson},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::db::Database;
use crate::domain::entities::principals::Principal;
use super::PrincipalStore;

const COLLECTION: &str = "principals";
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB 기반 [`PrincipalStore`]
///
/// ```rust,ignore
/// let store = MongoPrincipalStore::new(&database);
/// store.create_indexes().await?;
/// let principal = store.find_by_identifier("S100").await?;
/// ```
pub struct MongoPrincipalStore {
    collection: Collection<Principal>,
}

impl MongoPrincipalStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<Principal>(COLLECTION),
        }
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 있으면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let identifier_index = IndexModel::builder()
            .keys(doc! { "identifier": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("identifier_unique".to_string())
                .build())
            .build();

        self.collection
            .create_index(identifier_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl PrincipalStore for MongoPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Principal>> {
        self.collection
            .find_one(doc! { "identifier": identifier })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, principal: Principal) -> AppResult<Principal> {
        if self.find_by_identifier(&principal.identifier).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 식별자입니다".to_string()));
        }

        match self.collection.insert_one(&principal).await {
            Ok(_) => Ok(principal),
            Err(e) if is_duplicate_key(&e) => {
                Err(AppError::ConflictError("이미 사용 중인 식별자입니다".to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn update_credential_hash(&self, identifier: &str, credential_hash: &str) -> AppResult<()> {
        let updated_at = to_bson(&Utc::now()).context("BSON 변환 실패")?;

        let result = self.collection
            .update_one(
                doc! { "identifier": identifier },
                doc! { "$set": { "credential_hash": credential_hash, "updated_at": updated_at } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::UnknownPrincipal);
        }

        Ok(())
    }
}
