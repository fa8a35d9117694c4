//! Lab Record Entity
//!
//! 캐시-어사이드 경로로 제공되는 자주 읽히는 컬렉션의 원소입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 실험 기록 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    /// 레코드 ID (UUID v4)
    pub id: String,
    pub title: String,
    pub description: String,
    /// 첨부 파일 경로 (업로드 처리는 외부 책임)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// 작성자 식별자
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl LabRecord {
    pub fn new(title: String, description: String, file_path: Option<String>, created_by: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            file_path,
            created_by,
            created_at: Utc::now(),
        }
    }
}
