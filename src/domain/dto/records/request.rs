//! 실험 기록 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::records::LabRecord;

/// 실험 기록 생성 요청
///
/// 작성자는 요청 본문이 아니라 인가된 주체에서 결정됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecordRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1-200자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(max = 5000, message = "설명은 5000자 이하여야 합니다"))]
    #[serde(default)]
    pub description: String,

    /// 외부 업로드 처리기가 저장한 파일 경로
    pub file_path: Option<String>,
}

/// 컬렉션 조회 조건
///
/// 캐시 키는 이 값의 정규화된 직렬화 결과로부터 결정적으로 계산됩니다.
/// 필드 순서가 곧 직렬화 순서이므로 필드를 추가할 때는 뒤에 붙입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordQuery {
    /// 작성자 식별자 필터
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl RecordQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_creator(identifier: impl Into<String>) -> Self {
        Self { created_by: Some(identifier.into()) }
    }

    /// 빈 문자열 필터는 필터 없음으로 취급합니다.
    pub fn normalized(self) -> Self {
        Self {
            created_by: self
                .created_by
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.created_by.is_none()
    }

    pub fn matches(&self, record: &LabRecord) -> bool {
        match &self.created_by {
            Some(creator) => &record.created_by == creator,
            None => true,
        }
    }
}
