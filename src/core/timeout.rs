//! 어댑터 호출 시간 제한
//!
//! 저장소/캐시 호출은 무한정 대기하지 않습니다.
//! 모든 어댑터 호출은 [`bounded`]로 감싸 설정된 시간 안에 끝나지 않으면
//! `AppError::Timeout`으로 실패합니다. 호출자가 요청을 포기하면 future가
//! drop 되면서 진행 중인 어댑터 호출도 함께 취소됩니다.
//! 재시도는 하지 않습니다.

use std::future::Future;
use std::time::Duration;
use crate::core::errors::{AppError, AppResult};

/// `operation`이 `limit` 안에 끝나지 않으면 `AppError::Timeout`을 반환합니다.
pub async fn bounded<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("어댑터 호출 시간 초과: {} ({:?})", operation, limit);
            Err(AppError::Timeout(format!("{} exceeded {:?}", operation, limit)))
        }
    }
}
