//! 시간 소스 추상화
//!
//! 토큰 만료 판정과 캐시 TTL 판정은 모두 주입된 [`Clock`]을 통해 현재 시각을 얻습니다.
//! 운영 환경에서는 [`SystemClock`], 테스트에서는 [`ManualClock`]을 사용합니다.

use std::sync::Mutex;
use chrono::{DateTime, Duration, Utc};

/// 현재 시각을 제공하는 시간 소스
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 조작 가능한 시계
///
/// 만료 경계를 결정적으로 재현해야 하는 테스트에서 사용합니다.
///
/// ```rust,ignore
/// let clock = Arc::new(ManualClock::starting_at(Utc::now()));
/// clock.advance(Duration::hours(2));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { current: Mutex::new(start) }
    }

    /// 시계를 `by` 만큼 앞으로 이동
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
