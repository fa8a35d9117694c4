//! # Authentication Configuration Module
//!
//! JWT 서명 비밀키와 토큰 유효 기간 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_TTL_MINUTES="60"
//! export JWT_REFRESH_TTL_DAYS="7"
//!
//! # 선택: 초기 관리자 계정
//! export BOOTSTRAP_ADMIN_IDENTIFIER="A001"
//! export BOOTSTRAP_ADMIN_SECRET="change-me"
//! ```
//!
//! `JWT_SECRET`에는 기본값이 없습니다. 비밀키가 없으면 서버는 시작을 거부하고,
//! [`TokenService`](crate::services::auth::TokenService)는 모든 토큰을 거부합니다.

use std::env;
use chrono::Duration;

/// 액세스 토큰 유효 기간 상한 (분, 1일)
pub const MAX_ACCESS_TTL_MINUTES: i64 = 24 * 60;
/// 리프레시 토큰 유효 기간 상한 (일)
pub const MAX_REFRESH_TTL_DAYS: i64 = 365;

/// 서명 비밀키 제공자
///
/// 프로세스 시작 시 한 번 조회됩니다. 키 순환은 지원하지 않습니다.
pub trait SecretProvider: Send + Sync {
    /// 서명 비밀키. 설정되지 않았으면 `None`
    fn signing_secret(&self) -> Option<String>;
}

/// `JWT_SECRET` 환경 변수에서 비밀키를 읽는 제공자
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
    fn signing_secret(&self) -> Option<String> {
        JwtConfig::secret()
    }
}

/// 고정된 비밀키 제공자 (테스트 및 임베딩용)
#[derive(Debug, Clone)]
pub struct StaticSecretProvider(pub Option<String>);

impl StaticSecretProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Some(secret.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_secret(&self) -> Option<String> {
        self.0.clone().filter(|s| !s.trim().is_empty())
    }
}

/// JWT 토큰 설정을 관리하는 구조체
///
/// ## 권장 설정값
///
/// - **액세스 토큰**: 1시간
/// - **리프레시 토큰**: 7일
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 빈 문자열은 설정되지 않은 것으로 취급합니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> Option<String> {
        env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    /// 액세스 토큰 유효 기간 (분). 기본값 60, 상한 1일
    pub fn access_ttl_minutes() -> i64 {
        bounded_ttl(env::var("JWT_ACCESS_TTL_MINUTES").ok().as_deref(), 60, MAX_ACCESS_TTL_MINUTES)
    }

    /// 리프레시 토큰 유효 기간 (일). 기본값 7, 상한 365일
    pub fn refresh_ttl_days() -> i64 {
        bounded_ttl(env::var("JWT_REFRESH_TTL_DAYS").ok().as_deref(), 7, MAX_REFRESH_TTL_DAYS)
    }

    /// 환경 변수에서 [`TokenSettings`]를 구성합니다.
    pub fn settings() -> TokenSettings {
        TokenSettings {
            access_ttl: Duration::minutes(Self::access_ttl_minutes()),
            refresh_ttl: Duration::days(Self::refresh_ttl_days()),
        }
    }
}

/// 양수가 아니거나 해석할 수 없으면 기본값, 상한을 넘으면 상한으로 자릅니다.
fn bounded_ttl(raw: Option<&str>, default: i64, max: i64) -> i64 {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(v) if v > max => {
            log::warn!("토큰 유효 기간 {}이 상한 {}을 넘어 상한으로 조정합니다", v, max);
            max
        }
        Some(v) if v > 0 => v,
        _ => default,
    }
}

/// 시작 시 생성할 초기 관리자 계정
///
/// 공개 가입은 `student`만 만들 수 있으므로, 첫 관리자는 이 설정으로 만듭니다.
pub struct BootstrapAdminConfig;

impl BootstrapAdminConfig {
    /// `BOOTSTRAP_ADMIN_IDENTIFIER`와 `BOOTSTRAP_ADMIN_SECRET`이 모두 있을 때만 `Some`
    pub fn credentials() -> Option<(String, String)> {
        let identifier = env::var("BOOTSTRAP_ADMIN_IDENTIFIER").ok().filter(|s| !s.trim().is_empty())?;
        let secret = env::var("BOOTSTRAP_ADMIN_SECRET").ok().filter(|s| !s.is_empty())?;
        Some((identifier.trim().to_string(), secret))
    }
}

/// 토큰 서비스에 주입되는 유효 기간 설정
///
/// `expires_at - issued_at`은 토큰 종류별로 이 값에 고정됩니다.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: Duration::hours(1),
            refresh_ttl: Duration::days(7),
        }
    }
}
