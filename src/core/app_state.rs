//! 애플리케이션 상태 조립
//!
//! 어댑터와 설정을 받아 서비스 그래프를 한 번 구성하고,
//! `web::Data<AppState>`로 핸들러와 미들웨어에 공유합니다.

use std::sync::Arc;
use std::time::Duration;
use crate::caching::CacheBackend;
use crate::config::{DataConfig, JwtConfig, PasswordConfig, SecretProvider, TokenSettings};
use crate::core::clock::Clock;
use crate::repositories::{CollectionStore, PrincipalStore};
use crate::services::auth::{AuthService, AuthorizationGuard, CredentialStore, TokenService};
use crate::services::records::RecordService;

/// 외부 어댑터 묶음
pub struct Adapters {
    pub principals: Arc<dyn PrincipalStore>,
    pub records: Arc<dyn CollectionStore>,
    pub cache: Arc<dyn CacheBackend>,
}

/// 서비스 생성 시 주입되는 설정
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub tokens: TokenSettings,
    pub records_cache_ttl: Duration,
    pub adapter_timeout: Duration,
    pub bcrypt_cost: u32,
    pub credential_hash_timeout: Duration,
}

impl ServiceSettings {
    pub fn from_env() -> Self {
        Self {
            tokens: JwtConfig::settings(),
            records_cache_ttl: DataConfig::records_cache_ttl(),
            adapter_timeout: DataConfig::adapter_timeout(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            credential_hash_timeout: PasswordConfig::hash_timeout(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            tokens: TokenSettings::default(),
            records_cache_ttl: Duration::from_secs(3600),
            adapter_timeout: Duration::from_millis(2000),
            bcrypt_cost: 4,
            credential_hash_timeout: Duration::from_secs(10),
        }
    }
}

/// 요청 처리 계층이 공유하는 서비스 핸들
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub guard: Arc<AuthorizationGuard>,
    pub auth: Arc<AuthService>,
    pub records: Arc<RecordService>,
}

impl AppState {
    pub fn new(
        secrets: &dyn SecretProvider,
        clock: Arc<dyn Clock>,
        adapters: Adapters,
        settings: ServiceSettings,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(secrets, settings.tokens, clock));
        let credentials = Arc::new(CredentialStore::new(
            adapters.principals,
            settings.adapter_timeout,
            settings.bcrypt_cost,
            settings.credential_hash_timeout,
        ));

        Self {
            guard: Arc::new(AuthorizationGuard::new(tokens.clone(), credentials.clone())),
            auth: Arc::new(AuthService::new(tokens.clone(), credentials)),
            records: Arc::new(RecordService::new(
                adapters.records,
                adapters.cache,
                settings.records_cache_ttl,
                settings.adapter_timeout,
            )),
            tokens,
        }
    }
}
