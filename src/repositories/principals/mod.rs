//! 인증 주체 저장소

pub mod memory_principal_repo;
pub mod mongo_principal_repo;

use async_trait::async_trait;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::principals::Principal;

pub use memory_principal_repo::InMemoryPrincipalStore;
pub use mongo_principal_repo::MongoPrincipalStore;

/// 인증 주체 저장소 포트
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// 식별자로 주체를 조회합니다.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Principal>>;

    /// 새 주체를 저장합니다. 식별자가 이미 있으면 `ConflictError`.
    async fn create(&self, principal: Principal) -> AppResult<Principal>;

    /// 비밀번호 해시를 교체합니다. 주체가 없으면 `UnknownPrincipal`.
    async fn update_credential_hash(&self, identifier: &str, credential_hash: &str) -> AppResult<()>;

    /// 평문 비밀번호가 저장된 bcrypt 해시와 일치하는지 확인합니다.
    ///
    /// bcrypt 비교는 CPU 집약적이므로 블로킹 스레드에서 수행합니다.
    async fn verify_credential(&self, plaintext: &str, credential_hash: &str) -> AppResult<bool> {
        let plaintext = plaintext.to_string();
        let credential_hash = credential_hash.to_string();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &credential_hash))
            .await
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 작업 실패: {}", e)))?;

        // 손상된 해시는 불일치로 취급
        match verified {
            Ok(matches) => Ok(matches),
            Err(e) => {
                log::warn!("저장된 비밀번호 해시를 해석할 수 없습니다: {}", e);
                Ok(false)
            }
        }
    }
}
