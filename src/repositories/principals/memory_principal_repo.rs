//! 메모리 기반 인증 주체 저장소

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::principals::{Principal, Role};
use super::PrincipalStore;

/// 프로세스 내 [`PrincipalStore`]
///
/// `STORAGE_BACKEND=memory` 로 실행하거나 테스트에서 사용합니다.
#[derive(Default)]
pub struct InMemoryPrincipalStore {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 주체의 역할을 변경합니다.
    ///
    /// 역할 변경은 이 서비스의 HTTP 표면 밖(관리 도구)에서 일어나는 일이며,
    /// 인가 가드가 항상 현재 역할을 기준으로 판정하는지 확인할 때 사용합니다.
    pub async fn set_role(&self, identifier: &str, role: Role) -> AppResult<()> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(identifier)
            .ok_or(AppError::UnknownPrincipal)?;

        principal.role = role;
        principal.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Principal>> {
        Ok(self.principals.read().await.get(identifier).cloned())
    }

    async fn create(&self, principal: Principal) -> AppResult<Principal> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(&principal.identifier) {
            return Err(AppError::ConflictError("이미 사용 중인 식별자입니다".to_string()));
        }

        principals.insert(principal.identifier.clone(), principal.clone());
        Ok(principal)
    }

    async fn update_credential_hash(&self, identifier: &str, credential_hash: &str) -> AppResult<()> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(identifier)
            .ok_or(AppError::UnknownPrincipal)?;

        principal.credential_hash = credential_hash.to_string();
        principal.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(identifier: &str) -> Principal {
        Principal::new(identifier.to_string(), "hash".to_string(), Role::new("student"), None)
    }

    #[actix_web::test]
    async fn test_create_rejects_duplicate_identifier() {
        let store = InMemoryPrincipalStore::new();

        store.create(principal("S100")).await.unwrap();
        let result = store.create(principal("S100")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_credential_hash_requires_existing_principal() {
        let store = InMemoryPrincipalStore::new();

        let result = store.update_credential_hash("nobody", "new").await;
        assert!(matches!(result, Err(AppError::UnknownPrincipal)));

        store.create(principal("S100")).await.unwrap();
        store.update_credential_hash("S100", "new").await.unwrap();

        let stored = store.find_by_identifier("S100").await.unwrap().unwrap();
        assert_eq!(stored.credential_hash, "new");
    }

    #[actix_web::test]
    async fn test_verify_credential_uses_bcrypt() {
        let store = InMemoryPrincipalStore::new();
        let hash = bcrypt::hash("pw1", 4).unwrap();

        assert!(store.verify_credential("pw1", &hash).await.unwrap());
        assert!(!store.verify_credential("pw2", &hash).await.unwrap());
        assert!(!store.verify_credential("pw1", "not-a-bcrypt-hash").await.unwrap());
    }
}
