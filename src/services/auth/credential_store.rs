//! 자격 증명 저장소 어댑터
//!
//! [`PrincipalStore`] 포트 위에서 주체 조회, 비밀번호 검증, 가입, 비밀번호 변경을 담당합니다.
//! 저장소 호출은 어댑터 타임아웃으로, bcrypt 해싱/검증은 별도의 해싱 타임아웃으로 감쌉니다.

use std::sync::Arc;
use std::time::Duration;
use bcrypt::hash;
use crate::core::errors::{AppError, AppResult, CredentialFailure};
use crate::core::timeout::bounded;
use crate::domain::entities::principals::{Principal, Role};
use crate::repositories::principals::PrincipalStore;

pub struct CredentialStore {
    principals: Arc<dyn PrincipalStore>,
    timeout: Duration,
    bcrypt_cost: u32,
    hash_timeout: Duration,
}

impl CredentialStore {
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        timeout: Duration,
        bcrypt_cost: u32,
        hash_timeout: Duration,
    ) -> Self {
        Self { principals, timeout, bcrypt_cost, hash_timeout }
    }

    /// 식별자로 주체 조회
    pub async fn find_principal(&self, identifier: &str) -> AppResult<Option<Principal>> {
        bounded(self.timeout, "principal lookup", self.principals.find_by_identifier(identifier)).await
    }

    /// 평문 비밀번호가 주체의 해시와 일치하는지 확인
    ///
    /// bcrypt 비교는 저장소 I/O가 아니므로 해싱 타임아웃을 적용합니다.
    pub async fn verify_secret(&self, principal: &Principal, secret: &str) -> AppResult<bool> {
        bounded(
            self.hash_timeout,
            "credential verification",
            self.principals.verify_credential(secret, &principal.credential_hash),
        )
        .await
    }

    /// 식별자와 비밀번호로 주체를 인증합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials(UnknownIdentifier)` - 식별자 없음
    /// * `InvalidCredentials(SecretMismatch)` - 비밀번호 불일치
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> AppResult<Principal> {
        let principal = self
            .find_principal(identifier)
            .await?
            .ok_or(AppError::InvalidCredentials(CredentialFailure::UnknownIdentifier))?;

        if !self.verify_secret(&principal, secret).await? {
            return Err(AppError::InvalidCredentials(CredentialFailure::SecretMismatch));
        }

        Ok(principal)
    }

    /// 새 주체를 등록합니다. 비밀번호는 bcrypt 해시로만 저장됩니다.
    pub async fn register(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
        email: Option<String>,
    ) -> AppResult<Principal> {
        let credential_hash = self.hash_secret(secret).await?;
        let principal = Principal::new(identifier.to_string(), credential_hash, role, email);

        bounded(self.timeout, "principal create", self.principals.create(principal)).await
    }

    /// 현재 비밀번호를 확인한 뒤 새 비밀번호로 교체합니다.
    ///
    /// 이미 발급된 토큰은 만료될 때까지 유효합니다.
    pub async fn change_credential(&self, identifier: &str, current_secret: &str, new_secret: &str) -> AppResult<()> {
        self.authenticate(identifier, current_secret).await?;

        let credential_hash = self.hash_secret(new_secret).await?;
        bounded(
            self.timeout,
            "credential update",
            self.principals.update_credential_hash(identifier, &credential_hash),
        )
        .await
    }

    async fn hash_secret(&self, secret: &str) -> AppResult<String> {
        let secret = secret.to_string();
        let cost = self.bcrypt_cost;
        let hash_start = std::time::Instant::now();

        let hashing = async move {
            tokio::task::spawn_blocking(move || hash(secret, cost))
                .await
                .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 작업 실패: {}", e)))?
                .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
        };
        let credential_hash = bounded(self.hash_timeout, "credential hashing", hashing).await?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(credential_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::repositories::principals::InMemoryPrincipalStore;

    fn credential_store() -> CredentialStore {
        CredentialStore::new(Arc::new(InMemoryPrincipalStore::new()), Duration::from_secs(5), 4, Duration::from_secs(5))
    }

    /// 비밀번호 검증만 느린 저장소 (부하 걸린 블로킹 풀 흉내)
    struct SlowVerifyStore {
        inner: InMemoryPrincipalStore,
        delay: Duration,
    }

    #[async_trait]
    impl PrincipalStore for SlowVerifyStore {
        async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Principal>> {
            self.inner.find_by_identifier(identifier).await
        }

        async fn create(&self, principal: Principal) -> AppResult<Principal> {
            self.inner.create(principal).await
        }

        async fn update_credential_hash(&self, identifier: &str, credential_hash: &str) -> AppResult<()> {
            self.inner.update_credential_hash(identifier, credential_hash).await
        }

        async fn verify_credential(&self, plaintext: &str, credential_hash: &str) -> AppResult<bool> {
            tokio::time::sleep(self.delay).await;
            self.inner.verify_credential(plaintext, credential_hash).await
        }
    }

    fn slow_verify_store(adapter_timeout: Duration, hash_timeout: Duration) -> CredentialStore {
        let store = SlowVerifyStore { inner: InMemoryPrincipalStore::new(), delay: Duration::from_millis(100) };
        CredentialStore::new(Arc::new(store), adapter_timeout, 4, hash_timeout)
    }

    #[actix_web::test]
    async fn test_verification_uses_hash_timeout_not_adapter_timeout() {
        let credentials = slow_verify_store(Duration::from_millis(20), Duration::from_secs(5));
        credentials.register("S100", "pw1", Role::new("student"), None).await.unwrap();

        assert!(credentials.authenticate("S100", "pw1").await.is_ok());
    }

    #[actix_web::test]
    async fn test_verification_still_bounded_by_hash_timeout() {
        let credentials = slow_verify_store(Duration::from_secs(5), Duration::from_millis(20));
        let hash = bcrypt::hash("pw1", 4).unwrap();
        let principal = Principal::new("S100".to_string(), hash, Role::new("student"), None);

        assert!(matches!(
            credentials.verify_secret(&principal, "pw1").await,
            Err(AppError::Timeout(_))
        ));
    }

    #[actix_web::test]
    async fn test_register_never_stores_plaintext() {
        let credentials = credential_store();

        let principal = credentials
            .register("S100", "pw1", Role::new("student"), None)
            .await
            .unwrap();

        assert_ne!(principal.credential_hash, "pw1");
        assert!(credentials.verify_secret(&principal, "pw1").await.unwrap());
    }

    #[actix_web::test]
    async fn test_authenticate_distinguishes_failures() {
        let credentials = credential_store();
        credentials.register("S100", "pw1", Role::new("student"), None).await.unwrap();

        assert!(matches!(
            credentials.authenticate("S999", "pw1").await,
            Err(AppError::InvalidCredentials(CredentialFailure::UnknownIdentifier))
        ));
        assert!(matches!(
            credentials.authenticate("S100", "wrong").await,
            Err(AppError::InvalidCredentials(CredentialFailure::SecretMismatch))
        ));
        assert!(credentials.authenticate("S100", "pw1").await.is_ok());
    }

    #[actix_web::test]
    async fn test_change_credential_replaces_hash() {
        let credentials = credential_store();
        credentials.register("S100", "pw1", Role::new("student"), None).await.unwrap();

        assert!(matches!(
            credentials.change_credential("S100", "wrong", "pw2-new").await,
            Err(AppError::InvalidCredentials(CredentialFailure::SecretMismatch))
        ));

        credentials.change_credential("S100", "pw1", "pw2-new").await.unwrap();

        assert!(credentials.authenticate("S100", "pw1").await.is_err());
        assert!(credentials.authenticate("S100", "pw2-new").await.is_ok());
    }
}
