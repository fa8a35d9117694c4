//! 인가 가드
//!
//! 요청 하나에 대해 다음 단계를 순서대로 수행하고 첫 실패에서 멈춥니다.
//!
//! 1. `Authorization: Bearer <token>` 추출 (없으면 `MissingCredential`)
//! 2. 액세스 토큰 검증 (`ExpiredToken` / `MalformedToken` / `WrongTokenKind`)
//! 3. 토큰의 식별자로 저장소에서 주체를 다시 조회 (없으면 `UnknownPrincipal`)
//! 4. 토큰에 담긴 역할이 아니라 저장소의 현재 역할로 요구 역할 확인 (`InsufficientRole`)
//!
//! 부수 효과가 없으며 같은 입력에 대해 같은 결과를 냅니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::{AuthenticatedPrincipal, RequiredRole};
use crate::services::auth::{CredentialStore, TokenService};

pub struct AuthorizationGuard {
    tokens: Arc<TokenService>,
    credentials: Arc<CredentialStore>,
}

impl AuthorizationGuard {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<CredentialStore>) -> Self {
        Self { tokens, credentials }
    }

    /// Authorization 헤더 값으로 요청을 인가합니다.
    ///
    /// # Arguments
    ///
    /// * `authorization` - Authorization 헤더 원문 (없으면 `None`)
    /// * `required` - 요구 역할
    ///
    /// # 반환값
    ///
    /// 저장소 기준 현재 상태의 [`AuthenticatedPrincipal`]
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &RequiredRole,
    ) -> AppResult<AuthenticatedPrincipal> {
        let token = extract_bearer_token(authorization)?;
        let claims = self.tokens.verify_access(token)?;

        let principal = self
            .credentials
            .find_principal(&claims.sub)
            .await?
            .ok_or(AppError::UnknownPrincipal)?;

        if !required.is_satisfied(&principal.role) {
            log::warn!(
                "권한 부족: 주체 {} (현재 역할 {}), 필요 권한: {:?}",
                principal.identifier, principal.role, required
            );
            return Err(AppError::InsufficientRole);
        }

        if principal.role != claims.role {
            log::debug!(
                "토큰 발급 이후 역할 변경됨: {} ({} -> {})",
                principal.identifier, claims.role, principal.role
            );
        }

        Ok(AuthenticatedPrincipal::from(&principal))
    }
}

/// `Bearer {token}` 형식에서 토큰 부분만 추출합니다.
///
/// 헤더가 없거나 토큰 값이 비어 있으면 `MissingCredential`,
/// Bearer가 아닌 스킴이면 `MalformedToken`입니다.
pub fn extract_bearer_token(authorization: Option<&str>) -> AppResult<&str> {
    let header = authorization
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(AppError::MissingCredential)?;

    let (scheme, value) = header
        .split_once(char::is_whitespace)
        .unwrap_or((header, ""));

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::MalformedToken("unsupported authorization scheme".to_string()));
    }

    match value.trim() {
        "" => Err(AppError::MissingCredential),
        token => Ok(token),
    }
}
