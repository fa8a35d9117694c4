//! 인증 서비스
//!
//! 로그인, 토큰 갱신, 회원가입, 비밀번호 변경을 조합합니다.
//! 입력값 검증은 핸들러에서 `validator`로 먼저 수행합니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::auth::{ChangeCredentialRequest, PrincipalResponse, RefreshResponse, RegisterRequest};
use crate::domain::entities::principals::Role;
use crate::domain::models::token::TokenPair;
use crate::services::auth::{CredentialStore, TokenService};

pub struct AuthService {
    tokens: Arc<TokenService>,
    credentials: Arc<CredentialStore>,
}

impl AuthService {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<CredentialStore>) -> Self {
        Self { tokens, credentials }
    }

    /// 식별자와 비밀번호로 로그인하여 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials(UnknownIdentifier)` - 404
    /// * `InvalidCredentials(SecretMismatch)` - 400
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let pair = auth_service.login("S100", "pw1").await?;
    /// ```
    pub async fn login(&self, identifier: &str, secret: &str) -> AppResult<TokenPair> {
        let principal = self.credentials.authenticate(identifier, secret).await?;
        let pair = self.tokens.issue_pair(&principal)?;

        log::info!("로그인 성공 - 주체: {}, 역할: {}", principal.identifier, principal.role);
        Ok(pair)
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 실패 원인과 관계없이 호출자에게는 `InvalidRefreshToken`만 보입니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let access_token = self.tokens.refresh(refresh_token).map_err(|e| {
            log::warn!("토큰 갱신 실패 [{}]: {}", e.code(), e);
            AppError::InvalidRefreshToken
        })?;

        Ok(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.access_ttl_seconds(),
        })
    }

    /// 공개 가입. 항상 `student` 역할로 등록합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InsufficientRole` - `student` 이외의 역할을 요청한 경우
    /// * `AppError::ConflictError` - 중복 식별자
    pub async fn register(&self, request: RegisterRequest) -> AppResult<PrincipalResponse> {
        let requested = request.role.as_deref().map(Role::new);
        if requested.as_ref().is_some_and(|role| role.as_str() != Role::STUDENT) {
            log::warn!("공개 가입에서 상위 역할 요청 거부: {}", request.identifier);
            return Err(AppError::InsufficientRole);
        }

        self.create(request, Role::new(Role::STUDENT)).await
    }

    /// 관리자가 임의 역할의 주체를 등록합니다. 역할 생략 시 `student`.
    ///
    /// 호출 경로는 `admin` 역할 가드로 보호되어야 합니다.
    pub async fn provision(&self, request: RegisterRequest) -> AppResult<PrincipalResponse> {
        let role = Role::new(request.role.as_deref().unwrap_or(Role::STUDENT));
        self.create(request, role).await
    }

    /// 시작 시 초기 관리자 계정을 보장합니다. 이미 있으면 아무것도 하지 않습니다.
    ///
    /// 새로 만들었으면 `true`.
    pub async fn ensure_admin(&self, identifier: &str, secret: &str) -> AppResult<bool> {
        if self.credentials.find_principal(identifier).await?.is_some() {
            return Ok(false);
        }

        self.credentials
            .register(identifier, secret, Role::new(Role::ADMIN), None)
            .await?;

        log::info!("초기 관리자 계정 생성: {}", identifier);
        Ok(true)
    }

    async fn create(&self, request: RegisterRequest, role: Role) -> AppResult<PrincipalResponse> {
        let RegisterRequest { identifier, secret, email, .. } = request;

        let principal = self
            .credentials
            .register(identifier.trim(), &secret, role, email)
            .await?;

        log::info!("주체 등록 완료: {} ({})", principal.identifier, principal.role);
        Ok(PrincipalResponse::from(principal))
    }

    /// 인가된 주체의 비밀번호를 변경합니다.
    pub async fn change_credential(&self, identifier: &str, request: ChangeCredentialRequest) -> AppResult<()> {
        self.credentials
            .change_credential(identifier, &request.current_secret, &request.new_secret)
            .await?;

        log::info!("비밀번호 변경 완료: {}", identifier);
        Ok(())
    }

    /// 주체 프로필 조회
    pub async fn profile(&self, identifier: &str) -> AppResult<PrincipalResponse> {
        self.credentials
            .find_principal(identifier)
            .await?
            .map(PrincipalResponse::from)
            .ok_or(AppError::UnknownPrincipal)
    }
}
