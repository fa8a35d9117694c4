//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 각 변형이 안정적인 HTTP 상태 코드와 JSON 응답으로 자동 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP Status |
//! |------|------|-------------|
//! | 자격 증명 | `MissingCredential` | 400 |
//! | 자격 증명 | `MalformedToken`, `ExpiredToken`, `WrongTokenKind` | 401 |
//! | 자격 증명 | `UnknownPrincipal` | 404 |
//! | 자격 증명 | `InvalidCredentials` | 404 / 400 |
//! | 자격 증명 | `InvalidRefreshToken` | 400 |
//! | 권한 | `InsufficientRole` | 403 |
//! | 조회 | `RetrievalFailed` | 500 |
//! | 인프라 | `DatabaseError`, `CacheError`, `Timeout`, `InternalError` | 500 |
//!
//! 자격 증명/권한 에러는 절대 일반 500 에러로 뭉개지지 않습니다.
//! 클라이언트는 "다시 로그인" 과 "권한 없음" 을 구분할 수 있어야 합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "error": "expired_token",
//!   "message": "Token has expired"
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 로그인 실패 원인
///
/// 존재하지 않는 식별자(404)와
/// 잘못된 비밀번호(400)를 서로 다른 상태 코드로 응답합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    /// 해당 식별자의 사용자가 없음
    UnknownIdentifier,
    /// 비밀번호 불일치
    SecretMismatch,
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// Authorization 헤더 또는 Bearer 값이 없음 (400 Bad Request)
    #[error("Authorization token missing")]
    MissingCredential,

    /// 토큰 구조 또는 서명이 유효하지 않음 (401 Unauthorized)
    #[error("Invalid token: {0}")]
    MalformedToken(String),

    /// 토큰 만료 (401 Unauthorized)
    #[error("Token has expired")]
    ExpiredToken,

    /// 용도가 다른 토큰이 제시됨 (401 Unauthorized)
    ///
    /// 리프레시 토큰으로 API를 호출하거나, 액세스 토큰으로 갱신을 시도한 경우입니다.
    #[error("Wrong token kind: expected {expected} token")]
    WrongTokenKind { expected: &'static str },

    /// 토큰의 주체가 저장소에 없음 (404 Not Found)
    #[error("Principal not found")]
    UnknownPrincipal,

    /// 현재 역할이 요구 역할을 만족하지 않음 (403 Forbidden)
    #[error("Forbidden: insufficient role")]
    InsufficientRole,

    /// 로그인 실패 (404 / 400)
    #[error("Invalid credentials")]
    InvalidCredentials(CredentialFailure),

    /// 리프레시 토큰으로 새 액세스 토큰을 발급할 수 없음 (400 Bad Request)
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// 컬렉션 조회 실패 (500 Internal Server Error)
    #[error("Error retrieving records: {0}")]
    RetrievalFailed(String),

    /// 서명 비밀키가 없어 토큰을 발급/검증할 수 없음 (500 Internal Server Error)
    #[error("Signing secret is not configured")]
    SigningKeyUnavailable,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 캐시 백엔드 관련 에러 (500 Internal Server Error)
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 어댑터 호출 시간 초과 (500 Internal Server Error)
    #[error("Timed out: {0}")]
    Timeout(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트가 분기 처리에 사용할 수 있는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "missing_credential",
            AppError::MalformedToken(_) => "malformed_token",
            AppError::ExpiredToken => "expired_token",
            AppError::WrongTokenKind { .. } => "wrong_token_kind",
            AppError::UnknownPrincipal => "unknown_principal",
            AppError::InsufficientRole => "insufficient_role",
            AppError::InvalidCredentials(_) => "invalid_credentials",
            AppError::InvalidRefreshToken => "invalid_refresh_token",
            AppError::RetrievalFailed(_) => "retrieval_failed",
            AppError::SigningKeyUnavailable => "signing_key_unavailable",
            AppError::ValidationError(_) => "validation_error",
            AppError::ConflictError(_) => "conflict",
            AppError::DatabaseError(_) => "database_error",
            AppError::CacheError(_) => "cache_error",
            AppError::Timeout(_) => "timeout",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::BAD_REQUEST,
            AppError::MalformedToken(_)
            | AppError::ExpiredToken
            | AppError::WrongTokenKind { .. } => StatusCode::UNAUTHORIZED,
            AppError::UnknownPrincipal => StatusCode::NOT_FOUND,
            AppError::InsufficientRole => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials(CredentialFailure::UnknownIdentifier) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials(CredentialFailure::SecretMismatch) => StatusCode::BAD_REQUEST,
            AppError::InvalidRefreshToken => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 각 에러를 `{ "error": code, "message": text }` JSON 응답으로 변환합니다.
    ///
    /// 5xx 에러는 서버 로그에만 상세 정보를 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패 [{}]: {}", self.code(), self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
