//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명 기반의 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 검증은 서명과 만료만 확인하는 순수 연산이며, 주체 조회는 호출자의 몫입니다.
//! 서버 측 세션 테이블이 없으므로 발급된 토큰은 만료 전까지 개별 폐기할 수 없습니다.

use std::sync::Arc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use crate::config::{SecretProvider, TokenSettings};
use crate::core::clock::Clock;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::principals::{Principal, Role};
use crate::domain::models::token::{TokenClaims, TokenKind, TokenPair};

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// JWT 토큰 관리 서비스
///
/// 서명 비밀키는 생성 시 [`SecretProvider`]에서 한 번 읽습니다.
/// 비밀키가 없으면 서비스는 닫힌 상태로 실패합니다. 모든 발급과 검증이
/// `AppError::SigningKeyUnavailable`로 거부됩니다.
///
/// ```rust,ignore
/// let tokens = TokenService::new(&EnvSecretProvider, JwtConfig::settings(), Arc::new(SystemClock));
/// let pair = tokens.issue_pair(&principal)?;
/// let claims = tokens.verify(&pair.access_token)?;
/// ```
pub struct TokenService {
    keys: Option<SigningKeys>,
    settings: TokenSettings,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secrets: &dyn SecretProvider, settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let keys = secrets.signing_secret().map(|secret| SigningKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        if keys.is_none() {
            log::error!("서명 비밀키가 설정되지 않았습니다. 모든 토큰이 거부됩니다");
        }

        Self { keys, settings, clock }
    }

    /// 서명 비밀키가 있어 토큰을 발급/검증할 수 있는지 여부
    pub fn is_operational(&self) -> bool {
        self.keys.is_some()
    }

    /// 액세스 토큰 유효 기간 (초)
    pub fn access_ttl_seconds(&self) -> i64 {
        self.settings.access_ttl.num_seconds()
    }

    fn keys(&self) -> AppResult<&SigningKeys> {
        self.keys.as_ref().ok_or(AppError::SigningKeyUnavailable)
    }

    /// 주체에게 지정된 종류의 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::SigningKeyUnavailable` - 서명 비밀키 없음
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue(&self, principal: &Principal, kind: TokenKind) -> AppResult<String> {
        self.sign(&principal.identifier, &principal.role, kind)
    }

    /// 로그인 시 액세스/리프레시 토큰 쌍을 발급합니다.
    pub fn issue_pair(&self, principal: &Principal) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(principal, TokenKind::Access)?,
            refresh_token: self.issue(principal, TokenKind::Refresh)?,
            expires_in: self.access_ttl_seconds(),
        })
    }

    fn sign(&self, subject: &str, role: &Role, kind: TokenKind) -> AppResult<String> {
        let keys = self.keys()?;
        let now = self.clock.now();
        let ttl = match kind {
            TokenKind::Access => self.settings.access_ttl,
            TokenKind::Refresh => self.settings.refresh_ttl,
        };

        let claims = TokenClaims {
            sub: subject.to_string(),
            role: role.clone(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            log::error!("JWT 토큰 서명 실패: {}", e);
            AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e))
        })
    }

    /// 토큰의 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// 만료는 서명보다 먼저 주입된 시계로 판정합니다. 따라서 만료된 토큰은
    /// 서명이 맞든 틀리든 항상 `ExpiredToken`입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExpiredToken` - 현재 시각이 `exp` 이상
    /// * `AppError::MalformedToken` - 구조 또는 서명이 유효하지 않음
    /// * `AppError::SigningKeyUnavailable` - 서명 비밀키 없음
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let keys = self.keys()?;

        let mut structural = Validation::new(Algorithm::HS256);
        structural.insecure_disable_signature_validation();
        structural.validate_exp = false;

        let unverified = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &structural)
            .map_err(|e| AppError::MalformedToken(e.to_string()))?
            .claims;

        if self.clock.now().timestamp() >= unverified.exp {
            return Err(AppError::ExpiredToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        decode::<TokenClaims>(token, &keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::MalformedToken(e.to_string()))
    }

    /// 액세스 토큰만 받아들이는 검증
    pub fn verify_access(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AppError::WrongTokenKind { expected: TokenKind::Access.as_str() });
        }
        Ok(claims)
    }

    /// 리프레시 토큰으로 같은 주체/역할의 새 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// `verify`의 에러에 더해, 액세스 토큰이 제시되면 `WrongTokenKind`
    pub fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.verify(refresh_token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AppError::WrongTokenKind { expected: TokenKind::Refresh.as_str() });
        }

        self.sign(&claims.sub, &claims.role, TokenKind::Access)
    }
}
