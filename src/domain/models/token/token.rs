//! JWT 인증 토큰 클레임 및 토큰 쌍
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`)에 역할과 토큰 종류를 더한 페이로드입니다.
use serde::{Deserialize, Serialize};
use crate::domain::entities::principals::Role;

/// 토큰 종류
///
/// 리프레시 토큰은 새 액세스 토큰 발급에만 사용되며,
/// 인가 가드는 액세스 토큰만 받아들입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 주체 식별자
/// - `role`: 발급 시점의 역할 (인가 판정에는 사용하지 않음)
/// - `kind`: 토큰 종류
/// - `iat` / `exp`: 발급/만료 시각 (Unix timestamp, 초)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (식별자)
    pub sub: String,
    /// 발급 시점의 역할
    pub role: Role,
    /// 토큰 종류
    pub kind: TokenKind,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 로그인 시 발급되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
