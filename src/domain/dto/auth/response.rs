use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::principals::{Principal, Role};
use crate::domain::models::token::TokenPair;

/// 로그인 응답 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}

impl From<TokenPair> for LoginResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.expires_in,
        }
    }
}

/// 토큰 갱신 응답 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 주체 응답 DTO (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub identifier: String,
    pub role: Role,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        let Principal {
            identifier,
            role,
            email,
            avatar,
            created_at,
            ..
        } = principal;

        Self {
            identifier,
            role,
            email,
            avatar,
            created_at,
        }
    }
}
