//! Principal Entity Implementation
//!
//! 인증 주체(사용자) 엔티티입니다.
//! 식별자(학번 등)는 전역적으로 유일하며, 비밀번호는 bcrypt 해시로만 보관합니다.

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 열린 문자열 열거형입니다. `student`, `faculty`, `admin` 외의 값도 허용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub const STUDENT: &'static str = "student";
    pub const FACULTY: &'static str = "faculty";
    pub const ADMIN: &'static str = "admin";

    /// 앞뒤 공백을 제거하고 소문자로 정규화합니다.
    pub fn new(role: impl AsRef<str>) -> Self {
        Self(role.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::new(value)
    }
}

/// 인증 주체 엔티티
///
/// - `identifier`: 전역 유일 식별자 (학번/교번)
/// - `credential_hash`: bcrypt 해시. 평문으로 저장하거나 로그에 남기지 않습니다
/// - `role`: 권한 판정의 기준이 되는 현재 역할
///
/// 나머지 필드는 인가와 무관한 프로필 속성입니다.
/// 이 코어는 주체를 물리적으로 삭제하지 않습니다.
#[derive(Clone, Serialize, Deserialize)]
pub struct Principal {
    /// 전역 유일 식별자
    pub identifier: String,
    /// bcrypt 해시된 비밀번호
    pub credential_hash: String,
    /// 현재 역할
    pub role: Role,
    /// 이메일 주소
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 프로필 이미지 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// 생성 시간
    pub created_at: DateTime<Utc>,
    /// 수정 시간
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// 새 주체 생성. `credential_hash`는 이미 해시된 값이어야 합니다.
    pub fn new(identifier: String, credential_hash: String, role: Role, email: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            identifier,
            credential_hash,
            role,
            email,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("identifier", &self.identifier)
            .field("credential_hash", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
