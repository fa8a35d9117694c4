//! 인가 요구사항 모델
use crate::domain::entities::principals::Role;

/// 요구되는 역할 정보
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    /// 인증된 주체라면 역할과 무관하게 허용
    Authenticated,
    /// 특정 단일 역할이 필요
    Single(String),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
}

impl RequiredRole {
    /// 역할 목록으로부터 요구사항을 생성합니다.
    ///
    /// 한 개면 `Single`, 여러 개면 `Any`입니다.
    /// 빈 목록은 `Authenticated`가 아니라 아무도 만족할 수 없는 `Any([])`가 됩니다.
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles: Vec<String> = roles
            .into_iter()
            .map(|r| Role::new(r).as_str().to_string())
            .collect();

        if roles.len() == 1 {
            RequiredRole::Single(roles.remove(0))
        } else {
            RequiredRole::Any(roles)
        }
    }

    /// 주체의 현재 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: &Role) -> bool {
        match self {
            RequiredRole::Authenticated => true,
            RequiredRole::Single(required_role) => role.as_str() == required_role,
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|r| role.as_str() == r)
            }
        }
    }
}
