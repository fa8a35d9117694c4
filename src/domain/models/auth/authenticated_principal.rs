use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::principals::{Principal, Role};

/// 인가 가드를 통과한 주체 정보
///
/// 가드가 저장소에서 다시 조회한 현재 상태를 담습니다.
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    /// 주체 식별자
    pub identifier: String,

    /// 저장소 기준 현재 역할
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Principal> for AuthenticatedPrincipal {
    fn from(principal: &Principal) -> Self {
        Self {
            identifier: principal.identifier.clone(),
            role: principal.role.clone(),
            email: principal.email.clone(),
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인가 미들웨어가 Request Extensions에 넣어 둔 주체를 꺼냅니다.
impl FromRequest for AuthenticatedPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedPrincipal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
