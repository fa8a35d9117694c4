//! 인가 미들웨어
//!
//! 라우트 스코프에 `.wrap(AuthMiddleware::required_with_roles(...))`로 붙여
//! [`AuthorizationGuard`](crate::services::auth::AuthorizationGuard)를 요청마다 실행합니다.
//! 통과하면 [`AuthenticatedPrincipal`](crate::domain::models::auth::AuthenticatedPrincipal)이
//! Request Extensions에 저장되고, 실패하면 `AppError` 응답으로 즉시 종료됩니다.
//!
//! ```rust,ignore
//! web::scope("/records")
//!     .wrap(AuthMiddleware::required_with_roles(vec!["admin", "faculty"]))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인가 미들웨어 팩토리
pub struct AuthMiddleware {
    required_role: RequiredRole,
}

impl AuthMiddleware {
    pub fn new(required_role: RequiredRole) -> Self {
        Self { required_role }
    }

    /// 역할과 무관하게 유효한 액세스 토큰만 요구
    pub fn authenticated() -> Self {
        Self::new(RequiredRole::Authenticated)
    }

    /// 단일 역할 요구
    pub fn required_with_role(role: &str) -> Self {
        Self::new(RequiredRole::from_roles([role]))
    }

    /// 여러 역할 중 하나 요구 (OR 조건)
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        Self::new(RequiredRole::from_roles(roles))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}
