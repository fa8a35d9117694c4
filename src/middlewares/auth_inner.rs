use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::{AppError, AppState};
use crate::domain::models::auth::RequiredRole;

/// 인가 미들웨어의 실제 Service 구현
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: RequiredRole,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            match authorize_request(&req, &required_role).await {
                Ok(principal) => {
                    log::debug!("인가 성공: 주체 {}", principal.identifier);
                    // 주체 정보를 Request Extensions에 저장
                    req.extensions_mut().insert(principal);
                }
                Err(err) => {
                    log::warn!("인가 실패 [{}]: {} {}", err.code(), req.method(), req.path());
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

async fn authorize_request(
    req: &ServiceRequest,
    required_role: &RequiredRole,
) -> Result<crate::domain::models::auth::AuthenticatedPrincipal, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("애플리케이션 상태가 등록되지 않았습니다".to_string()))?;

    let authorization = match req.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::MalformedToken("authorization header is not valid ASCII".to_string()))?
                .to_string(),
        ),
    };

    state.guard.authorize(authorization.as_deref(), required_role).await
}
