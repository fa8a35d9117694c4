//! Authentication HTTP Handlers
//!
//! 가입, 로그인, 토큰 갱신, 내 정보 조회, 비밀번호 변경 엔드포인트입니다.
//!
//! - `POST /api/v1/auth/register` (공개, `student` 전용)
//! - `POST /api/v1/auth/principals` (`admin` 전용, 임의 역할)
//! - `POST /api/v1/auth/login`
//! - `POST /api/v1/auth/refresh`
//! - `GET  /api/v1/auth/me` (인가 필요)
//! - `PUT  /api/v1/auth/credential` (인가 필요)
use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::{AppError, AppState};
use crate::domain::dto::auth::{
    ChangeCredentialRequest, LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest,
};
use crate::domain::models::auth::AuthenticatedPrincipal;

pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let principal = state.auth.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "등록이 완료되었습니다",
        "principal": principal
    })))
}

/// 관리자 전용 주체 등록
///
/// 역할 가드는 라우트에서 `admin`으로 감쌉니다.
pub async fn provision(
    state: web::Data<AppState>,
    admin: AuthenticatedPrincipal,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let principal = state.auth.provision(payload.into_inner()).await?;
    log::info!("관리자 {}가 주체 {}를 등록했습니다", admin.identifier, principal.identifier);

    Ok(HttpResponse::Created().json(json!({
        "message": "등록이 완료되었습니다",
        "principal": principal
    })))
}

/// 식별자/비밀번호 로그인
///
/// 존재하지 않는 식별자는 404, 비밀번호 불일치는 400으로 응답합니다.
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = state.auth.login(&payload.identifier, &payload.secret).await?;

    Ok(HttpResponse::Ok().json(LoginResponse::from(pair)))
}

pub async fn refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    // 빈 토큰도 갱신 실패로 응답
    payload.validate()
        .map_err(|_| AppError::InvalidRefreshToken)?;

    let response = state.auth.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn me(
    state: web::Data<AppState>,
    principal: AuthenticatedPrincipal,
) -> Result<HttpResponse, AppError> {
    let profile = state.auth.profile(&principal.identifier).await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn change_credential(
    state: web::Data<AppState>,
    principal: AuthenticatedPrincipal,
    payload: web::Json<ChangeCredentialRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state.auth
        .change_credential(&principal.identifier, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "비밀번호가 변경되었습니다" })))
}
