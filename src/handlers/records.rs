//! 실험 기록 HTTP 핸들러
//!
//! - `GET  /api/v1/records[?created_by=]` - 공개, 캐시-어사이드
//! - `POST /api/v1/records` - `admin` 또는 `faculty`
use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{AppError, AppState};
use crate::domain::dto::records::{CreateRecordRequest, RecordQuery};
use crate::domain::models::auth::AuthenticatedPrincipal;

pub async fn list_records(
    state: web::Data<AppState>,
    query: web::Query<RecordQuery>,
) -> Result<HttpResponse, AppError> {
    let records = state.records.fetch_collection(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(records))
}

pub async fn create_record(
    state: web::Data<AppState>,
    principal: AuthenticatedPrincipal,
    payload: web::Json<CreateRecordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let record = state.records
        .create_record(&principal, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(record))
}
