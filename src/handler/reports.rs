use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::reportdb::{ReportExt, ReportSearchFilters},
    dtos::reportdtos::{ReportListResponseDto, ReportQueryDto, ReportResponseDto},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn report_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(list_reports).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/:appraisal_id", get(get_report))
        .route("/by-property/:property_id", get(get_report_for_property))
}

pub async fn get_report(
    Path(appraisal_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state
        .report_service
        .fetch_report(appraisal_id, &user.user)
        .await?;

    Ok(Json(ReportResponseDto {
        status: "success".to_string(),
        data: report,
    }))
}

/// Resolve the latest delivered report for a property, then fetch it. The
/// client dashboard links to reports per property, not per appraisal.
pub async fn get_report_for_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let appraisal_id = app_state
        .report_service
        .latest_report_for_property(property_id)
        .await?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ReportNotAvailable.to_string()))?;

    let report = app_state
        .report_service
        .fetch_report(appraisal_id, &user.user)
        .await?;

    Ok(Json(ReportResponseDto {
        status: "success".to_string(),
        data: report,
    }))
}

pub async fn list_reports(
    Query(query_params): Query<ReportQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(50);

    let filters = ReportSearchFilters {
        q: query_params.q,
        property_type: query_params.property_type,
        review_status: query_params.review_status,
        delivered_from: query_params.delivered_from,
        delivered_to: query_params.delivered_to,
    };

    let reports = app_state
        .db_client
        .list_report_summaries(filters, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReportListResponseDto {
        status: "success".to_string(),
        results: reports.len(),
        reports,
    }))
}
