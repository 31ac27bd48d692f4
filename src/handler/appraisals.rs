use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{appraisaldb::AppraisalExt, inspectiondb::InspectionExt, propertydb::PropertyExt},
    dtos::appraisaldtos::SaveAppraisalDto,
    error::HttpError,
    handler::{deliveries, reviews},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

/// Review and delivery are appraisal-scoped steps; both live under the
/// appraisal router.
pub fn appraisal_handler() -> Router {
    Router::new()
        .route(
            "/:appraisal_id/review",
            put(reviews::save_review).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Reviewer, UserRole::Admin])
            })),
        )
        .route(
            "/:appraisal_id/delivery",
            post(deliveries::create_delivery).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Reviewer, UserRole::Admin])
            })),
        )
}

pub async fn save_appraisal(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(mut body): Json<SaveAppraisalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let inspection = app_state
        .db_client
        .get_inspection_by_property(property.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // The read-only echoes default to what the inspector recorded.
    if let Some(inspection) = inspection.as_ref() {
        if body.inspection_date_ro.is_none() {
            body.inspection_date_ro = inspection.inspection_date;
        }
        if body.doc_building_license_no.is_none() {
            body.doc_building_license_no = inspection.building_license_no.clone();
        }
    }

    let appraisal = app_state
        .db_client
        .save_appraisal(
            property.id,
            user.user.id,
            inspection.as_ref().map(|i| i.id),
            body,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "appraisal {} for property {} saved as {}",
        appraisal.id,
        property.id,
        appraisal.status.to_str()
    );

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "appraisal": appraisal }
    })))
}
