use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{inspectiondb::InspectionExt, propertydb::PropertyExt},
    dtos::inspectiondtos::SaveInspectionDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{inspectionmodel::InspectionStatus, propertymodel::WorkflowStage},
    AppState,
};

pub async fn save_inspection(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SaveInspectionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let completed = body.status == InspectionStatus::Completed;

    let inspection = app_state
        .db_client
        .save_inspection(property.id, user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Advisory stored status; the derived stage does not depend on it.
    if completed {
        app_state
            .db_client
            .update_property_status(property.id, WorkflowStage::Inspection.to_str())
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        tracing::info!("inspection for property {} completed", property.id);
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "inspection": inspection }
    })))
}
