use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{appraisaldb::AppraisalExt, propertydb::PropertyExt, reviewdb::ReviewExt},
    dtos::reviewdtos::SaveReviewDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{
        appraisalmodel::AppraisalStatus, propertymodel::WorkflowStage, reviewmodel::ReviewStatus,
    },
    service::error::ServiceError,
    AppState,
};

pub async fn save_review(
    Path(appraisal_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SaveReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let appraisal = app_state
        .db_client
        .get_appraisal_by_id(appraisal_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::from(ServiceError::AppraisalNotFound(appraisal_id)))?;

    // The review form refuses submission until the appraisal is done,
    // even when a reviewer calls the endpoint directly.
    if appraisal.status != AppraisalStatus::Completed {
        return Err(ServiceError::ReviewBeforeAppraisalCompleted(appraisal_id).into());
    }

    let approved = body.review_status == ReviewStatus::Approved;

    let review = app_state
        .db_client
        .save_review(appraisal.id, user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Advisory stored status; the derived stage does not depend on it.
    if approved {
        app_state
            .db_client
            .update_property_status(appraisal.property_id, WorkflowStage::Review.to_str())
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    tracing::info!(
        "review for appraisal {} saved as {}",
        appraisal.id,
        review.review_status.to_str()
    );

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "review": review }
    })))
}
