use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        appraisaldb::AppraisalExt, deliverydb::DeliveryExt, propertydb::PropertyExt,
        reviewdb::ReviewExt,
    },
    dtos::deliverydtos::CreateDeliveryDto,
    error::HttpError,
    mail::mails::send_report_delivered_email,
    middleware::JWTAuthMiddeware,
    models::{
        deliverymodel::DeliveryMethod, propertymodel::WorkflowStage, reviewmodel::ReviewStatus,
    },
    service::error::ServiceError,
    AppState,
};

pub async fn create_delivery(
    Path(appraisal_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateDeliveryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_recipient()
        .map_err(HttpError::bad_request)?;

    let appraisal = app_state
        .db_client
        .get_appraisal_by_id(appraisal_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::from(ServiceError::AppraisalNotFound(appraisal_id)))?;

    // A report only goes out after the latest review approved it.
    let review = app_state
        .db_client
        .get_latest_review_by_appraisal(appraisal.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if review.map(|r| r.review_status) != Some(ReviewStatus::Approved) {
        return Err(ServiceError::DeliveryBeforeApproval(appraisal_id).into());
    }

    let existing = app_state
        .db_client
        .get_delivery_by_appraisal(appraisal.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(ServiceError::DeliveryAlreadyRecorded(appraisal_id).into());
    }

    let notify_email = matches!(
        body.delivery_method,
        DeliveryMethod::Email | DeliveryMethod::Portal
    );

    let delivery = app_state
        .db_client
        .create_delivery(appraisal.id, user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_property_status(appraisal.property_id, WorkflowStage::Completed.to_str())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "report for appraisal {} delivered via {}",
        appraisal.id,
        delivery.delivery_method.to_str()
    );

    // Best effort notification; a failed email never undoes the delivery.
    if notify_email {
        if let Some(recipient) = delivery.recipient_email.clone() {
            let owner_name = app_state
                .db_client
                .get_property_by_id(appraisal.property_id)
                .await
                .ok()
                .flatten()
                .map(|p| p.owner_name)
                .unwrap_or_default();

            let config = app_state.env.clone();
            let report_url = delivery.report_url.clone();
            tokio::spawn(async move {
                if let Err(e) = send_report_delivered_email(
                    &config,
                    &recipient,
                    &owner_name,
                    report_url.as_deref(),
                )
                .await
                {
                    tracing::warn!("delivery notification email failed: {}", e);
                }
            });
        }
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Report delivery recorded",
        "data": { "delivery": delivery }
    })))
}
