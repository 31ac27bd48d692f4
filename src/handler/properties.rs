use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        appraisaldb::AppraisalExt,
        db::DBClient,
        deliverydb::DeliveryExt,
        inspectiondb::InspectionExt,
        intakedb::IntakeExt,
        propertydb::PropertyExt,
        reviewdb::ReviewExt,
    },
    dtos::{
        intakedtos::SaveIntakeRecordDto,
        propertydtos::{CreatePropertyDto, PropertyCardDto, PropertyDetailDto},
        userdtos::RequestQueryDto,
    },
    error::{ErrorMessage, HttpError},
    handler::{appraisals, inspections},
    middleware::{role_check, JWTAuthMiddeware},
    models::{
        appraisalmodel::Appraisal, deliverymodel::Delivery, inspectionmodel::Inspection,
        propertymodel::WorkflowStage, reviewmodel::Review, usermodel::UserRole,
    },
    service::{
        gate::workflow_tabs,
        workflow::{derive_stage, WorkflowSnapshot},
    },
    utils::reference::generate_reference_no,
    AppState,
};

pub fn property_handler() -> Router {
    Router::new()
        .route("/", get(get_properties).post(create_property))
        .route("/:property_id", get(get_property))
        .route(
            "/:property_id/intake",
            get(get_intake_record)
                .put(save_intake_record)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                })),
        )
        .route(
            "/:property_id/inspection",
            put(inspections::save_inspection).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Inspector, UserRole::Admin])
            })),
        )
        .route(
            "/:property_id/appraisal",
            put(appraisals::save_appraisal).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Appraiser, UserRole::Admin])
            })),
        )
}

/// Child records for one property, fetched in dependency order: review and
/// delivery lookups need the appraisal id.
pub async fn load_workflow_records(
    db_client: &DBClient,
    property_id: Uuid,
) -> Result<
    (
        Option<Inspection>,
        Option<Appraisal>,
        Option<Review>,
        Option<Delivery>,
    ),
    sqlx::Error,
> {
    let inspection = db_client.get_inspection_by_property(property_id).await?;
    let appraisal = db_client.get_appraisal_by_property(property_id).await?;

    let (review, delivery) = match appraisal.as_ref() {
        Some(appraisal) => (
            db_client.get_latest_review_by_appraisal(appraisal.id).await?,
            db_client.get_delivery_by_appraisal(appraisal.id).await?,
        ),
        None => (None, None),
    };

    Ok((inspection, appraisal, review, delivery))
}

pub async fn derive_stage_for_property(
    db_client: &DBClient,
    property_id: Uuid,
) -> Result<WorkflowStage, sqlx::Error> {
    let (inspection, appraisal, review, delivery) =
        load_workflow_records(db_client, property_id).await?;
    let snapshot = WorkflowSnapshot::from_records(
        inspection.as_ref(),
        appraisal.as_ref(),
        review.as_ref(),
        delivery.as_ref(),
    );
    Ok(derive_stage(&snapshot))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Intake is for clients (or an admin entering one on their behalf).
    if !matches!(user.user.role, UserRole::Client | UserRole::Admin) {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let property = app_state
        .db_client
        .create_property(user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("property {} created at intake", property.id);

    let card = PropertyCardDto::from_property(&property, WorkflowStage::Intake);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Property registered and awaiting inspection scheduling",
        "data": { "property": card }
    })))
}

pub async fn get_properties(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1) as u32;
    let limit = query_params.limit.unwrap_or(10);

    // Clients only ever see their own requests; staff see the full queue.
    let properties = if user.user.role == UserRole::Client {
        app_state
            .db_client
            .get_properties_by_owner(user.user.id, page, limit)
            .await
    } else {
        app_state.db_client.get_properties(page, limit).await
    }
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut cards = Vec::with_capacity(properties.len());
    for property in &properties {
        let stage = derive_stage_for_property(&app_state.db_client, property.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        cards.push(PropertyCardDto::from_property(property, stage));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "properties": cards,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": cards.len()
            }
        }
    })))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    if user.user.role == UserRole::Client && property.user_id != user.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let (inspection, appraisal, review, delivery) =
        load_workflow_records(&app_state.db_client, property.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

    let snapshot = WorkflowSnapshot::from_records(
        inspection.as_ref(),
        appraisal.as_ref(),
        review.as_ref(),
        delivery.as_ref(),
    );
    let stage = derive_stage(&snapshot);
    let tabs = workflow_tabs(user.user.role, &snapshot);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": PropertyDetailDto {
            property,
            inspection,
            appraisal,
            review,
            delivery,
            stage: stage.to_str().to_string(),
            tabs,
        }
    })))
}

pub async fn get_intake_record(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let record = app_state
        .db_client
        .get_intake_record(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "intake_record": record }
    })))
}

pub async fn save_intake_record(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SaveIntakeRecordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if property.is_none() {
        return Err(HttpError::not_found("Property not found"));
    }

    let reference_no = body
        .reference_no
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(generate_reference_no);

    let record = app_state
        .db_client
        .upsert_intake_record(property_id, user.user.id, reference_no, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "intake_record": record }
    })))
}
