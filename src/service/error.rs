use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No report is available for appraisal {0}")]
    ReportNotAvailable(Uuid),

    #[error("Not authorized to view the report for appraisal {0}")]
    ReportNotAuthorized(Uuid),

    #[error("Appraisal {0} not found")]
    AppraisalNotFound(Uuid),

    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    #[error("Cannot review appraisal {0} before it is completed")]
    ReviewBeforeAppraisalCompleted(Uuid),

    #[error("Cannot deliver the report for appraisal {0} before the review is approved")]
    DeliveryBeforeApproval(Uuid),

    #[error("A delivery is already recorded for appraisal {0}")]
    DeliveryAlreadyRecorded(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed report row: {0}")]
    MalformedReport(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::ReportNotAvailable(_) => {
                HttpError::not_found(ErrorMessage::ReportNotAvailable.to_string())
            }

            ServiceError::ReportNotAuthorized(_) => {
                HttpError::forbidden(ErrorMessage::ReportNotAuthorized.to_string())
            }

            ServiceError::AppraisalNotFound(_) | ServiceError::PropertyNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::ReviewBeforeAppraisalCompleted(_)
            | ServiceError::DeliveryBeforeApproval(_)
            | ServiceError::DeliveryAlreadyRecorded(_)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::MalformedReport(_) | ServiceError::Database(_) => {
                HttpError::server_error(error.to_string())
            }
        }
    }
}
