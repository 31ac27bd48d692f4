use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reviewmodel::ReviewStatus;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveReviewDto {
    pub review_status: ReviewStatus,

    #[validate(length(max = 5000, message = "Comments must be at most 5000 characters"))]
    pub comments: Option<String>,

    pub requested_changes: Option<Vec<String>>,
}
