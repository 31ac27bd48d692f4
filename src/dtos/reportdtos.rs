use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reportmodel::{FullReport, ReportSummary};

/// Query string for the admin report register.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct ReportQueryDto {
    #[validate(length(min = 1, max = 200, message = "Search term must be 1-200 characters"))]
    pub q: Option<String>,

    pub property_type: Option<String>,
    pub review_status: Option<String>,
    pub delivered_from: Option<DateTime<Utc>>,
    pub delivered_to: Option<DateTime<Utc>>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponseDto {
    pub status: String,
    pub data: FullReport,
}

#[derive(Debug, Serialize)]
pub struct ReportListResponseDto {
    pub status: String,
    pub reports: Vec<ReportSummary>,
    pub results: usize,
}
