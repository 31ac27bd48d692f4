use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::BigDecimal;
use validator::Validate;

use crate::models::appraisalmodel::{AppraisalStatus, ConfidenceLevel, ValuationMethod};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveAppraisalDto {
    pub market_value: Option<BigDecimal>,
    pub land_value: Option<BigDecimal>,
    pub building_value: Option<BigDecimal>,
    pub valuation_method: Option<ValuationMethod>,
    pub comparable_properties: Option<Vec<JsonValue>>,
    pub adjustments: Option<Vec<JsonValue>>,
    pub final_value: Option<BigDecimal>,
    pub confidence_level: Option<ConfidenceLevel>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,

    pub status: AppraisalStatus,

    // Assumptions & terms
    pub purpose: Option<String>,
    pub value_basis: Option<String>,
    pub method_used: Option<String>,
    #[validate(length(max = 10, message = "Currency must be at most 10 characters"))]
    pub currency: Option<String>,
    pub ownership_type: Option<String>,
    pub assignment_date: Option<NaiveDate>,
    pub inspection_date_ro: Option<NaiveDate>,
    pub inspection_time_ro: Option<NaiveTime>,
    pub assumptions: Option<String>,

    // Property documents
    pub deed_number: Option<String>,
    pub deed_date: Option<NaiveDate>,
    pub doc_building_license_no: Option<String>,
    pub doc_building_license_date: Option<NaiveDate>,

    // Boundaries & services
    pub boundary_north: Option<String>,
    pub boundary_south: Option<String>,
    pub boundary_east: Option<String>,
    pub boundary_west: Option<String>,
    pub public_services: Option<Vec<String>>,
    pub health_services: Option<Vec<String>>,
    pub attachments: Option<Vec<JsonValue>>,
}
