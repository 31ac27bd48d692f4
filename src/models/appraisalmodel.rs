use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::FromRow;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "appraisal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppraisalStatus {
    Pending,
    Completed,
}

impl AppraisalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            AppraisalStatus::Pending => "pending",
            AppraisalStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "valuation_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValuationMethod {
    Comparative,
    Cost,
    Income,
    Mixed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "confidence_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appraisal {
    pub id: Uuid,
    pub property_id: Uuid,
    pub inspection_id: Option<Uuid>,
    pub appraiser_id: Option<Uuid>,

    // Valuation
    pub market_value: Option<BigDecimal>,
    pub land_value: Option<BigDecimal>,
    pub building_value: Option<BigDecimal>,
    pub valuation_method: Option<ValuationMethod>,
    pub comparable_properties: JsonValue,
    pub adjustments: JsonValue,
    pub final_value: Option<BigDecimal>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub notes: Option<String>,
    pub status: AppraisalStatus,

    // Assumptions & terms
    pub purpose: Option<String>,
    pub value_basis: Option<String>,
    pub method_used: Option<String>,
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
    pub public_services: Option<JsonValue>,
    pub health_services: Option<JsonValue>,
    pub attachments: Option<JsonValue>,

    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
