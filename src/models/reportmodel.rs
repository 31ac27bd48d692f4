use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::types::BigDecimal;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Denormalized report row, as produced by the `full_reports` view or
/// assembled from the base tables when the view is unavailable.
///
/// Fields added to the schema after the view was first shipped are
/// `Option` and default to `None`, so a row coming from an older view
/// deserializes cleanly and gets patched from the appraisal afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FullReport {
    pub appraisal_id: Uuid,
    pub property_id: Uuid,
    pub owner_id: Uuid,

    // Property
    pub property_address: String,
    pub property_type: String,
    pub area_sqm: BigDecimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub owner_name: String,
    pub owner_contact: String,
    pub property_status: String,
    pub property_created_at: DateTime<Utc>,
    pub property_updated_at: DateTime<Utc>,

    // Inspection (absent when the appraisal was done without one)
    pub inspection_id: Option<Uuid>,
    pub inspection_date: Option<NaiveDate>,
    pub structural_condition: Option<String>,
    pub interior_condition: Option<String>,
    pub exterior_condition: Option<String>,
    pub amenities: Option<JsonValue>,
    pub defects: Option<JsonValue>,
    pub photos: Option<JsonValue>,
    pub inspection_notes: Option<String>,
    pub inspection_status: Option<String>,
    pub inspection_created_at: Option<DateTime<Utc>>,
    pub inspection_completed_at: Option<DateTime<Utc>>,
    pub building_license_no: Option<String>,
    pub plan_no: Option<String>,
    pub land_use: Option<String>,
    pub onsite_services: Option<JsonValue>,
    pub parcel_no: Option<String>,
    pub neighbor_built: Option<bool>,
    pub land_nature: Option<String>,
    pub is_occupied: Option<bool>,

    // Appraisal
    pub appraiser_id: Option<Uuid>,
    pub market_value: Option<BigDecimal>,
    pub land_value: Option<BigDecimal>,
    pub building_value: Option<BigDecimal>,
    pub valuation_method: Option<String>,
    pub comparable_properties: Option<JsonValue>,
    pub adjustments: Option<JsonValue>,
    pub final_value: Option<BigDecimal>,
    pub confidence_level: Option<String>,
    pub appraisal_notes: Option<String>,
    pub appraisal_status: String,
    pub appraisal_created_at: DateTime<Utc>,
    pub appraisal_completed_at: Option<DateTime<Utc>>,

    // Appraisal terms (schema evolution; patched from the appraisal when
    // the deployed view predates them)
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub value_basis: Option<String>,
    #[serde(default)]
    pub method_used: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub ownership_type: Option<String>,
    #[serde(default)]
    pub assignment_date: Option<NaiveDate>,
    #[serde(default)]
    pub inspection_date_ro: Option<NaiveDate>,
    #[serde(default)]
    pub inspection_time_ro: Option<NaiveTime>,
    #[serde(default)]
    pub assumptions: Option<String>,

    // Documents, boundaries & services (same schema-evolution handling)
    #[serde(default)]
    pub deed_number: Option<String>,
    #[serde(default)]
    pub deed_date: Option<NaiveDate>,
    #[serde(default)]
    pub doc_building_license_no: Option<String>,
    #[serde(default)]
    pub doc_building_license_date: Option<NaiveDate>,
    #[serde(default)]
    pub boundary_north: Option<String>,
    #[serde(default)]
    pub boundary_south: Option<String>,
    #[serde(default)]
    pub boundary_east: Option<String>,
    #[serde(default)]
    pub boundary_west: Option<String>,
    #[serde(default)]
    pub public_services: Option<JsonValue>,
    #[serde(default)]
    pub health_services: Option<JsonValue>,
    #[serde(default)]
    pub attachments: Option<JsonValue>,

    // Review (latest, optional)
    pub review_id: Option<Uuid>,
    pub reviewer_id: Option<Uuid>,
    pub review_status: Option<String>,
    pub comments: Option<String>,
    pub requested_changes: Option<JsonValue>,
    pub review_created_at: Option<DateTime<Utc>>,
    pub review_completed_at: Option<DateTime<Utc>>,

    // Delivery (required; a report without a delivery is not a report)
    pub delivery_id: Uuid,
    pub delivered_by: Option<Uuid>,
    pub delivery_method: String,
    pub recipient_email: Option<String>,
    pub report_url: Option<String>,
    pub delivered_at: DateTime<Utc>,
    pub delivery_created_at: DateTime<Utc>,
}

/// Compact row for the admin report register.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ReportSummary {
    pub appraisal_id: Uuid,
    pub property_id: Uuid,
    pub owner_id: Uuid,
    pub property_address: String,
    pub property_type: String,
    pub area_sqm: BigDecimal,
    pub owner_name: String,
    pub final_value: Option<BigDecimal>,
    pub review_status: Option<String>,
    pub delivered_at: DateTime<Utc>,
}
