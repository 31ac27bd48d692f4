use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "inspection_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Pending,
    InProgress,
    Completed,
}

impl InspectionStatus {
    pub fn to_str(&self) -> &str {
        match self {
            InspectionStatus::Pending => "pending",
            InspectionStatus::InProgress => "in_progress",
            InspectionStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "condition_rating", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConditionRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Inspection {
    pub id: Uuid,
    pub property_id: Uuid,
    pub inspector_id: Option<Uuid>,

    pub inspection_date: Option<NaiveDate>,
    pub structural_condition: Option<ConditionRating>,
    pub interior_condition: Option<ConditionRating>,
    pub exterior_condition: Option<ConditionRating>,

    pub amenities: JsonValue,
    pub defects: JsonValue,
    pub photos: JsonValue,
    pub notes: Option<String>,
    pub status: InspectionStatus,

    // Site document fields filled in by the inspector
    pub building_license_no: Option<String>,
    pub plan_no: Option<String>,
    pub land_use: Option<String>,
    pub onsite_services: Option<JsonValue>,
    pub parcel_no: Option<String>,
    pub neighbor_built: Option<bool>,
    pub land_nature: Option<String>,
    pub is_occupied: Option<bool>,

    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
