use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Reception-desk record captured when a client request is taken in.
/// Upserted keyed on property_id; one record per property.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct IntakeRecord {
    pub id: Uuid,
    pub property_id: Uuid,
    pub reference_no: Option<String>,
    pub received_by: Option<Uuid>,
    pub received_at: Option<DateTime<Utc>>,
    pub contact_verified: bool,
    pub building_license_no: Option<String>,
    pub plan_no: Option<String>,
    pub land_use: Option<String>,
    pub onsite_services: JsonValue,
    pub parcel_no: Option<String>,
    pub neighbor_built: Option<bool>,
    pub land_nature: Option<String>,
    pub is_occupied: Option<bool>,
    pub documents: JsonValue,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
