use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveIntakeRecordDto {
    /// Left blank on first save; the server assigns a reference number.
    pub reference_no: Option<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub contact_verified: Option<bool>,
    pub building_license_no: Option<String>,
    pub plan_no: Option<String>,
    pub land_use: Option<String>,
    pub onsite_services: Option<Vec<String>>,
    pub parcel_no: Option<String>,
    pub neighbor_built: Option<bool>,
    pub land_nature: Option<String>,
    pub is_occupied: Option<bool>,
    pub documents: Option<Vec<JsonValue>>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}
