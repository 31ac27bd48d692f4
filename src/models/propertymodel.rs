use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Land,
}

impl PropertyType {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::Industrial => "industrial",
            PropertyType::Land => "land",
        }
    }
}

/// Workflow stage derived from child records. The `status` column on
/// `properties` is advisory only and may lag behind the derived value.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStage {
    Intake,
    Inspection,
    Appraisal,
    Review,
    Completed,
}

impl WorkflowStage {
    pub fn to_str(&self) -> &str {
        match self {
            WorkflowStage::Intake => "intake",
            WorkflowStage::Inspection => "inspection",
            WorkflowStage::Appraisal => "appraisal",
            WorkflowStage::Review => "review",
            WorkflowStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub user_id: Uuid,

    pub property_address: String,
    pub property_type: PropertyType,
    pub area_sqm: BigDecimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,

    pub owner_name: String,
    pub owner_contact: String,

    // Location details (added after launch; NULL on older rows)
    pub city: Option<String>,
    pub district: Option<String>,
    pub location_lat: Option<BigDecimal>,
    pub location_lng: Option<BigDecimal>,
    pub location_zoom: Option<i32>,

    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
