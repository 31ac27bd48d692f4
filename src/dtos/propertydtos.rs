use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;
use validator::Validate;
use chrono::{DateTime, Utc};

use crate::models::propertymodel::{Property, PropertyType, WorkflowStage};
use crate::service::gate::TabAccess;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePropertyDto {
    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub property_address: String,

    pub property_type: PropertyType,

    pub area_sqm: BigDecimal,

    #[validate(range(min = 0, max = 100, message = "Bedrooms out of range"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, max = 100, message = "Bathrooms out of range"))]
    pub bathrooms: Option<i32>,

    #[validate(range(min = 1800, max = 2100, message = "Year built out of range"))]
    pub year_built: Option<i32>,

    #[validate(length(min = 1, max = 255, message = "Owner name is required"))]
    pub owner_name: String,

    #[validate(length(min = 1, max = 255, message = "Owner contact is required"))]
    pub owner_contact: String,

    pub city: Option<String>,
    pub district: Option<String>,
    pub location_lat: Option<BigDecimal>,
    pub location_lng: Option<BigDecimal>,
    pub location_zoom: Option<i32>,
}

/// Card-level projection for list views: the property plus its derived
/// workflow stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyCardDto {
    pub id: Uuid,
    pub property_address: String,
    pub property_type: String,
    pub area_sqm: BigDecimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub owner_name: String,
    pub city: Option<String>,
    pub district: Option<String>,
    pub stage: String,
    pub created_at: DateTime<Utc>,
}

impl PropertyCardDto {
    pub fn from_property(property: &Property, stage: WorkflowStage) -> Self {
        Self {
            id: property.id,
            property_address: property.property_address.clone(),
            property_type: property.property_type.to_str().to_string(),
            area_sqm: property.area_sqm.clone(),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            owner_name: property.owner_name.clone(),
            city: property.city.clone(),
            district: property.district.clone(),
            stage: stage.to_str().to_string(),
            created_at: property.created_at,
        }
    }
}

/// Everything the detail screen needs in one response: the property, its
/// child records, the derived stage, and the caller's tab set.
#[derive(Debug, Serialize)]
pub struct PropertyDetailDto {
    pub property: Property,
    pub inspection: Option<crate::models::inspectionmodel::Inspection>,
    pub appraisal: Option<crate::models::appraisalmodel::Appraisal>,
    pub review: Option<crate::models::reviewmodel::Review>,
    pub delivery: Option<crate::models::deliverymodel::Delivery>,
    pub stage: String,
    pub tabs: Vec<TabAccess>,
}
