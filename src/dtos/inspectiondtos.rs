use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::inspectionmodel::{ConditionRating, InspectionStatus};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveInspectionDto {
    pub inspection_date: Option<NaiveDate>,

    pub structural_condition: Option<ConditionRating>,
    pub interior_condition: Option<ConditionRating>,
    pub exterior_condition: Option<ConditionRating>,

    pub amenities: Option<Vec<String>>,
    pub defects: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,

    pub status: InspectionStatus,

    // Site documents
    pub building_license_no: Option<String>,
    pub plan_no: Option<String>,
    pub land_use: Option<String>,
    pub onsite_services: Option<Vec<String>>,
    pub parcel_no: Option<String>,
    pub neighbor_built: Option<bool>,
    pub land_nature: Option<String>,
    pub is_occupied: Option<bool>,
}
