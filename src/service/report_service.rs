use std::sync::Arc;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::{
    db::{
        appraisaldb::AppraisalExt,
        db::{is_schema_missing, DBClient},
        deliverydb::DeliveryExt,
        inspectiondb::InspectionExt,
        propertydb::PropertyExt,
        reportdb::ReportExt,
        reviewdb::ReviewExt,
    },
    models::{
        appraisalmodel::{Appraisal, AppraisalStatus},
        deliverymodel::Delivery,
        inspectionmodel::Inspection,
        propertymodel::Property,
        reportmodel::FullReport,
        reviewmodel::Review,
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
};

/// Columns added to the report schema after the `full_reports` view first
/// shipped. A deployed view may predate any of them; a row missing one of
/// these keys gets the value patched in from the appraisal record.
const PATCHABLE_FIELDS: &[&str] = &[
    "purpose",
    "value_basis",
    "method_used",
    "currency",
    "ownership_type",
    "assignment_date",
    "inspection_date_ro",
    "inspection_time_ro",
    "assumptions",
    "deed_number",
    "deed_date",
    "doc_building_license_no",
    "doc_building_license_date",
    "boundary_north",
    "boundary_south",
    "boundary_east",
    "boundary_west",
    "public_services",
    "health_services",
    "attachments",
];

#[derive(Debug, Clone)]
pub struct ReportService {
    db_client: Arc<DBClient>,
}

impl ReportService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Produce the denormalized report for an appraisal, or a definitive
    /// "not available" / "not authorized" result.
    ///
    /// The precomputed view is tried first; the base-table assembly runs
    /// only when the view itself is unreachable (missing relation or
    /// column), never merely because no row matched.
    pub async fn fetch_report(
        &self,
        appraisal_id: Uuid,
        user: &User,
    ) -> Result<FullReport, ServiceError> {
        let mut report = match self.db_client.get_full_report_json(appraisal_id).await {
            Ok(Some(JsonValue::Object(mut row))) => {
                if PATCHABLE_FIELDS.iter().any(|key| !row.contains_key(*key)) {
                    if let Some(appraisal) =
                        self.db_client.get_appraisal_by_id(appraisal_id).await?
                    {
                        backfill_from_appraisal(&mut row, &appraisal)?;
                    }
                }
                serde_json::from_value::<FullReport>(JsonValue::Object(row))?
            }
            Ok(Some(_)) | Ok(None) => {
                return Err(ServiceError::ReportNotAvailable(appraisal_id));
            }
            Err(err) if is_schema_missing(&err) => {
                tracing::warn!(
                    "full_reports view unavailable ({}), assembling report {} from base tables",
                    err,
                    appraisal_id
                );
                self.assemble_from_base_tables(appraisal_id).await?
            }
            Err(err) => return Err(err.into()),
        };

        if user.role != UserRole::Admin && user.id != report.owner_id {
            return Err(ServiceError::ReportNotAuthorized(appraisal_id));
        }

        normalize_report_services(&mut report);
        Ok(report)
    }

    /// Appraisal id of the latest delivered report for a property. `None`
    /// means there is nothing to show yet (no completed appraisal, or no
    /// delivery recorded).
    pub async fn latest_report_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Uuid>, ServiceError> {
        match self
            .db_client
            .get_latest_delivered_appraisal_id(property_id)
            .await
        {
            Ok(found) => Ok(found),
            Err(err) if is_schema_missing(&err) => {
                tracing::warn!(
                    "full_reports view unavailable ({}), resolving report for property {} from base tables",
                    err,
                    property_id
                );
                let appraisal = self.db_client.get_appraisal_by_property(property_id).await?;
                let appraisal = match appraisal {
                    Some(a) if a.status == AppraisalStatus::Completed => a,
                    _ => return Ok(None),
                };
                let delivery = self
                    .db_client
                    .get_delivery_by_appraisal(appraisal.id)
                    .await?;
                Ok(delivery.map(|_| appraisal.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Rebuild the report shape from the base tables, in dependency order:
    /// each lookup needs an id produced by the previous one.
    async fn assemble_from_base_tables(
        &self,
        appraisal_id: Uuid,
    ) -> Result<FullReport, ServiceError> {
        let appraisal = self
            .db_client
            .get_appraisal_by_id(appraisal_id)
            .await?
            .filter(|a| a.status == AppraisalStatus::Completed)
            .ok_or(ServiceError::ReportNotAvailable(appraisal_id))?;

        let delivery = self
            .db_client
            .get_delivery_by_appraisal(appraisal_id)
            .await?
            .ok_or(ServiceError::ReportNotAvailable(appraisal_id))?;

        let property = self
            .db_client
            .get_property_by_id(appraisal.property_id)
            .await?
            .ok_or(ServiceError::ReportNotAvailable(appraisal_id))?;

        let inspection = match appraisal.inspection_id {
            Some(inspection_id) => self.db_client.get_inspection_by_id(inspection_id).await?,
            None => None,
        };

        let review = self
            .db_client
            .get_latest_review_by_appraisal(appraisal_id)
            .await?;

        Ok(assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            inspection.as_ref(),
            review.as_ref(),
        ))
    }
}

/// Copy every field into the denormalized shape. Fields that live on both
/// the appraisal and the inspection are sourced from the appraisal, with
/// the inspection as fallback.
pub fn assemble_full_report(
    appraisal: &Appraisal,
    delivery: &Delivery,
    property: &Property,
    inspection: Option<&Inspection>,
    review: Option<&Review>,
) -> FullReport {
    FullReport {
        appraisal_id: appraisal.id,
        property_id: property.id,
        owner_id: property.user_id,

        property_address: property.property_address.clone(),
        property_type: property.property_type.to_str().to_string(),
        area_sqm: property.area_sqm.clone(),
        bedrooms: property.bedrooms,
        bathrooms: property.bathrooms,
        year_built: property.year_built,
        owner_name: property.owner_name.clone(),
        owner_contact: property.owner_contact.clone(),
        property_status: property.status.clone(),
        property_created_at: property.created_at,
        property_updated_at: property.updated_at,

        inspection_id: inspection.map(|i| i.id),
        inspection_date: inspection.and_then(|i| i.inspection_date),
        structural_condition: inspection
            .and_then(|i| i.structural_condition)
            .map(|c| format!("{:?}", c).to_lowercase()),
        interior_condition: inspection
            .and_then(|i| i.interior_condition)
            .map(|c| format!("{:?}", c).to_lowercase()),
        exterior_condition: inspection
            .and_then(|i| i.exterior_condition)
            .map(|c| format!("{:?}", c).to_lowercase()),
        amenities: inspection.map(|i| i.amenities.clone()),
        defects: inspection.map(|i| i.defects.clone()),
        photos: inspection.map(|i| i.photos.clone()),
        inspection_notes: inspection.and_then(|i| i.notes.clone()),
        inspection_status: inspection.map(|i| i.status.to_str().to_string()),
        inspection_created_at: inspection.map(|i| i.created_at),
        inspection_completed_at: inspection.and_then(|i| i.completed_at),
        building_license_no: inspection.and_then(|i| i.building_license_no.clone()),
        plan_no: inspection.and_then(|i| i.plan_no.clone()),
        land_use: inspection.and_then(|i| i.land_use.clone()),
        onsite_services: inspection.and_then(|i| i.onsite_services.clone()),
        parcel_no: inspection.and_then(|i| i.parcel_no.clone()),
        neighbor_built: inspection.and_then(|i| i.neighbor_built),
        land_nature: inspection.and_then(|i| i.land_nature.clone()),
        is_occupied: inspection.and_then(|i| i.is_occupied),

        appraiser_id: appraisal.appraiser_id,
        market_value: appraisal.market_value.clone(),
        land_value: appraisal.land_value.clone(),
        building_value: appraisal.building_value.clone(),
        valuation_method: appraisal
            .valuation_method
            .map(|m| format!("{:?}", m).to_lowercase()),
        comparable_properties: Some(appraisal.comparable_properties.clone()),
        adjustments: Some(appraisal.adjustments.clone()),
        final_value: appraisal.final_value.clone(),
        confidence_level: appraisal
            .confidence_level
            .map(|c| format!("{:?}", c).to_lowercase()),
        appraisal_notes: appraisal.notes.clone(),
        appraisal_status: appraisal.status.to_str().to_string(),
        appraisal_created_at: appraisal.created_at,
        appraisal_completed_at: appraisal.completed_at,

        purpose: appraisal.purpose.clone(),
        value_basis: appraisal.value_basis.clone(),
        method_used: appraisal.method_used.clone(),
        currency: appraisal.currency.clone(),
        ownership_type: appraisal.ownership_type.clone(),
        assignment_date: appraisal.assignment_date,
        // The appraiser's read-only copy wins; the inspection's own date is
        // the fallback.
        inspection_date_ro: appraisal
            .inspection_date_ro
            .or_else(|| inspection.and_then(|i| i.inspection_date)),
        inspection_time_ro: appraisal.inspection_time_ro,
        assumptions: appraisal.assumptions.clone(),

        deed_number: appraisal.deed_number.clone(),
        deed_date: appraisal.deed_date,
        doc_building_license_no: appraisal
            .doc_building_license_no
            .clone()
            .or_else(|| inspection.and_then(|i| i.building_license_no.clone())),
        doc_building_license_date: appraisal.doc_building_license_date,
        boundary_north: appraisal.boundary_north.clone(),
        boundary_south: appraisal.boundary_south.clone(),
        boundary_east: appraisal.boundary_east.clone(),
        boundary_west: appraisal.boundary_west.clone(),
        public_services: appraisal.public_services.clone(),
        health_services: appraisal.health_services.clone(),
        attachments: appraisal.attachments.clone(),

        review_id: review.map(|r| r.id),
        reviewer_id: review.and_then(|r| r.reviewer_id),
        review_status: review.map(|r| r.review_status.to_str().to_string()),
        comments: review.and_then(|r| r.comments.clone()),
        requested_changes: review.map(|r| r.requested_changes.clone()),
        review_created_at: review.map(|r| r.created_at),
        review_completed_at: review.and_then(|r| r.completed_at),

        delivery_id: delivery.id,
        delivered_by: delivery.delivered_by,
        delivery_method: delivery.delivery_method.to_str().to_string(),
        recipient_email: delivery.recipient_email.clone(),
        report_url: delivery.report_url.clone(),
        delivered_at: delivery.delivered_at,
        delivery_created_at: delivery.created_at,
    }
}

/// Patch keys the view row does not have at all from the appraisal record.
/// A key that is present with a NULL value is left alone: the view knows
/// the column and reported it empty.
pub fn backfill_from_appraisal(
    row: &mut Map<String, JsonValue>,
    appraisal: &Appraisal,
) -> Result<(), serde_json::Error> {
    let appraisal_json = serde_json::to_value(appraisal)?;
    let appraisal_map = match appraisal_json {
        JsonValue::Object(map) => map,
        _ => return Ok(()),
    };

    for key in PATCHABLE_FIELDS {
        if !row.contains_key(*key) {
            let value = appraisal_map.get(*key).cloned().unwrap_or(JsonValue::Null);
            row.insert((*key).to_string(), value);
        }
    }

    Ok(())
}

fn normalize_report_services(report: &mut FullReport) {
    for field in [
        &mut report.onsite_services,
        &mut report.public_services,
        &mut report.health_services,
    ] {
        if let Some(value) = field.as_ref() {
            let items = normalize_services(value);
            *field = Some(JsonValue::Array(
                items.into_iter().map(JsonValue::String).collect(),
            ));
        }
    }
}

/// Service lists reach us in three historical encodings: a real JSON
/// array, a JSON-encoded array in a string, or a plain newline/comma
/// separated string. All collapse to an ordered list of non-empty strings;
/// malformed JSON falls back to delimiter splitting rather than failing.
pub fn normalize_services(value: &JsonValue) -> Vec<String> {
    static SPLIT_RE: OnceLock<Regex> = OnceLock::new();
    let split_re = SPLIT_RE.get_or_init(|| Regex::new(r"\r?\n|,").expect("static pattern"));

    let raw: Vec<String> = match value {
        JsonValue::Array(items) => items.iter().map(item_to_string).collect(),
        JsonValue::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                vec![]
            } else {
                match serde_json::from_str::<JsonValue>(s) {
                    Ok(JsonValue::Array(items)) => items.iter().map(item_to_string).collect(),
                    _ => split_re.split(s).map(str::to_string).collect(),
                }
            }
        }
        JsonValue::Null => vec![],
        other => vec![item_to_string(other)],
    };

    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn item_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appraisalmodel::{ConfidenceLevel, ValuationMethod};
    use crate::models::deliverymodel::DeliveryMethod;
    use crate::models::inspectionmodel::{ConditionRating, InspectionStatus};
    use crate::models::propertymodel::PropertyType;
    use crate::models::reviewmodel::ReviewStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;
    use sqlx::types::BigDecimal;
    use std::str::FromStr;

    fn sample_property() -> Property {
        Property {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            property_address: "King Fahd Road, Riyadh".to_string(),
            property_type: PropertyType::Residential,
            area_sqm: BigDecimal::from_str("420.5").unwrap(),
            bedrooms: Some(4),
            bathrooms: Some(3),
            year_built: Some(2015),
            owner_name: "Sample Owner".to_string(),
            owner_contact: "0500000000".to_string(),
            city: Some("Riyadh".to_string()),
            district: Some("Al Olaya".to_string()),
            location_lat: None,
            location_lng: None,
            location_zoom: None,
            status: "intake".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 12, 8, 0, 0).unwrap(),
        }
    }

    fn sample_inspection(property_id: Uuid) -> Inspection {
        Inspection {
            id: Uuid::new_v4(),
            property_id,
            inspector_id: Some(Uuid::new_v4()),
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            structural_condition: Some(ConditionRating::Good),
            interior_condition: Some(ConditionRating::Excellent),
            exterior_condition: Some(ConditionRating::Fair),
            amenities: json!(["parking", "garden"]),
            defects: json!(["cracked tile"]),
            photos: json!([]),
            notes: Some("minor wear".to_string()),
            status: InspectionStatus::Completed,
            building_license_no: Some("BL-771".to_string()),
            plan_no: Some("P-12".to_string()),
            land_use: Some("residential".to_string()),
            onsite_services: Some(json!(["electricity", "water"])),
            parcel_no: Some("44".to_string()),
            neighbor_built: Some(true),
            land_nature: Some("flat".to_string()),
            is_occupied: Some(false),
            created_at: Utc.with_ymd_and_hms(2024, 1, 14, 9, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap()),
        }
    }

    fn sample_appraisal(property_id: Uuid, inspection_id: Option<Uuid>) -> Appraisal {
        Appraisal {
            id: Uuid::new_v4(),
            property_id,
            inspection_id,
            appraiser_id: Some(Uuid::new_v4()),
            market_value: Some(BigDecimal::from_str("1500000").unwrap()),
            land_value: Some(BigDecimal::from_str("900000").unwrap()),
            building_value: Some(BigDecimal::from_str("600000").unwrap()),
            valuation_method: Some(ValuationMethod::Comparative),
            comparable_properties: json!([]),
            adjustments: json!([]),
            final_value: Some(BigDecimal::from_str("1450000").unwrap()),
            confidence_level: Some(ConfidenceLevel::High),
            notes: Some("stable market".to_string()),
            status: AppraisalStatus::Completed,
            purpose: Some("financing".to_string()),
            value_basis: Some("market value".to_string()),
            method_used: Some("direct comparison".to_string()),
            currency: Some("SAR".to_string()),
            ownership_type: Some("freehold".to_string()),
            assignment_date: NaiveDate::from_ymd_opt(2024, 1, 13),
            inspection_date_ro: None,
            inspection_time_ro: None,
            assumptions: None,
            deed_number: Some("D-9001".to_string()),
            deed_date: NaiveDate::from_ymd_opt(2019, 6, 2),
            doc_building_license_no: None,
            doc_building_license_date: None,
            boundary_north: Some("street 20m".to_string()),
            boundary_south: Some("plot 45".to_string()),
            boundary_east: Some("plot 46".to_string()),
            boundary_west: Some("street 15m".to_string()),
            public_services: Some(json!(["school", "mosque"])),
            health_services: Some(json!("clinic,hospital")),
            attachments: Some(json!([])),
            created_at: Utc.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 1, 18, 10, 0, 0).unwrap()),
        }
    }

    fn sample_review(appraisal_id: Uuid) -> Review {
        Review {
            id: Uuid::new_v4(),
            appraisal_id,
            reviewer_id: Some(Uuid::new_v4()),
            review_status: ReviewStatus::Approved,
            comments: Some("well supported".to_string()),
            requested_changes: json!([]),
            created_at: Utc.with_ymd_and_hms(2024, 1, 19, 10, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 1, 19, 11, 0, 0).unwrap()),
        }
    }

    fn sample_delivery(appraisal_id: Uuid) -> Delivery {
        Delivery {
            id: Uuid::new_v4(),
            appraisal_id,
            delivered_by: Some(Uuid::new_v4()),
            delivery_method: DeliveryMethod::Email,
            recipient_email: Some("owner@example.com".to_string()),
            report_url: Some("https://reports.example.com/r/1".to_string()),
            delivered_at: Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_normalize_services_equivalent_encodings() {
        let expected = vec!["electricity".to_string(), "water".to_string()];

        assert_eq!(normalize_services(&json!(["electricity", "water"])), expected);
        assert_eq!(normalize_services(&json!("electricity,water")), expected);
        assert_eq!(
            normalize_services(&json!("[\"electricity\",\"water\"]")),
            expected
        );
    }

    #[test]
    fn test_normalize_services_newlines_and_empties() {
        assert_eq!(
            normalize_services(&json!("electricity\nwater\r\n\n,")),
            vec!["electricity".to_string(), "water".to_string()]
        );
        assert_eq!(normalize_services(&json!("")), Vec::<String>::new());
        assert_eq!(normalize_services(&JsonValue::Null), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_services_malformed_json_falls_back_to_splitting() {
        assert_eq!(
            normalize_services(&json!("[\"electricity\", water")),
            vec!["[\"electricity\"".to_string(), "water".to_string()]
        );
    }

    #[test]
    fn test_assembled_report_sources_documents_from_appraisal_first() {
        let property = sample_property();
        let inspection = sample_inspection(property.id);
        let mut appraisal = sample_appraisal(property.id, Some(inspection.id));
        let review = sample_review(appraisal.id);
        let delivery = sample_delivery(appraisal.id);

        // No appraisal copy of the license: the inspection's original wins.
        appraisal.doc_building_license_no = None;
        let report = assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            Some(&inspection),
            Some(&review),
        );
        assert_eq!(report.doc_building_license_no.as_deref(), Some("BL-771"));
        assert_eq!(
            report.inspection_date_ro,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );

        // With an appraisal copy present it takes precedence.
        appraisal.doc_building_license_no = Some("BL-NEW".to_string());
        let report = assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            Some(&inspection),
            Some(&review),
        );
        assert_eq!(report.doc_building_license_no.as_deref(), Some("BL-NEW"));
    }

    #[test]
    fn test_assembled_report_tolerates_missing_inspection_and_review() {
        let property = sample_property();
        let appraisal = sample_appraisal(property.id, None);
        let delivery = sample_delivery(appraisal.id);

        let report = assemble_full_report(&appraisal, &delivery, &property, None, None);
        assert!(report.inspection_id.is_none());
        assert!(report.review_status.is_none());
        assert!(report.inspection_date_ro.is_none());
        assert_eq!(report.delivery_method, "email");
        assert_eq!(report.appraisal_status, "completed");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let property = sample_property();
        let inspection = sample_inspection(property.id);
        let appraisal = sample_appraisal(property.id, Some(inspection.id));
        let review = sample_review(appraisal.id);
        let delivery = sample_delivery(appraisal.id);

        let first = assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            Some(&inspection),
            Some(&review),
        );
        let second = assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            Some(&inspection),
            Some(&review),
        );

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_backfill_patches_only_absent_keys() {
        let property = sample_property();
        let appraisal = sample_appraisal(property.id, None);

        let mut row = Map::new();
        // Present-but-null must survive the backfill untouched.
        row.insert("purpose".to_string(), JsonValue::Null);
        // "currency" is entirely absent and should be patched in.

        backfill_from_appraisal(&mut row, &appraisal).unwrap();

        assert_eq!(row.get("purpose"), Some(&JsonValue::Null));
        assert_eq!(row.get("currency"), Some(&json!("SAR")));
        // A field the appraisal itself lacks defaults to null.
        assert_eq!(row.get("assumptions"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let property = sample_property();
        let inspection = sample_inspection(property.id);
        let appraisal = sample_appraisal(property.id, Some(inspection.id));
        let review = sample_review(appraisal.id);
        let delivery = sample_delivery(appraisal.id);

        let report = assemble_full_report(
            &appraisal,
            &delivery,
            &property,
            Some(&inspection),
            Some(&review),
        );

        let value = serde_json::to_value(&report).unwrap();
        let parsed: FullReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.appraisal_id, report.appraisal_id);
        assert_eq!(parsed.owner_id, report.owner_id);
        assert_eq!(parsed.deed_number, report.deed_number);
    }
}
