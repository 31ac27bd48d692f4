use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::appraisaldtos::SaveAppraisalDto,
    models::appraisalmodel::{Appraisal, AppraisalStatus},
};

#[async_trait]
pub trait AppraisalExt {
    async fn get_appraisal_by_id(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Appraisal>, sqlx::Error>;

    async fn get_appraisal_by_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Appraisal>, sqlx::Error>;

    /// Insert the property's appraisal or update the existing one.
    async fn save_appraisal(
        &self,
        property_id: Uuid,
        appraiser_id: Uuid,
        inspection_id: Option<Uuid>,
        data: SaveAppraisalDto,
    ) -> Result<Appraisal, sqlx::Error>;
}

#[async_trait]
impl AppraisalExt for DBClient {
    async fn get_appraisal_by_id(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Appraisal>, sqlx::Error> {
        let appraisal = sqlx::query_as::<_, Appraisal>("SELECT * FROM appraisals WHERE id = $1")
            .bind(appraisal_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appraisal)
    }

    async fn get_appraisal_by_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Appraisal>, sqlx::Error> {
        let appraisal =
            sqlx::query_as::<_, Appraisal>("SELECT * FROM appraisals WHERE property_id = $1")
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(appraisal)
    }

    async fn save_appraisal(
        &self,
        property_id: Uuid,
        appraiser_id: Uuid,
        inspection_id: Option<Uuid>,
        data: SaveAppraisalDto,
    ) -> Result<Appraisal, sqlx::Error> {
        let completed = data.status == AppraisalStatus::Completed;

        let appraisal = sqlx::query_as::<_, Appraisal>(
            r#"
            INSERT INTO appraisals (
                property_id, inspection_id, appraiser_id, market_value, land_value,
                building_value, valuation_method, comparable_properties, adjustments,
                final_value, confidence_level, notes, status,
                purpose, value_basis, method_used, currency, ownership_type,
                assignment_date, inspection_date_ro, inspection_time_ro, assumptions,
                deed_number, deed_date, doc_building_license_no, doc_building_license_date,
                boundary_north, boundary_south, boundary_east, boundary_west,
                public_services, health_services, attachments, completed_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22,
                $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33,
                CASE WHEN $34 THEN NOW() ELSE NULL END
            )
            ON CONFLICT (property_id) DO UPDATE SET
                inspection_id = EXCLUDED.inspection_id,
                appraiser_id = EXCLUDED.appraiser_id,
                market_value = EXCLUDED.market_value,
                land_value = EXCLUDED.land_value,
                building_value = EXCLUDED.building_value,
                valuation_method = EXCLUDED.valuation_method,
                comparable_properties = EXCLUDED.comparable_properties,
                adjustments = EXCLUDED.adjustments,
                final_value = EXCLUDED.final_value,
                confidence_level = EXCLUDED.confidence_level,
                notes = EXCLUDED.notes,
                status = EXCLUDED.status,
                purpose = EXCLUDED.purpose,
                value_basis = EXCLUDED.value_basis,
                method_used = EXCLUDED.method_used,
                currency = EXCLUDED.currency,
                ownership_type = EXCLUDED.ownership_type,
                assignment_date = EXCLUDED.assignment_date,
                inspection_date_ro = EXCLUDED.inspection_date_ro,
                inspection_time_ro = EXCLUDED.inspection_time_ro,
                assumptions = EXCLUDED.assumptions,
                deed_number = EXCLUDED.deed_number,
                deed_date = EXCLUDED.deed_date,
                doc_building_license_no = EXCLUDED.doc_building_license_no,
                doc_building_license_date = EXCLUDED.doc_building_license_date,
                boundary_north = EXCLUDED.boundary_north,
                boundary_south = EXCLUDED.boundary_south,
                boundary_east = EXCLUDED.boundary_east,
                boundary_west = EXCLUDED.boundary_west,
                public_services = EXCLUDED.public_services,
                health_services = EXCLUDED.health_services,
                attachments = EXCLUDED.attachments,
                completed_at = CASE
                    WHEN $34 AND appraisals.completed_at IS NULL THEN NOW()
                    WHEN $34 THEN appraisals.completed_at
                    ELSE NULL
                END
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(inspection_id)
        .bind(appraiser_id)
        .bind(&data.market_value)
        .bind(&data.land_value)
        .bind(&data.building_value)
        .bind(data.valuation_method)
        .bind(Json(data.comparable_properties.unwrap_or_default()))
        .bind(Json(data.adjustments.unwrap_or_default()))
        .bind(&data.final_value)
        .bind(data.confidence_level)
        .bind(&data.notes)
        .bind(data.status)
        .bind(&data.purpose)
        .bind(&data.value_basis)
        .bind(&data.method_used)
        .bind(&data.currency)
        .bind(&data.ownership_type)
        .bind(data.assignment_date)
        .bind(data.inspection_date_ro)
        .bind(data.inspection_time_ro)
        .bind(&data.assumptions)
        .bind(&data.deed_number)
        .bind(data.deed_date)
        .bind(&data.doc_building_license_no)
        .bind(data.doc_building_license_date)
        .bind(&data.boundary_north)
        .bind(&data.boundary_south)
        .bind(&data.boundary_east)
        .bind(&data.boundary_west)
        .bind(Json(data.public_services.unwrap_or_default()))
        .bind(Json(data.health_services.unwrap_or_default()))
        .bind(Json(data.attachments.unwrap_or_default()))
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(appraisal)
    }
}
