use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::inspectiondtos::SaveInspectionDto,
    models::inspectionmodel::{Inspection, InspectionStatus},
};

#[async_trait]
pub trait InspectionExt {
    async fn get_inspection_by_id(
        &self,
        inspection_id: Uuid,
    ) -> Result<Option<Inspection>, sqlx::Error>;

    async fn get_inspection_by_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Inspection>, sqlx::Error>;

    /// Insert the property's inspection or update the existing one.
    /// `completed_at` is stamped exactly when the status becomes completed.
    async fn save_inspection(
        &self,
        property_id: Uuid,
        inspector_id: Uuid,
        data: SaveInspectionDto,
    ) -> Result<Inspection, sqlx::Error>;
}

#[async_trait]
impl InspectionExt for DBClient {
    async fn get_inspection_by_id(
        &self,
        inspection_id: Uuid,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let inspection =
            sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1")
                .bind(inspection_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(inspection)
    }

    async fn get_inspection_by_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let inspection =
            sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE property_id = $1")
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(inspection)
    }

    async fn save_inspection(
        &self,
        property_id: Uuid,
        inspector_id: Uuid,
        data: SaveInspectionDto,
    ) -> Result<Inspection, sqlx::Error> {
        let completed = data.status == InspectionStatus::Completed;

        let inspection = sqlx::query_as::<_, Inspection>(
            r#"
            INSERT INTO inspections (
                property_id, inspector_id, inspection_date, structural_condition,
                interior_condition, exterior_condition, amenities, defects, photos,
                notes, status, building_license_no, plan_no, land_use,
                onsite_services, parcel_no, neighbor_built, land_nature,
                is_occupied, completed_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19,
                CASE WHEN $20 THEN NOW() ELSE NULL END
            )
            ON CONFLICT (property_id) DO UPDATE SET
                inspector_id = EXCLUDED.inspector_id,
                inspection_date = EXCLUDED.inspection_date,
                structural_condition = EXCLUDED.structural_condition,
                interior_condition = EXCLUDED.interior_condition,
                exterior_condition = EXCLUDED.exterior_condition,
                amenities = EXCLUDED.amenities,
                defects = EXCLUDED.defects,
                photos = EXCLUDED.photos,
                notes = EXCLUDED.notes,
                status = EXCLUDED.status,
                building_license_no = EXCLUDED.building_license_no,
                plan_no = EXCLUDED.plan_no,
                land_use = EXCLUDED.land_use,
                onsite_services = EXCLUDED.onsite_services,
                parcel_no = EXCLUDED.parcel_no,
                neighbor_built = EXCLUDED.neighbor_built,
                land_nature = EXCLUDED.land_nature,
                is_occupied = EXCLUDED.is_occupied,
                completed_at = CASE
                    WHEN $20 AND inspections.completed_at IS NULL THEN NOW()
                    WHEN $20 THEN inspections.completed_at
                    ELSE NULL
                END
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(inspector_id)
        .bind(data.inspection_date)
        .bind(data.structural_condition)
        .bind(data.interior_condition)
        .bind(data.exterior_condition)
        .bind(Json(data.amenities.unwrap_or_default()))
        .bind(Json(data.defects.unwrap_or_default()))
        .bind(Json(data.photos.unwrap_or_default()))
        .bind(&data.notes)
        .bind(data.status)
        .bind(&data.building_license_no)
        .bind(&data.plan_no)
        .bind(&data.land_use)
        .bind(Json(data.onsite_services.unwrap_or_default()))
        .bind(&data.parcel_no)
        .bind(data.neighbor_built)
        .bind(&data.land_nature)
        .bind(data.is_occupied)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(inspection)
    }
}
