use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::intakedtos::SaveIntakeRecordDto,
    models::intakemodel::IntakeRecord,
};

#[async_trait]
pub trait IntakeExt {
    async fn get_intake_record(
        &self,
        property_id: Uuid,
    ) -> Result<Option<IntakeRecord>, sqlx::Error>;

    /// Reception data is written with upsert semantics keyed on the
    /// property: the desk saves repeatedly while the client is present.
    async fn upsert_intake_record(
        &self,
        property_id: Uuid,
        received_by: Uuid,
        reference_no: String,
        data: SaveIntakeRecordDto,
    ) -> Result<IntakeRecord, sqlx::Error>;
}

#[async_trait]
impl IntakeExt for DBClient {
    async fn get_intake_record(
        &self,
        property_id: Uuid,
    ) -> Result<Option<IntakeRecord>, sqlx::Error> {
        let record =
            sqlx::query_as::<_, IntakeRecord>("SELECT * FROM intake_records WHERE property_id = $1")
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    async fn upsert_intake_record(
        &self,
        property_id: Uuid,
        received_by: Uuid,
        reference_no: String,
        data: SaveIntakeRecordDto,
    ) -> Result<IntakeRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, IntakeRecord>(
            r#"
            INSERT INTO intake_records (
                property_id, reference_no, received_by, received_at,
                contact_verified, building_license_no, plan_no, land_use,
                onsite_services, parcel_no, neighbor_built, land_nature,
                is_occupied, documents, notes
            ) VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (property_id) DO UPDATE SET
                reference_no = EXCLUDED.reference_no,
                received_by = EXCLUDED.received_by,
                received_at = EXCLUDED.received_at,
                contact_verified = EXCLUDED.contact_verified,
                building_license_no = EXCLUDED.building_license_no,
                plan_no = EXCLUDED.plan_no,
                land_use = EXCLUDED.land_use,
                onsite_services = EXCLUDED.onsite_services,
                parcel_no = EXCLUDED.parcel_no,
                neighbor_built = EXCLUDED.neighbor_built,
                land_nature = EXCLUDED.land_nature,
                is_occupied = EXCLUDED.is_occupied,
                documents = EXCLUDED.documents,
                notes = EXCLUDED.notes,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(reference_no)
        .bind(received_by)
        .bind(data.received_at)
        .bind(data.contact_verified.unwrap_or(false))
        .bind(&data.building_license_no)
        .bind(&data.plan_no)
        .bind(&data.land_use)
        .bind(Json(data.onsite_services.unwrap_or_default()))
        .bind(&data.parcel_no)
        .bind(data.neighbor_built)
        .bind(&data.land_nature)
        .bind(data.is_occupied)
        .bind(Json(data.documents.unwrap_or_default()))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
