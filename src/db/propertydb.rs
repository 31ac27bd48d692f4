use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::{is_schema_missing, DBClient},
    dtos::propertydtos::CreatePropertyDto,
    models::propertymodel::Property,
};

#[async_trait]
pub trait PropertyExt {
    async fn create_property(
        &self,
        user_id: Uuid,
        property_data: CreatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error>;

    async fn get_properties(&self, page: u32, limit: usize) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_properties_by_owner(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn update_property_status(
        &self,
        property_id: Uuid,
        status: &str,
    ) -> Result<Property, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn create_property(
        &self,
        user_id: Uuid,
        property_data: CreatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        let result = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                user_id, property_address, property_type, area_sqm, bedrooms,
                bathrooms, year_built, owner_name, owner_contact, city,
                district, location_lat, location_lng, location_zoom, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'intake')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&property_data.property_address)
        .bind(property_data.property_type)
        .bind(&property_data.area_sqm)
        .bind(property_data.bedrooms)
        .bind(property_data.bathrooms)
        .bind(property_data.year_built)
        .bind(&property_data.owner_name)
        .bind(&property_data.owner_contact)
        .bind(&property_data.city)
        .bind(&property_data.district)
        .bind(&property_data.location_lat)
        .bind(&property_data.location_lng)
        .bind(property_data.location_zoom)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(property) => Ok(property),
            // A deployment whose properties table predates the location
            // columns still accepts intake; retry with the base columns only.
            Err(err) if is_schema_missing(&err) => {
                tracing::warn!(
                    "intake insert hit missing schema ({}), retrying with base columns",
                    err
                );
                sqlx::query_as::<_, Property>(
                    r#"
                    INSERT INTO properties (
                        user_id, property_address, property_type, area_sqm, bedrooms,
                        bathrooms, year_built, owner_name, owner_contact, status
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'intake')
                    RETURNING *
                    "#,
                )
                .bind(user_id)
                .bind(&property_data.property_address)
                .bind(property_data.property_type)
                .bind(&property_data.area_sqm)
                .bind(property_data.bedrooms)
                .bind(property_data.bathrooms)
                .bind(property_data.year_built)
                .bind(&property_data.owner_name)
                .bind(&property_data.owner_contact)
                .fetch_one(&self.pool)
                .await
            }
            Err(err) => Err(err),
        }
    }

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    async fn get_properties(&self, page: u32, limit: usize) -> Result<Vec<Property>, sqlx::Error> {
        let offset = (page.saturating_sub(1)) as i64 * limit as i64;

        let properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn get_properties_by_owner(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let offset = (page.saturating_sub(1)) as i64 * limit as i64;

        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn update_property_status(
        &self,
        property_id: Uuid,
        status: &str,
    ) -> Result<Property, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }
}
