use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::deliverydtos::CreateDeliveryDto,
    models::deliverymodel::Delivery,
};

#[async_trait]
pub trait DeliveryExt {
    async fn get_delivery_by_appraisal(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Delivery>, sqlx::Error>;

    /// Record the delivery of a report. Deliveries are never updated or
    /// deleted; a second insert for the same appraisal is a constraint
    /// violation.
    async fn create_delivery(
        &self,
        appraisal_id: Uuid,
        delivered_by: Uuid,
        data: CreateDeliveryDto,
    ) -> Result<Delivery, sqlx::Error>;
}

#[async_trait]
impl DeliveryExt for DBClient {
    async fn get_delivery_by_appraisal(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Delivery>, sqlx::Error> {
        let delivery =
            sqlx::query_as::<_, Delivery>("SELECT * FROM deliveries WHERE appraisal_id = $1")
                .bind(appraisal_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(delivery)
    }

    async fn create_delivery(
        &self,
        appraisal_id: Uuid,
        delivered_by: Uuid,
        data: CreateDeliveryDto,
    ) -> Result<Delivery, sqlx::Error> {
        let delivery = sqlx::query_as::<_, Delivery>(
            r#"
            INSERT INTO deliveries (
                appraisal_id, delivered_by, delivery_method, recipient_email,
                report_url, delivered_at
            ) VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(appraisal_id)
        .bind(delivered_by)
        .bind(data.delivery_method)
        .bind(&data.recipient_email)
        .bind(&data.report_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(delivery)
    }
}
