use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::{db::db::DBClient, models::reportmodel::ReportSummary};

/// Filters for the admin report register. `q` is a case-insensitive
/// substring match on address and owner name; the dates bound
/// `delivered_at` from both sides.
#[derive(Debug, Default)]
pub struct ReportSearchFilters {
    pub q: Option<String>,
    pub property_type: Option<String>,
    pub review_status: Option<String>,
    pub delivered_from: Option<DateTime<Utc>>,
    pub delivered_to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ReportExt {
    /// Fetch one row of the precomputed view as raw JSON. JSON keeps the
    /// distinction between a column the view does not have (key absent)
    /// and a column that is NULL, which drives the backfill step.
    async fn get_full_report_json(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<JsonValue>, sqlx::Error>;

    /// Appraisal id of the most recently delivered report for a property,
    /// according to the view.
    async fn get_latest_delivered_appraisal_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error>;

    async fn list_report_summaries(
        &self,
        filters: ReportSearchFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ReportSummary>, sqlx::Error>;
}

#[async_trait]
impl ReportExt for DBClient {
    async fn get_full_report_json(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<JsonValue>, sqlx::Error> {
        let row: Option<JsonValue> =
            sqlx::query_scalar("SELECT to_jsonb(fr) FROM full_reports fr WHERE appraisal_id = $1")
                .bind(appraisal_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    async fn get_latest_delivered_appraisal_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT appraisal_id FROM full_reports
            WHERE property_id = $1
            ORDER BY delivered_at DESC
            LIMIT 1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_report_summaries(
        &self,
        filters: ReportSearchFilters,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ReportSummary>, sqlx::Error> {
        let offset = (page.saturating_sub(1)) as i64 * limit as i64;

        let reports = sqlx::query_as::<_, ReportSummary>(
            r#"
            SELECT appraisal_id, property_id, owner_id, property_address,
                   property_type, area_sqm, owner_name, final_value,
                   review_status, delivered_at
            FROM full_reports
            WHERE ($1::text IS NULL OR property_address ILIKE $1 OR owner_name ILIKE $1)
            AND ($2::text IS NULL OR property_type = $2)
            AND ($3::text IS NULL OR review_status = $3)
            AND ($4::timestamptz IS NULL OR delivered_at >= $4)
            AND ($5::timestamptz IS NULL OR delivered_at <= $5)
            ORDER BY delivered_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filters.q.as_ref().map(|q| format!("%{}%", q)))
        .bind(&filters.property_type)
        .bind(&filters.review_status)
        .bind(filters.delivered_from)
        .bind(filters.delivered_to)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }
}
