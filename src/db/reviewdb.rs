use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::reviewdtos::SaveReviewDto,
    models::reviewmodel::{Review, ReviewStatus},
};

#[async_trait]
pub trait ReviewExt {
    /// Most recent review for the appraisal (created_at descending).
    async fn get_latest_review_by_appraisal(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    /// Insert the appraisal's review or update the existing one.
    /// `completed_at` is stamped when the status leaves pending.
    async fn save_review(
        &self,
        appraisal_id: Uuid,
        reviewer_id: Uuid,
        data: SaveReviewDto,
    ) -> Result<Review, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn get_latest_review_by_appraisal(
        &self,
        appraisal_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE appraisal_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(appraisal_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn save_review(
        &self,
        appraisal_id: Uuid,
        reviewer_id: Uuid,
        data: SaveReviewDto,
    ) -> Result<Review, sqlx::Error> {
        let decided = data.review_status != ReviewStatus::Pending;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (
                appraisal_id, reviewer_id, review_status, comments,
                requested_changes, completed_at
            ) VALUES ($1, $2, $3, $4, $5, CASE WHEN $6 THEN NOW() ELSE NULL END)
            ON CONFLICT (appraisal_id) DO UPDATE SET
                reviewer_id = EXCLUDED.reviewer_id,
                review_status = EXCLUDED.review_status,
                comments = EXCLUDED.comments,
                requested_changes = EXCLUDED.requested_changes,
                completed_at = CASE WHEN $6 THEN NOW() ELSE NULL END
            RETURNING *
            "#,
        )
        .bind(appraisal_id)
        .bind(reviewer_id)
        .bind(data.review_status)
        .bind(&data.comments)
        .bind(Json(data.requested_changes.unwrap_or_default()))
        .bind(decided)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }
}
