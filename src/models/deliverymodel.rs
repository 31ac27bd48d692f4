use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "delivery_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Portal,
    Physical,
    Courier,
}

impl DeliveryMethod {
    pub fn to_str(&self) -> &str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Portal => "portal",
            DeliveryMethod::Physical => "physical",
            DeliveryMethod::Courier => "courier",
        }
    }

    /// Email and portal deliveries need somewhere to send the report.
    pub fn requires_recipient_email(&self) -> bool {
        matches!(self, DeliveryMethod::Email | DeliveryMethod::Portal)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Delivery {
    pub id: Uuid,
    pub appraisal_id: Uuid,
    pub delivered_by: Option<Uuid>,
    pub delivery_method: DeliveryMethod,
    pub recipient_email: Option<String>,
    pub report_url: Option<String>,
    pub delivered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
