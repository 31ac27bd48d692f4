use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::deliverymodel::DeliveryMethod;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateDeliveryDto {
    pub delivery_method: DeliveryMethod,

    #[validate(email(message = "Recipient email is invalid"))]
    pub recipient_email: Option<String>,

    #[validate(url(message = "Report URL is invalid"))]
    pub report_url: Option<String>,
}

impl CreateDeliveryDto {
    /// Email and portal deliveries must carry a recipient address; the
    /// `validator` derive cannot express the conditional requirement.
    pub fn validate_recipient(&self) -> Result<(), String> {
        if self.delivery_method.requires_recipient_email()
            && self
                .recipient_email
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err(format!(
                "Recipient email is required for {} delivery",
                self.delivery_method.to_str()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(delivery_method: DeliveryMethod, recipient_email: Option<&str>) -> CreateDeliveryDto {
        CreateDeliveryDto {
            delivery_method,
            recipient_email: recipient_email.map(str::to_string),
            report_url: None,
        }
    }

    #[test]
    fn test_email_and_portal_require_recipient() {
        assert!(dto(DeliveryMethod::Email, None).validate_recipient().is_err());
        assert!(dto(DeliveryMethod::Portal, Some("  "))
            .validate_recipient()
            .is_err());
        assert!(dto(DeliveryMethod::Email, Some("owner@example.com"))
            .validate_recipient()
            .is_ok());
    }

    #[test]
    fn test_physical_and_courier_do_not_require_recipient() {
        assert!(dto(DeliveryMethod::Physical, None)
            .validate_recipient()
            .is_ok());
        assert!(dto(DeliveryMethod::Courier, None)
            .validate_recipient()
            .is_ok());
    }
}
