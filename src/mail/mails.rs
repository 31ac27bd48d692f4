use super::sendmail::send_email;
use crate::config::Config;

/// Notify the recipient that their appraisal report has been delivered.
/// Only email/portal deliveries carry a recipient address.
pub async fn send_report_delivered_email(
    config: &Config,
    to_email: &str,
    owner_name: &str,
    report_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Your appraisal report is ready";
    let template_path = "src/mail/templates/Report-delivered.html";
    let report_link = report_url.unwrap_or(&config.app_url).to_string();
    let placeholders = vec![
        ("{{owner_name}}".to_string(), owner_name.to_string()),
        ("{{report_link}}".to_string(), report_link),
    ];

    send_email(config, to_email, subject, template_path, &placeholders).await
}
