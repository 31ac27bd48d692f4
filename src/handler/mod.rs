pub mod appraisals;
pub mod auth;
pub mod deliveries;
pub mod inspections;
pub mod properties;
pub mod reports;
pub mod reviews;
pub mod users;
