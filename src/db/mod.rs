pub mod appraisaldb;
pub mod db;
pub mod deliverydb;
pub mod inspectiondb;
pub mod intakedb;
pub mod propertydb;
pub mod reportdb;
pub mod reviewdb;
pub mod userdb;
