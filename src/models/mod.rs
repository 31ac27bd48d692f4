pub mod appraisalmodel;
pub mod deliverymodel;
pub mod inspectionmodel;
pub mod intakemodel;
pub mod propertymodel;
pub mod reportmodel;
pub mod reviewmodel;
pub mod usermodel;
