pub mod appraisaldtos;
pub mod deliverydtos;
pub mod inspectiondtos;
pub mod intakedtos;
pub mod propertydtos;
pub mod reportdtos;
pub mod reviewdtos;
pub mod userdtos;
