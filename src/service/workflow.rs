use crate::models::{
    appraisalmodel::{Appraisal, AppraisalStatus},
    deliverymodel::Delivery,
    inspectionmodel::{Inspection, InspectionStatus},
    propertymodel::WorkflowStage,
    reviewmodel::{Review, ReviewStatus},
};

/// Presence and status of a property's child records, reduced to what the
/// stage derivation and tab gating need. Built from the usual
/// one-record-per-step lookups, but tolerant of duplicates: the store
/// enforces uniqueness, the logic here does not rely on it.
#[derive(Debug, Default, Clone)]
pub struct WorkflowSnapshot {
    pub inspections: Vec<InspectionStatus>,
    pub appraisals: Vec<AppraisalSnapshot>,
}

#[derive(Debug, Clone)]
pub struct AppraisalSnapshot {
    pub status: AppraisalStatus,
    /// Review statuses, newest first.
    pub reviews: Vec<ReviewStatus>,
    pub delivery_count: usize,
}

impl WorkflowSnapshot {
    pub fn from_records(
        inspection: Option<&Inspection>,
        appraisal: Option<&Appraisal>,
        review: Option<&Review>,
        delivery: Option<&Delivery>,
    ) -> Self {
        let inspections = inspection.map(|i| vec![i.status]).unwrap_or_default();

        let appraisals = appraisal
            .map(|a| {
                vec![AppraisalSnapshot {
                    status: a.status,
                    reviews: review.map(|r| vec![r.review_status]).unwrap_or_default(),
                    delivery_count: usize::from(delivery.is_some()),
                }]
            })
            .unwrap_or_default();

        WorkflowSnapshot {
            inspections,
            appraisals,
        }
    }

    pub fn has_inspection(&self) -> bool {
        !self.inspections.is_empty()
    }

    pub fn has_appraisal(&self) -> bool {
        !self.appraisals.is_empty()
    }

    pub fn has_review(&self) -> bool {
        self.appraisals.iter().any(|a| !a.reviews.is_empty())
    }

    pub fn has_delivery(&self) -> bool {
        self.appraisals.iter().any(|a| a.delivery_count > 0)
    }

    /// Status of the most recent review across appraisals, if any.
    pub fn latest_review_status(&self) -> Option<ReviewStatus> {
        self.appraisals
            .iter()
            .find_map(|a| a.reviews.first().copied())
    }
}

/// Derive the workflow stage from child records alone. The stored status
/// column on the property plays no part; first matching rule wins.
pub fn derive_stage(snapshot: &WorkflowSnapshot) -> WorkflowStage {
    if snapshot.has_delivery() {
        return WorkflowStage::Completed;
    }

    if snapshot.has_appraisal() {
        let any_completed = snapshot
            .appraisals
            .iter()
            .any(|a| a.status == AppraisalStatus::Completed);
        return if any_completed {
            WorkflowStage::Review
        } else {
            WorkflowStage::Appraisal
        };
    }

    if snapshot.has_inspection() {
        let any_completed = snapshot
            .inspections
            .iter()
            .any(|s| *s == InspectionStatus::Completed);
        return if any_completed {
            WorkflowStage::Appraisal
        } else {
            WorkflowStage::Inspection
        };
    }

    WorkflowStage::Intake
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appraisal(status: AppraisalStatus) -> AppraisalSnapshot {
        AppraisalSnapshot {
            status,
            reviews: vec![],
            delivery_count: 0,
        }
    }

    #[test]
    fn test_no_children_is_intake() {
        let snapshot = WorkflowSnapshot::default();
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Intake);
    }

    #[test]
    fn test_pending_inspection_is_inspection() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Pending],
            appraisals: vec![],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Inspection);

        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::InProgress],
            appraisals: vec![],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Inspection);
    }

    #[test]
    fn test_completed_inspection_without_appraisal_is_appraisal() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Appraisal);
    }

    #[test]
    fn test_pending_appraisal_is_appraisal() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![appraisal(AppraisalStatus::Pending)],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Appraisal);
    }

    #[test]
    fn test_completed_appraisal_is_review() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![appraisal(AppraisalStatus::Completed)],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Review);
    }

    #[test]
    fn test_approved_review_without_delivery_stays_review() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![AppraisalSnapshot {
                status: AppraisalStatus::Completed,
                reviews: vec![ReviewStatus::Approved],
                delivery_count: 0,
            }],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Review);
    }

    #[test]
    fn test_delivery_wins_over_everything() {
        // Even a pending appraisal with a delivery attached counts as
        // completed; the delivery rule has the highest priority.
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Pending],
            appraisals: vec![AppraisalSnapshot {
                status: AppraisalStatus::Pending,
                reviews: vec![],
                delivery_count: 1,
            }],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Completed);
    }

    #[test]
    fn test_duplicate_children_use_any_semantics() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Pending, InspectionStatus::Completed],
            appraisals: vec![],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Appraisal);

        let snapshot = WorkflowSnapshot {
            inspections: vec![],
            appraisals: vec![
                appraisal(AppraisalStatus::Pending),
                appraisal(AppraisalStatus::Completed),
            ],
        };
        assert_eq!(derive_stage(&snapshot), WorkflowStage::Review);
    }

    #[test]
    fn test_derivation_is_pure() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![appraisal(AppraisalStatus::Completed)],
        };
        assert_eq!(derive_stage(&snapshot), derive_stage(&snapshot));
    }
}
