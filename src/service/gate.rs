use serde::{Deserialize, Serialize};

use crate::models::{reviewmodel::ReviewStatus, usermodel::UserRole};
use crate::service::workflow::WorkflowSnapshot;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    Details,
    Inspection,
    Appraisal,
    Review,
    Delivery,
}

/// Visibility and editability are computed separately: a record's
/// existence opens the tab for viewing by everyone involved, but only the
/// responsible role (or an admin) ever gets editable controls.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TabAccess {
    pub tab: TabId,
    pub visible: bool,
    pub editable: bool,
}

pub fn can_edit_inspection(role: UserRole) -> bool {
    matches!(role, UserRole::Inspector | UserRole::Admin)
}

pub fn can_edit_appraisal(role: UserRole) -> bool {
    matches!(role, UserRole::Appraiser | UserRole::Admin)
}

pub fn can_edit_review(role: UserRole) -> bool {
    matches!(role, UserRole::Reviewer | UserRole::Admin)
}

/// Compute the caller's tab set for a property. The details tab is always
/// present and read-only; the delivery tab only opens once the latest
/// review is approved.
pub fn workflow_tabs(role: UserRole, snapshot: &WorkflowSnapshot) -> Vec<TabAccess> {
    let review_approved = snapshot.latest_review_status() == Some(ReviewStatus::Approved);

    vec![
        TabAccess {
            tab: TabId::Details,
            visible: true,
            editable: false,
        },
        TabAccess {
            tab: TabId::Inspection,
            visible: can_edit_inspection(role) || snapshot.has_inspection(),
            editable: can_edit_inspection(role),
        },
        TabAccess {
            tab: TabId::Appraisal,
            visible: can_edit_appraisal(role) || snapshot.has_appraisal(),
            editable: can_edit_appraisal(role),
        },
        TabAccess {
            tab: TabId::Review,
            visible: (can_edit_review(role) || snapshot.has_review()) && snapshot.has_appraisal(),
            editable: can_edit_review(role),
        },
        TabAccess {
            tab: TabId::Delivery,
            visible: (can_edit_review(role) || snapshot.has_delivery()) && review_approved,
            editable: can_edit_review(role),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appraisalmodel::AppraisalStatus;
    use crate::models::inspectionmodel::InspectionStatus;
    use crate::service::workflow::AppraisalSnapshot;

    fn tab(tabs: &[TabAccess], id: TabId) -> TabAccess {
        *tabs.iter().find(|t| t.tab == id).unwrap()
    }

    fn snapshot_with_review(status: ReviewStatus) -> WorkflowSnapshot {
        WorkflowSnapshot {
            inspections: vec![InspectionStatus::Completed],
            appraisals: vec![AppraisalSnapshot {
                status: AppraisalStatus::Completed,
                reviews: vec![status],
                delivery_count: 0,
            }],
        }
    }

    #[test]
    fn test_details_always_visible_never_editable() {
        for role in [
            UserRole::Admin,
            UserRole::Appraiser,
            UserRole::Inspector,
            UserRole::Reviewer,
            UserRole::Client,
        ] {
            let tabs = workflow_tabs(role, &WorkflowSnapshot::default());
            let details = tab(&tabs, TabId::Details);
            assert!(details.visible);
            assert!(!details.editable);
        }
    }

    #[test]
    fn test_client_cannot_see_inspection_tab_before_record_exists() {
        let tabs = workflow_tabs(UserRole::Client, &WorkflowSnapshot::default());
        assert!(!tab(&tabs, TabId::Inspection).visible);
    }

    #[test]
    fn test_existing_inspection_is_visible_but_not_editable_for_client() {
        let snapshot = WorkflowSnapshot {
            inspections: vec![InspectionStatus::Pending],
            appraisals: vec![],
        };
        let tabs = workflow_tabs(UserRole::Client, &snapshot);
        let inspection = tab(&tabs, TabId::Inspection);
        assert!(inspection.visible);
        assert!(!inspection.editable);
    }

    #[test]
    fn test_inspector_sees_and_edits_inspection_before_record_exists() {
        let tabs = workflow_tabs(UserRole::Inspector, &WorkflowSnapshot::default());
        let inspection = tab(&tabs, TabId::Inspection);
        assert!(inspection.visible);
        assert!(inspection.editable);
        // but nothing else opens up for the inspector
        assert!(!tab(&tabs, TabId::Review).visible);
        assert!(!tab(&tabs, TabId::Delivery).visible);
    }

    #[test]
    fn test_review_tab_requires_an_appraisal() {
        let tabs = workflow_tabs(UserRole::Reviewer, &WorkflowSnapshot::default());
        assert!(!tab(&tabs, TabId::Review).visible);

        let snapshot = WorkflowSnapshot {
            inspections: vec![],
            appraisals: vec![AppraisalSnapshot {
                status: AppraisalStatus::Pending,
                reviews: vec![],
                delivery_count: 0,
            }],
        };
        let tabs = workflow_tabs(UserRole::Reviewer, &snapshot);
        assert!(tab(&tabs, TabId::Review).visible);
    }

    #[test]
    fn test_delivery_tab_requires_approved_review() {
        let tabs = workflow_tabs(UserRole::Reviewer, &snapshot_with_review(ReviewStatus::Pending));
        assert!(!tab(&tabs, TabId::Delivery).visible);

        let tabs = workflow_tabs(
            UserRole::Reviewer,
            &snapshot_with_review(ReviewStatus::NeedsRevision),
        );
        assert!(!tab(&tabs, TabId::Delivery).visible);

        let tabs = workflow_tabs(UserRole::Reviewer, &snapshot_with_review(ReviewStatus::Approved));
        assert!(tab(&tabs, TabId::Delivery).visible);
    }

    #[test]
    fn test_client_sees_delivery_tab_only_after_record_exists() {
        // Approved review, no delivery yet: nothing for the client.
        let tabs = workflow_tabs(UserRole::Client, &snapshot_with_review(ReviewStatus::Approved));
        assert!(!tab(&tabs, TabId::Delivery).visible);

        let mut snapshot = snapshot_with_review(ReviewStatus::Approved);
        snapshot.appraisals[0].delivery_count = 1;
        let tabs = workflow_tabs(UserRole::Client, &snapshot);
        let delivery = tab(&tabs, TabId::Delivery);
        assert!(delivery.visible);
        assert!(!delivery.editable);
    }

    #[test]
    fn test_visibility_and_editability_are_independent() {
        // An appraiser can always see an editable appraisal tab, yet an
        // existing review opens the review tab for them read-only.
        let tabs = workflow_tabs(
            UserRole::Appraiser,
            &snapshot_with_review(ReviewStatus::Pending),
        );
        assert!(tab(&tabs, TabId::Appraisal).editable);
        let review = tab(&tabs, TabId::Review);
        assert!(review.visible);
        assert!(!review.editable);
    }

    #[test]
    fn test_admin_edits_everything_visible() {
        let mut snapshot = snapshot_with_review(ReviewStatus::Approved);
        snapshot.appraisals[0].delivery_count = 1;
        let tabs = workflow_tabs(UserRole::Admin, &snapshot);
        for t in tabs {
            if t.tab == TabId::Details {
                assert!(!t.editable);
            } else {
                assert!(t.visible, "{:?} should be visible for admin", t.tab);
                assert!(t.editable, "{:?} should be editable for admin", t.tab);
            }
        }
    }
}
