use super::common::*;
use std::sync::Arc;

use crate::workflows::admissions::domain::AdmissionId;
use crate::workflows::admissions::repository::AdmissionRepository;
use crate::workflows::admissions::stages::AdmissionStage;
use crate::workflows::admissions::{AdjacencyTransition, AdmissionDetail, AdmissionServiceError};
use crate::workflows::notifications::NotificationKind;

#[test]
fn opening_selects_the_current_stage() {
    let (service, _, _) = build_service();
    let detail = AdmissionDetail::open(&service, AdmissionId(3)).expect("detail opens");

    assert_eq!(detail.selected(), "interview-scheduled");
    assert!(!detail.can_confirm());
    assert_eq!(detail.current_stage().label, "Interview Scheduled");
    assert_eq!(detail.stage_options().len(), 5);
}

#[test]
fn confirm_applies_selection_and_closes() {
    let (service, repository, notifier) = build_service();
    let mut detail = AdmissionDetail::open(&service, AdmissionId(3)).expect("detail opens");

    detail.select("admitted");
    assert!(detail.can_confirm());
    let updated = detail.confirm().expect("confirm succeeds");

    assert_eq!(updated.stage, AdmissionStage::Admitted);
    assert_eq!(updated.progress(), 100);
    assert!(!detail.is_open());
    assert!(!detail.can_confirm());

    let stored = repository
        .fetch(AdmissionId(3))
        .expect("fetch")
        .expect("present");
    assert_eq!(stored.stage, AdmissionStage::Admitted);
    assert_eq!(
        notifier.last().map(|notice| notice.kind),
        Some(NotificationKind::Success)
    );
}

#[test]
fn confirming_the_current_stage_reports_no_change_and_stays_open() {
    let (service, _, notifier) = build_service();
    let mut detail = AdmissionDetail::open(&service, AdmissionId(3)).expect("detail opens");

    match detail.confirm() {
        Err(AdmissionServiceError::NoChange { .. }) => {}
        other => panic!("expected no change, got {other:?}"),
    }
    assert!(detail.is_open());
    assert_eq!(
        notifier.last().map(|notice| notice.title),
        Some("No Changes".to_string())
    );
}

#[test]
fn closing_discards_pending_selection() {
    let (service, repository, notifier) = build_service();
    let mut detail = AdmissionDetail::open(&service, AdmissionId(1)).expect("detail opens");
    detail.select("rejected");
    let record = detail.close();

    assert_eq!(record.stage, AdmissionStage::ApplicationSubmitted);
    let stored = repository
        .fetch(AdmissionId(1))
        .expect("fetch")
        .expect("present");
    assert_eq!(stored, seeded(1));
    assert!(notifier.events().is_empty());
}

#[test]
fn stage_options_follow_the_transition_policy() {
    let (service, _, _) = build_service_with_policy(Arc::new(AdjacencyTransition::forward()));
    let detail = AdmissionDetail::open(&service, AdmissionId(2)).expect("detail opens");
    let keys: Vec<&str> = detail
        .stage_options()
        .into_iter()
        .map(|definition| definition.key)
        .collect();
    assert_eq!(
        keys,
        vec!["document-verification", "interview-scheduled", "rejected"]
    );
}

#[test]
fn schedule_interview_sends_success_notice() {
    let (service, _, notifier) = build_service();
    let detail = AdmissionDetail::open(&service, AdmissionId(2)).expect("detail opens");
    detail.schedule_interview().expect("notice sent");

    let notice = notifier.last().expect("notice");
    assert_eq!(notice.title, "Interview Scheduled");
    assert_eq!(notice.message, "Interview scheduled for Mike Chen");
}

#[test]
fn opening_a_missing_record_fails() {
    let (service, _, _) = build_service();
    assert!(matches!(
        AdmissionDetail::open(&service, AdmissionId(42)),
        Err(AdmissionServiceError::NotFound { .. })
    ));
}
