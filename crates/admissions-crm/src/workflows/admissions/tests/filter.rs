use super::common::*;

use crate::workflows::admissions::domain::AdmissionId;
use crate::workflows::admissions::filter::{filter_admissions, AdmissionFilter};
use crate::workflows::admissions::fixtures::seeded_admissions;

fn ids(records: &[crate::workflows::admissions::AdmissionRecord]) -> Vec<u64> {
    records.iter().map(|record| record.id.0).collect()
}

#[test]
fn empty_tuple_is_identity() {
    let records = seeded_admissions();
    let visible = filter_admissions(&records, &AdmissionFilter::new("", "all", "all"));
    assert_eq!(visible, records);
}

#[test]
fn text_matches_names_case_insensitively() {
    let records = seeded_admissions();
    let lower = filter_admissions(&records, &AdmissionFilter::text("sarah"));
    let upper = filter_admissions(&records, &AdmissionFilter::text("SARAH"));
    assert_eq!(ids(&lower), vec![1]);
    assert_eq!(lower, upper);
}

#[test]
fn text_matches_course_substring() {
    let records = seeded_admissions();
    let visible = filter_admissions(&records, &AdmissionFilter::new("engineering", "all", "all"));
    assert_eq!(ids(&visible), vec![3]);
    assert_eq!(visible[0].course, "Engineering");
}

#[test]
fn text_matches_email_fragment() {
    let records = seeded_admissions();
    let visible = filter_admissions(&records, &AdmissionFilter::text("@example.com"));
    assert_eq!(ids(&visible), vec![1, 2, 3, 4]);
    let visible = filter_admissions(&records, &AdmissionFilter::text("mike@"));
    assert_eq!(ids(&visible), vec![2]);
}

#[test]
fn stage_and_course_selectors_are_exact_and_anded() {
    let records = seeded_admissions();

    let by_stage = filter_admissions(&records, &AdmissionFilter::new("", "admitted", "all"));
    assert_eq!(ids(&by_stage), vec![4]);

    let by_course = filter_admissions(&records, &AdmissionFilter::new("", "all", "Medicine"));
    assert_eq!(ids(&by_course), vec![4]);

    let contradictory =
        filter_admissions(&records, &AdmissionFilter::new("", "admitted", "Engineering"));
    assert!(contradictory.is_empty());

    let lowercase_course =
        filter_admissions(&records, &AdmissionFilter::new("", "all", "medicine"));
    assert!(lowercase_course.is_empty());
}

#[test]
fn filter_is_stable_and_pure() {
    let records = seeded_admissions();
    let criteria = AdmissionFilter::text("a");
    let first = filter_admissions(&records, &criteria);
    let second = filter_admissions(&records, &criteria);
    assert_eq!(first, second);
    let positions: Vec<usize> = first
        .iter()
        .map(|record| {
            records
                .iter()
                .position(|candidate| candidate.id == record.id)
                .expect("record comes from input")
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn service_filter_sees_stage_updates() {
    let (service, _, _) = build_service();
    let criteria = AdmissionFilter::new("", "admitted", "all");
    assert_eq!(ids(&service.filter(&criteria).expect("filter")), vec![4]);

    service
        .update_stage(AdmissionId(3), "admitted")
        .expect("update succeeds");
    assert_eq!(ids(&service.filter(&criteria).expect("filter")), vec![3, 4]);
}
