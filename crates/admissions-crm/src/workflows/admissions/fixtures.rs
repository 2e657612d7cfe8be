use chrono::NaiveDate;

use super::domain::{AdmissionId, AdmissionRecord};
use super::stages::AdmissionStage;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// The four applications every session starts from.
pub fn seeded_admissions() -> Vec<AdmissionRecord> {
    vec![
        AdmissionRecord {
            id: AdmissionId(1),
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            course: "Computer Science".to_string(),
            stage: AdmissionStage::ApplicationSubmitted,
            documents: names(&["Transcript", "ID Copy"]),
            pending_documents: names(&["Recommendation Letter"]),
            application_date: date(2024, 1, 10),
            last_update: date(2024, 1, 15),
        },
        AdmissionRecord {
            id: AdmissionId(2),
            name: "Mike Chen".to_string(),
            email: "mike@example.com".to_string(),
            course: "Business Administration".to_string(),
            stage: AdmissionStage::DocumentVerification,
            documents: names(&["Transcript", "ID Copy", "Recommendation Letter"]),
            pending_documents: names(&["Medical Certificate"]),
            application_date: date(2024, 1, 8),
            last_update: date(2024, 1, 14),
        },
        AdmissionRecord {
            id: AdmissionId(3),
            name: "Emma Davis".to_string(),
            email: "emma@example.com".to_string(),
            course: "Engineering".to_string(),
            stage: AdmissionStage::InterviewScheduled,
            documents: names(&[
                "Transcript",
                "ID Copy",
                "Recommendation Letter",
                "Medical Certificate",
            ]),
            pending_documents: Vec::new(),
            application_date: date(2024, 1, 5),
            last_update: date(2024, 1, 13),
        },
        AdmissionRecord {
            id: AdmissionId(4),
            name: "Alex Kumar".to_string(),
            email: "alex@example.com".to_string(),
            course: "Medicine".to_string(),
            stage: AdmissionStage::Admitted,
            documents: names(&[
                "Transcript",
                "ID Copy",
                "Recommendation Letter",
                "Medical Certificate",
            ]),
            pending_documents: Vec::new(),
            application_date: date(2024, 1, 1),
            last_update: date(2024, 1, 12),
        },
    ]
}
