use serde::{Deserialize, Serialize};

use super::domain::AdmissionRecord;
use crate::workflows::filtering::{matches_text, Selection};

/// Filter tuple from the admissions list surface. All three predicates are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionFilter {
    /// Case-insensitive substring over name, email, and course.
    pub text: String,
    /// Stage key or `all`.
    pub stage: Selection,
    /// Course name or `all`.
    pub course: Selection,
}

impl AdmissionFilter {
    pub fn new(text: impl Into<String>, stage: &str, course: &str) -> Self {
        Self {
            text: text.into(),
            stage: Selection::parse(stage),
            course: Selection::parse(course),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &AdmissionRecord) -> bool {
        matches_text(&self.text, &[&record.name, &record.email, &record.course])
            && self.stage.admits(record.stage.key())
            && self.course.admits(&record.course)
    }
}

/// Stable filter: keeps the input's relative order.
pub fn filter_admissions(
    records: &[AdmissionRecord],
    criteria: &AdmissionFilter,
) -> Vec<AdmissionRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
