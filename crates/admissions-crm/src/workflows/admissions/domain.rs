use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::stages::AdmissionStage;

/// Stable record identifier; assigned once and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdmissionId(pub u64);

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One applicant's admission data. `progress` is derived from `stage` on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub id: AdmissionId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub stage: AdmissionStage,
    pub documents: Vec<String>,
    pub pending_documents: Vec<String>,
    pub application_date: NaiveDate,
    pub last_update: NaiveDate,
}

impl AdmissionRecord {
    pub fn progress(&self) -> u8 {
        self.stage.canonical_progress()
    }

    pub fn view(&self) -> AdmissionView {
        AdmissionView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            course: self.course.clone(),
            stage: self.stage,
            stage_label: self.stage.label(),
            progress: self.progress(),
            documents: self.documents.clone(),
            pending_documents: self.pending_documents.clone(),
            application_date: self.application_date,
            last_update: self.last_update,
        }
    }

    pub(crate) fn moved_to(&self, stage: AdmissionStage, today: NaiveDate) -> Self {
        Self {
            stage,
            last_update: today,
            ..self.clone()
        }
    }

    /// Appends a submitted document and clears it from the pending list.
    /// Returns `false` when the document was already on file.
    pub(crate) fn file_document(&mut self, name: &str) -> bool {
        self.pending_documents.retain(|pending| pending != name);
        if self.documents.iter().any(|existing| existing == name) {
            return false;
        }
        self.documents.push(name.to_string());
        true
    }
}

/// Serialized shape handed to list and detail surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionView {
    pub id: AdmissionId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub stage: AdmissionStage,
    pub stage_label: &'static str,
    pub progress: u8,
    pub documents: Vec<String>,
    pub pending_documents: Vec<String>,
    pub application_date: NaiveDate,
    pub last_update: NaiveDate,
}

/// Intake payload for a new admission record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdmission {
    pub name: String,
    pub email: String,
    pub course: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub pending_documents: Vec<String>,
}

/// Courses offered on the intake and filter selectors.
pub const COURSES: [&str; 5] = [
    "Computer Science",
    "Business Administration",
    "Engineering",
    "Medicine",
    "Arts",
];

/// Per-stage record count for the overview cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: AdmissionStage,
    pub label: &'static str,
    pub canonical_progress: u8,
    pub count: usize,
}
