//! CSV export of the visible admissions list, and fixture loading from the same format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use super::domain::{AdmissionId, AdmissionRecord};
use super::stages::{AdmissionStage, StageError};

const LIST_SEPARATOR: &str = ";";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid admissions CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write admissions CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {row}: {source}")]
    Stage { row: usize, source: StageError },
}

#[derive(Debug, Serialize, Deserialize)]
struct AdmissionRow {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Course")]
    course: String,
    #[serde(rename = "Stage")]
    stage: String,
    #[serde(rename = "Progress", default)]
    progress: u8,
    #[serde(rename = "Documents", default)]
    documents: String,
    #[serde(rename = "Pending Documents", default)]
    pending_documents: String,
    #[serde(rename = "Applied")]
    application_date: NaiveDate,
    #[serde(rename = "Updated")]
    last_update: NaiveDate,
}

fn join(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

fn split(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn write_admissions_csv<W: Write>(
    writer: W,
    records: &[AdmissionRecord],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(AdmissionRow {
            id: record.id.0,
            name: record.name.clone(),
            email: record.email.clone(),
            course: record.course.clone(),
            stage: record.stage.key().to_string(),
            progress: record.progress(),
            documents: join(&record.documents),
            pending_documents: join(&record.pending_documents),
            application_date: record.application_date,
            last_update: record.last_update,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads records back. The `Progress` column is ignored; progress always follows the stage.
pub fn read_admissions_csv<R: Read>(reader: R) -> Result<Vec<AdmissionRecord>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<AdmissionRow>().enumerate() {
        let row = row?;
        let stage = AdmissionStage::from_key(&row.stage).ok_or_else(|| ExportError::Stage {
            row: index + 1,
            source: StageError::UnknownStage(row.stage.clone()),
        })?;

        records.push(AdmissionRecord {
            id: AdmissionId(row.id),
            name: row.name,
            email: row.email,
            course: row.course,
            stage,
            documents: split(&row.documents),
            pending_documents: split(&row.pending_documents),
            application_date: row.application_date,
            last_update: row.last_update,
        });
    }

    Ok(records)
}
