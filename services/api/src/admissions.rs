use crate::infra::{ConsoleNotifier, CrmSession};
use admissions_crm::config::AdmissionsConfig;
use admissions_crm::error::AppError;
use admissions_crm::workflows::admissions::{
    read_admissions_csv, seeded_admissions, write_admissions_csv, AdmissionFilter, AdmissionId,
    AdmissionRecord, TransitionPolicyKind, UnknownStagePolicy,
};
use admissions_crm::workflows::clock::{Clock, FixedClock, SystemClock};
use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Case-insensitive search over name, email, and course
    #[arg(long, default_value = "")]
    pub(crate) text: String,
    /// Stage key to show, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) stage: String,
    /// Course name to show, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) course: String,
    /// Load records from an admissions CSV instead of the seeded session
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Write the filtered records to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateArgs {
    /// Admission record identifier
    #[arg(long)]
    pub(crate) id: u64,
    /// Target stage key
    #[arg(long)]
    pub(crate) stage: String,
    /// Admissions CSV to load; the updated records are written back to it
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Stage transition rules: any or forward
    #[arg(long, value_parser = crate::infra::parse_transitions, default_value = "any")]
    pub(crate) transitions: TransitionPolicyKind,
    /// Handling of unrecognised stage keys: reject or fallback
    #[arg(long, value_parser = crate::infra::parse_unknown_stage, default_value = "reject")]
    pub(crate) unknown_stage: UnknownStagePolicy,
    /// Date recorded as the last update (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        text,
        stage,
        course,
        data,
        csv,
    } = args;

    let session = open_session(data.as_deref(), &AdmissionsConfig::default(), Arc::new(SystemClock))?;
    let criteria = AdmissionFilter::new(text, &stage, &course);
    let records = session.admissions.filter(&criteria)?;

    render_admissions(&records);
    if let Some(path) = csv {
        save_records(&path, &records)?;
        println!("Wrote {} record(s) to {}", records.len(), path.display());
    }
    Ok(())
}

pub(crate) fn run_update(args: UpdateArgs) -> Result<(), AppError> {
    let UpdateArgs {
        id,
        stage,
        data,
        transitions,
        unknown_stage,
        today,
    } = args;

    let config = AdmissionsConfig {
        unknown_stage,
        transitions,
    };
    let clock: Arc<dyn Clock> = match today {
        Some(day) => Arc::new(FixedClock(day)),
        None => Arc::new(SystemClock),
    };
    let session = open_session(data.as_deref(), &config, clock)?;

    let updated = session.admissions.update_stage(AdmissionId(id), &stage)?;
    render_admissions(std::slice::from_ref(&updated));

    if let Some(path) = data {
        save_records(&path, &session.admissions.list()?)?;
    }
    Ok(())
}

fn open_session(
    data: Option<&Path>,
    config: &AdmissionsConfig,
    clock: Arc<dyn Clock>,
) -> Result<CrmSession<ConsoleNotifier>, AppError> {
    let records = match data {
        Some(path) => read_admissions_csv(File::open(path)?)?,
        None => seeded_admissions(),
    };
    CrmSession::with_admissions(records, config, Arc::new(ConsoleNotifier), clock)
}

fn save_records(path: &Path, records: &[AdmissionRecord]) -> Result<(), AppError> {
    let writer = BufWriter::new(File::create(path)?);
    write_admissions_csv(writer, records)?;
    Ok(())
}

pub(crate) fn render_admissions(records: &[AdmissionRecord]) {
    if records.is_empty() {
        println!("  (no matching applications)");
        return;
    }
    for record in records {
        println!(
            "  #{:<3} {:<16} {:<26} {:<22} {:>3}%  updated {}",
            record.id,
            record.name,
            record.course,
            record.stage.label(),
            record.progress(),
            record.last_update
        );
        if !record.pending_documents.is_empty() {
            println!("        pending: {}", record.pending_documents.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions_crm::workflows::admissions::AdmissionStage;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("admissions-{label}-{nanos}.csv"))
    }

    #[test]
    fn update_persists_to_data_file() {
        let path = scratch_file("update");
        save_records(&path, &seeded_admissions()).expect("fixture written");

        run_update(UpdateArgs {
            id: 3,
            stage: "admitted".to_string(),
            data: Some(path.clone()),
            transitions: TransitionPolicyKind::AnyToAny,
            unknown_stage: UnknownStagePolicy::Reject,
            today: NaiveDate::from_ymd_opt(2024, 2, 1),
        })
        .expect("update succeeds");

        let reloaded = read_admissions_csv(File::open(&path).expect("file exists")).expect("csv");
        let record = reloaded
            .iter()
            .find(|record| record.id == AdmissionId(3))
            .expect("record present");
        assert_eq!(record.stage, AdmissionStage::Admitted);
        assert_eq!(record.last_update, NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"));

        std::fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn list_exports_filtered_rows() {
        let path = scratch_file("list");
        run_list(ListArgs {
            text: "engineering".to_string(),
            stage: "all".to_string(),
            course: "all".to_string(),
            data: None,
            csv: Some(path.clone()),
        })
        .expect("list succeeds");

        let exported = read_admissions_csv(File::open(&path).expect("file exists")).expect("csv");
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "Emma Davis");

        std::fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn update_rejects_current_stage() {
        let result = run_update(UpdateArgs {
            id: 1,
            stage: "application-submitted".to_string(),
            data: None,
            transitions: TransitionPolicyKind::AnyToAny,
            unknown_stage: UnknownStagePolicy::Reject,
            today: None,
        });
        assert!(matches!(result, Err(AppError::Admissions(_))));
    }
}
