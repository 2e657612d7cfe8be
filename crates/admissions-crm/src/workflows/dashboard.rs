use serde::Serialize;

use super::admissions::{AdmissionRecord, AdmissionStage, StageCount};
use super::fees::FeeRecord;
use super::inquiries::{Inquiry, InquiryStatus};

/// Headline counters plus the admission pipeline, computed from the live stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_inquiries: usize,
    pub active_leads: usize,
    pub admissions: usize,
    pub pending_fees: usize,
    pub stage_overview: Vec<StageCount>,
}

impl DashboardSnapshot {
    pub fn compute(
        inquiries: &[Inquiry],
        admissions: &[AdmissionRecord],
        fees: &[FeeRecord],
        stage_overview: Vec<StageCount>,
    ) -> Self {
        Self {
            total_inquiries: inquiries.len(),
            active_leads: inquiries
                .iter()
                .filter(|inquiry| inquiry.status != InquiryStatus::New)
                .count(),
            admissions: admissions
                .iter()
                .filter(|record| record.stage == AdmissionStage::Admitted)
                .count(),
            pending_fees: fees
                .iter()
                .filter(|record| record.pending_amount() > 0)
                .count(),
            stage_overview,
        }
    }
}
