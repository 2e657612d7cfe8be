use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::filtering::{matches_text, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeId(pub u64);

impl fmt::Display for FeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeStatus {
    Paid,
    Overdue,
    DueSoon,
    Upcoming,
}

impl FeeStatus {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::DueSoon => "due-soon",
            Self::Upcoming => "upcoming",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due Soon",
            Self::Upcoming => "Upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: u64,
    pub date: NaiveDate,
    pub paid: bool,
}

/// A student's fee plan. Amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: FeeId,
    pub student_name: String,
    pub course: String,
    pub total_fee: u64,
    pub installments: Vec<Installment>,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    pub last_payment: Option<NaiveDate>,
}

impl FeeRecord {
    pub fn paid_amount(&self) -> u64 {
        self.installments
            .iter()
            .filter(|installment| installment.paid)
            .map(|installment| installment.amount)
            .sum()
    }

    pub fn pending_amount(&self) -> u64 {
        self.total_fee.saturating_sub(self.paid_amount())
    }

    pub fn paid_installments(&self) -> usize {
        self.installments.iter().filter(|item| item.paid).count()
    }

    pub fn view(&self) -> FeeView {
        FeeView {
            record: self.clone(),
            status_label: self.status.label(),
            paid_amount: self.paid_amount(),
            pending_amount: self.pending_amount(),
        }
    }
}

/// Fee record with derived balances, as returned to API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct FeeView {
    #[serde(flatten)]
    pub record: FeeRecord,
    pub status_label: &'static str,
    pub paid_amount: u64,
    pub pending_amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeFilter {
    pub text: String,
    pub status: Selection,
}

impl FeeFilter {
    pub fn matches(&self, record: &FeeRecord) -> bool {
        matches_text(&self.text, &[&record.student_name, &record.course])
            && self.status.admits(record.status.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeSummary {
    pub total_pending: u64,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    /// Collected over billed, in percent with one decimal.
    pub collection_rate: f64,
}

impl FeeSummary {
    pub fn from_records(records: &[FeeRecord]) -> Self {
        let billed: u64 = records.iter().map(|record| record.total_fee).sum();
        let collected: u64 = records.iter().map(FeeRecord::paid_amount).sum();
        let collection_rate = if billed == 0 {
            0.0
        } else {
            (collected as f64 / billed as f64 * 1000.0).round() / 10.0
        };

        Self {
            total_pending: records.iter().map(FeeRecord::pending_amount).sum(),
            overdue_count: records
                .iter()
                .filter(|record| record.status == FeeStatus::Overdue)
                .count(),
            due_soon_count: records
                .iter()
                .filter(|record| record.status == FeeStatus::DueSoon)
                .count(),
            collection_rate,
        }
    }
}
