use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{FeeFilter, FeeId, FeeRecord, FeeStatus, FeeSummary, Installment};
use crate::workflows::notifications::{Notification, Notifier, NotifyError};
use crate::workflows::store::{RepositoryError, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderChannel {
    Email,
    #[serde(rename = "SMS")]
    Sms,
    WhatsApp,
}

impl ReminderChannel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::WhatsApp => "WhatsApp",
        }
    }
}

pub struct FeeService<N> {
    store: SessionStore<FeeRecord>,
    notifier: Arc<N>,
}

impl<N: Notifier + 'static> FeeService<N> {
    pub fn new(store: SessionStore<FeeRecord>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    pub fn list(&self) -> Result<Vec<FeeRecord>, FeeServiceError> {
        Ok(self.store.snapshot()?)
    }

    pub fn filter(&self, criteria: &FeeFilter) -> Result<Vec<FeeRecord>, FeeServiceError> {
        Ok(self
            .store
            .snapshot()?
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect())
    }

    pub fn summary(&self) -> Result<FeeSummary, FeeServiceError> {
        Ok(FeeSummary::from_records(&self.store.snapshot()?))
    }

    /// Reminders are only relevant while a balance is outstanding.
    pub fn send_reminder(
        &self,
        id: FeeId,
        channel: ReminderChannel,
    ) -> Result<FeeRecord, FeeServiceError> {
        let record = self
            .store
            .find(|record| record.id == id)?
            .ok_or(FeeServiceError::NotFound { id })?;
        if record.status == FeeStatus::Paid {
            return Err(FeeServiceError::AlreadyPaid { id });
        }

        info!(fee = %id, channel = channel.label(), pending = record.pending_amount(), "fee reminder sent");
        self.notifier.notify(Notification::success(
            format!("{} Reminder Sent", channel.label()),
            format!(
                "Fee reminder sent to {} via {}",
                record.student_name,
                channel.label().to_lowercase()
            ),
        ))?;
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeeServiceError {
    #[error("fee record {id} not found")]
    NotFound { id: FeeId },
    #[error("fee record {id} is already paid in full")]
    AlreadyPaid { id: FeeId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotifyError),
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn installment(amount: u64, on: NaiveDate, paid: bool) -> Installment {
    Installment {
        amount,
        date: on,
        paid,
    }
}

pub fn seeded_fees() -> Vec<FeeRecord> {
    vec![
        FeeRecord {
            id: FeeId(1),
            student_name: "Sarah Johnson".to_string(),
            course: "Computer Science".to_string(),
            total_fee: 25_000,
            installments: vec![
                installment(15_000, date(2024, 1, 10), true),
                installment(10_000, date(2024, 2, 15), false),
            ],
            due_date: date(2024, 2, 15),
            status: FeeStatus::Overdue,
            last_payment: Some(date(2024, 1, 10)),
        },
        FeeRecord {
            id: FeeId(2),
            student_name: "Mike Chen".to_string(),
            course: "Business Administration".to_string(),
            total_fee: 22_000,
            installments: vec![
                installment(11_000, date(2024, 1, 10), true),
                installment(11_000, date(2024, 1, 25), true),
            ],
            due_date: date(2024, 1, 30),
            status: FeeStatus::Paid,
            last_payment: Some(date(2024, 1, 25)),
        },
        FeeRecord {
            id: FeeId(3),
            student_name: "Emma Davis".to_string(),
            course: "Engineering".to_string(),
            total_fee: 28_000,
            installments: vec![
                installment(14_000, date(2024, 1, 15), true),
                installment(14_000, date(2024, 2, 20), false),
            ],
            due_date: date(2024, 2, 20),
            status: FeeStatus::DueSoon,
            last_payment: Some(date(2024, 1, 15)),
        },
        FeeRecord {
            id: FeeId(4),
            student_name: "Alex Kumar".to_string(),
            course: "Medicine".to_string(),
            total_fee: 35_000,
            installments: vec![
                installment(17_500, date(2024, 1, 20), true),
                installment(17_500, date(2024, 3, 1), false),
            ],
            due_date: date(2024, 3, 1),
            status: FeeStatus::Upcoming,
            last_payment: Some(date(2024, 1, 20)),
        },
    ]
}
