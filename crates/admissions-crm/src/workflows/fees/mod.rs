//! Fee collection: installment plans, balances, and payment reminders.

pub mod domain;
pub mod service;

pub use domain::{FeeFilter, FeeId, FeeRecord, FeeStatus, FeeSummary, FeeView, Installment};
pub use service::{seeded_fees, FeeService, FeeServiceError, ReminderChannel};
