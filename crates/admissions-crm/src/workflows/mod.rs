pub mod admissions;
pub mod analytics;
pub mod clock;
pub mod dashboard;
pub mod fees;
pub mod filtering;
pub mod inquiries;
pub mod notifications;
pub mod staff;
pub mod store;
pub mod validation;
