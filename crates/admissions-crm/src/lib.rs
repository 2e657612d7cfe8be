//! Back end for a student-admissions CRM: stage tracking, inquiry intake, fee
//! collection, and staff directory workflows over in-memory session stores.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
