//! Staff directory. Roles and permissions are descriptive only; nothing here gates access.

pub mod domain;
pub mod service;

pub use domain::{
    Permission, Performance, RoleCounts, StaffFilter, StaffForm, StaffId, StaffRole, StaffStatus,
    StaffUser,
};
pub use service::{seeded_staff, StaffService, StaffServiceError};
