//! Admission-stage tracking: the stage registry, the record store, the stage
//! transition operation, and the filtered list and detail surfaces built on them.

pub mod detail;
pub mod domain;
pub mod export;
pub mod filter;
pub mod fixtures;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;
pub mod stages;

#[cfg(test)]
mod tests;

pub use detail::AdmissionDetail;
pub use domain::{AdmissionId, AdmissionRecord, AdmissionView, NewAdmission, StageCount, COURSES};
pub use export::{read_admissions_csv, write_admissions_csv, ExportError};
pub use filter::{filter_admissions, AdmissionFilter};
pub use fixtures::seeded_admissions;
pub use policy::{AdjacencyTransition, AnyToAnyTransition, TransitionPolicy, TransitionPolicyKind};
pub use repository::{AdmissionRepository, InMemoryAdmissionRepository, RepositoryError};
pub use router::{admission_router, StageUpdateRequest};
pub use service::{AdmissionService, AdmissionServiceError};
pub use stages::{
    AdmissionStage, StageDefinition, StageDisplay, StageError, StageRegistry, UnknownStagePolicy,
};
