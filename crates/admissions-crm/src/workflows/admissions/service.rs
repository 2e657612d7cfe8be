use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{AdmissionId, AdmissionRecord, NewAdmission, StageCount};
use super::filter::{filter_admissions, AdmissionFilter};
use super::policy::{AnyToAnyTransition, TransitionPolicy};
use super::repository::{AdmissionRepository, RepositoryError};
use super::stages::{AdmissionStage, StageError, StageRegistry, UnknownStagePolicy};
use crate::config::AdmissionsConfig;
use crate::workflows::clock::{Clock, SystemClock};
use crate::workflows::notifications::{Notification, Notifier, NotifyError};
use crate::workflows::validation::{require, ValidationError};

/// Service composing the record store, stage registry, transition policy, and
/// the operator notification hook.
pub struct AdmissionService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    registry: StageRegistry,
    policy: Arc<dyn TransitionPolicy>,
    unknown_stage: UnknownStagePolicy,
    clock: Arc<dyn Clock>,
}

impl<R, N> AdmissionService<R, N>
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            registry: StageRegistry::standard(),
            policy: Arc::new(AnyToAnyTransition),
            unknown_stage: UnknownStagePolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(repository: Arc<R>, notifier: Arc<N>, config: &AdmissionsConfig) -> Self {
        Self::new(repository, notifier)
            .with_policy(config.transitions.build())
            .with_unknown_stage(config.unknown_stage)
    }

    pub fn with_policy(mut self, policy: Arc<dyn TransitionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_unknown_stage(mut self, policy: UnknownStagePolicy) -> Self {
        self.unknown_stage = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &StageRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &dyn TransitionPolicy {
        self.policy.as_ref()
    }

    /// Snapshot of every record in insertion order.
    pub fn list(&self) -> Result<Vec<AdmissionRecord>, AdmissionServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn get(&self, id: AdmissionId) -> Result<AdmissionRecord, AdmissionServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(AdmissionServiceError::NotFound { id })
    }

    /// Visible subset for the list surface.
    pub fn filter(
        &self,
        criteria: &AdmissionFilter,
    ) -> Result<Vec<AdmissionRecord>, AdmissionServiceError> {
        let records = self.repository.list()?;
        Ok(filter_admissions(&records, criteria))
    }

    /// Record counts per registry stage, in registry order.
    pub fn stage_overview(&self) -> Result<Vec<StageCount>, AdmissionServiceError> {
        let records = self.repository.list()?;
        Ok(self
            .registry
            .definitions()
            .iter()
            .map(|definition| StageCount {
                stage: definition.stage,
                label: definition.label,
                canonical_progress: definition.canonical_progress,
                count: records
                    .iter()
                    .filter(|record| record.stage == definition.stage)
                    .count(),
            })
            .collect())
    }

    /// Moves a record to `stage_key` and tells the operator how it went.
    ///
    /// Requesting the current stage is refused with [`AdmissionServiceError::NoChange`]
    /// and writes nothing.
    pub fn update_stage(
        &self,
        id: AdmissionId,
        stage_key: &str,
    ) -> Result<AdmissionRecord, AdmissionServiceError> {
        match self.apply_stage(id, stage_key) {
            Ok(updated) => {
                info!(
                    admission = %id,
                    stage = updated.stage.key(),
                    progress = updated.progress(),
                    "admission stage updated"
                );
                self.notifier.notify_or_warn(Notification::success(
                    "Stage Updated",
                    format!("Application stage updated for {}.", updated.name),
                ));
                Ok(updated)
            }
            Err(err) => {
                warn!(admission = %id, stage = stage_key, error = %err, "stage update refused");
                self.notifier.notify_or_warn(err.notice());
                Err(err)
            }
        }
    }

    fn apply_stage(
        &self,
        id: AdmissionId,
        stage_key: &str,
    ) -> Result<AdmissionRecord, AdmissionServiceError> {
        let target = self.registry.resolve(stage_key, self.unknown_stage)?.stage;
        let today = self.clock.today();

        self.repository
            .modify(id, |current| {
                if target == current.stage {
                    return Err(AdmissionServiceError::NoChange { stage: target });
                }
                if !self.policy.permits(current.stage, target) {
                    return Err(AdmissionServiceError::TransitionNotPermitted {
                        from: current.stage,
                        to: target,
                        policy: self.policy.name(),
                    });
                }
                Ok(current.moved_to(target, today))
            })
            .map_err(|err| not_found_as(err, id))?
    }

    /// Creates a record at the first stage with a fresh identifier.
    pub fn admit_application(
        &self,
        submission: NewAdmission,
    ) -> Result<AdmissionRecord, AdmissionServiceError> {
        if let Err(err) = require(&[
            ("name", submission.name.as_str()),
            ("email", submission.email.as_str()),
            ("course", submission.course.as_str()),
        ]) {
            self.notifier.notify_or_warn(err.notice());
            return Err(err.into());
        }

        let today = self.clock.today();
        let record = AdmissionRecord {
            id: self.repository.next_id()?,
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            course: submission.course.trim().to_string(),
            stage: self.registry.first().stage,
            documents: submission.documents,
            pending_documents: submission.pending_documents,
            application_date: today,
            last_update: today,
        };

        let stored = self.repository.insert(record)?;
        info!(admission = %stored.id, course = %stored.course, "admission record created");
        self.notifier.notify_or_warn(Notification::success(
            "Application Created",
            format!("Admission record created for {}.", stored.name),
        ));
        Ok(stored)
    }

    /// Files a submitted document; the same name leaves the pending list.
    pub fn record_document(
        &self,
        id: AdmissionId,
        document: &str,
    ) -> Result<AdmissionRecord, AdmissionServiceError> {
        require(&[("document", document)])?;
        let today = self.clock.today();
        self.repository
            .modify(id, |current| {
                let mut record = current.clone();
                if record.file_document(document.trim()) {
                    record.last_update = today;
                }
                Ok::<_, AdmissionServiceError>(record)
            })
            .map_err(|err| not_found_as(err, id))?
    }

    pub fn schedule_interview(&self, id: AdmissionId) -> Result<(), AdmissionServiceError> {
        let record = self.get(id)?;
        self.notifier.notify(Notification::success(
            "Interview Scheduled",
            format!("Interview scheduled for {}", record.name),
        ))?;
        Ok(())
    }
}

fn not_found_as(err: RepositoryError, id: AdmissionId) -> AdmissionServiceError {
    match err {
        RepositoryError::NotFound => AdmissionServiceError::NotFound { id },
        other => AdmissionServiceError::Repository(other),
    }
}

/// Error raised by the admission service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error("admission {id} not found")]
    NotFound { id: AdmissionId },
    #[error("stage is already set to {stage}")]
    NoChange { stage: AdmissionStage },
    #[error(transparent)]
    UnknownStage(#[from] StageError),
    #[error("moving from {from} to {to} is not allowed by the {policy} transition policy")]
    TransitionNotPermitted {
        from: AdmissionStage,
        to: AdmissionStage,
        policy: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotifyError),
}

impl AdmissionServiceError {
    /// Operator notice for a failed stage update.
    pub fn notice(&self) -> Notification {
        match self {
            Self::NoChange { .. } => {
                Notification::error("No Changes", "Stage is already set to the selected value.")
            }
            Self::Validation(err) => err.notice(),
            other => Notification::error("Update Failed", other.to_string()),
        }
    }
}
