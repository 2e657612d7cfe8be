use super::domain::{AdmissionId, AdmissionRecord};
use super::repository::AdmissionRepository;
use super::service::{AdmissionService, AdmissionServiceError};
use super::stages::StageDefinition;
use crate::workflows::notifications::Notifier;

/// One record opened for review, with a pending stage selection that is only
/// applied on [`AdmissionDetail::confirm`]. Dropping or closing the surface
/// discards the selection.
pub struct AdmissionDetail<'a, R, N> {
    service: &'a AdmissionService<R, N>,
    record: AdmissionRecord,
    selected: String,
    open: bool,
}

impl<'a, R, N> AdmissionDetail<'a, R, N>
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    pub fn open(
        service: &'a AdmissionService<R, N>,
        id: AdmissionId,
    ) -> Result<Self, AdmissionServiceError> {
        let record = service.get(id)?;
        let selected = record.stage.key().to_string();
        Ok(Self {
            service,
            record,
            selected,
            open: true,
        })
    }

    pub fn record(&self) -> &AdmissionRecord {
        &self.record
    }

    pub fn current_stage(&self) -> &'static StageDefinition {
        self.record.stage.definition()
    }

    /// Choices for the stage selector; the current stage is listed first.
    pub fn stage_options(&self) -> Vec<&'static StageDefinition> {
        let policy = self.service.policy();
        let mut options = vec![self.current_stage()];
        options.extend(
            policy
                .allowed_targets(self.record.stage)
                .into_iter()
                .map(|stage| stage.definition()),
        );
        options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn select(&mut self, stage_key: impl Into<String>) {
        self.selected = stage_key.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Mirrors the disabled state of the update button.
    pub fn can_confirm(&self) -> bool {
        self.open && self.selected != self.record.stage.key()
    }

    /// Applies the selection. The surface closes on success and stays open on failure.
    pub fn confirm(&mut self) -> Result<AdmissionRecord, AdmissionServiceError> {
        let updated = self.service.update_stage(self.record.id, &self.selected)?;
        self.record = updated.clone();
        self.selected = updated.stage.key().to_string();
        self.open = false;
        Ok(updated)
    }

    pub fn schedule_interview(&self) -> Result<(), AdmissionServiceError> {
        self.service.schedule_interview(self.record.id)
    }

    pub fn close(self) -> AdmissionRecord {
        self.record
    }
}
