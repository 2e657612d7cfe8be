use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::admissions::domain::{AdmissionId, AdmissionRecord};
use crate::workflows::admissions::fixtures::seeded_admissions;
use crate::workflows::admissions::repository::{AdmissionRepository, RepositoryError};
use crate::workflows::admissions::{
    AdmissionService, InMemoryAdmissionRepository, TransitionPolicy,
};
use crate::workflows::clock::FixedClock;
use crate::workflows::notifications::{
    InMemoryNotifier, Notification, Notifier, NotifyError,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")
}

pub(super) type TestService = AdmissionService<InMemoryAdmissionRepository, InMemoryNotifier>;

pub(super) fn build_service() -> (
    TestService,
    Arc<InMemoryAdmissionRepository>,
    Arc<InMemoryNotifier>,
) {
    let repository = Arc::new(
        InMemoryAdmissionRepository::with_records(seeded_admissions()).expect("seed loads"),
    );
    let notifier = Arc::new(InMemoryNotifier::default());
    let service = AdmissionService::new(repository.clone(), notifier.clone())
        .with_clock(Arc::new(FixedClock(today())));
    (service, repository, notifier)
}

pub(super) fn build_service_with_policy(
    policy: Arc<dyn TransitionPolicy>,
) -> (
    TestService,
    Arc<InMemoryAdmissionRepository>,
    Arc<InMemoryNotifier>,
) {
    let (service, repository, notifier) = build_service();
    (service.with_policy(policy), repository, notifier)
}

pub(super) fn seeded(id: u64) -> AdmissionRecord {
    seeded_admissions()
        .into_iter()
        .find(|record| record.id == AdmissionId(id))
        .expect("seeded record present")
}

/// Repository whose backing store is permanently down.
pub(super) struct UnavailableRepository;

impl AdmissionRepository for UnavailableRepository {
    fn insert(&self, _record: AdmissionRecord) -> Result<AdmissionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn modify<E, F>(
        &self,
        _id: AdmissionId,
        _change: F,
    ) -> Result<Result<AdmissionRecord, E>, RepositoryError>
    where
        F: FnOnce(&AdmissionRecord) -> Result<AdmissionRecord, E>,
    {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: AdmissionId) -> Result<Option<AdmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<AdmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn next_id(&self) -> Result<AdmissionId, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

/// Notifier that refuses every notice.
#[derive(Default)]
pub(super) struct BrokenNotifier;

impl Notifier for BrokenNotifier {
    fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast channel closed".to_string()))
    }
}

pub(super) async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
