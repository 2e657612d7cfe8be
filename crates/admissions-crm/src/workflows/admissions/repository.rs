use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{AdmissionId, AdmissionRecord};
pub use crate::workflows::store::RepositoryError;

/// Storage abstraction behind the admission service. The store is the only
/// component that mutates admission records.
pub trait AdmissionRepository: Send + Sync {
    fn insert(&self, record: AdmissionRecord) -> Result<AdmissionRecord, RepositoryError>;
    /// Reads, checks, and replaces one record while holding the store exclusively.
    ///
    /// The outer result reports store failures (including a missing id); the inner
    /// result is whatever `change` decided. Nothing is written when `change` fails.
    fn modify<E, F>(
        &self,
        id: AdmissionId,
        change: F,
    ) -> Result<Result<AdmissionRecord, E>, RepositoryError>
    where
        F: FnOnce(&AdmissionRecord) -> Result<AdmissionRecord, E>;
    fn fetch(&self, id: AdmissionId) -> Result<Option<AdmissionRecord>, RepositoryError>;
    /// Snapshot in insertion order.
    fn list(&self) -> Result<Vec<AdmissionRecord>, RepositoryError>;
    /// Reserves an identifier that has never been handed out by this store.
    fn next_id(&self) -> Result<AdmissionId, RepositoryError>;
}

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<AdmissionRecord>,
    high_water: u64,
}

/// Session-scoped record store seeded from a fixture.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAdmissionRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryAdmissionRepository {
    pub fn with_records(
        records: impl IntoIterator<Item = AdmissionRecord>,
    ) -> Result<Self, RepositoryError> {
        let repository = Self::default();
        for record in records {
            repository.insert(record)?;
        }
        Ok(repository)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("admission store lock poisoned".to_string()))
    }
}

impl AdmissionRepository for InMemoryAdmissionRepository {
    fn insert(&self, record: AdmissionRecord) -> Result<AdmissionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.records.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.high_water = guard.high_water.max(record.id.0);
        guard.records.push(record.clone());
        Ok(record)
    }

    fn modify<E, F>(
        &self,
        id: AdmissionId,
        change: F,
    ) -> Result<Result<AdmissionRecord, E>, RepositoryError>
    where
        F: FnOnce(&AdmissionRecord) -> Result<AdmissionRecord, E>,
    {
        let mut guard = self.lock()?;
        let slot = guard
            .records
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(change(slot).map(|updated| {
            *slot = updated.clone();
            updated
        }))
    }

    fn fetch(&self, id: AdmissionId) -> Result<Option<AdmissionRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.iter().find(|record| record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<AdmissionRecord>, RepositoryError> {
        Ok(self.lock()?.records.clone())
    }

    fn next_id(&self) -> Result<AdmissionId, RepositoryError> {
        let mut guard = self.lock()?;
        guard.high_water += 1;
        Ok(AdmissionId(guard.high_water))
    }
}
