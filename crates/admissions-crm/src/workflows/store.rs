use std::sync::{Arc, Mutex, MutexGuard};

/// Error enumeration for session store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Insertion-ordered, per-session collection shared by reference with every view.
#[derive(Debug)]
pub struct SessionStore<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Clone> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Clone> SessionStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, RepositoryError> {
        self.items
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store lock poisoned".to_string()))
    }

    pub fn snapshot(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>, RepositoryError> {
        Ok(self.lock()?.iter().find(|item| predicate(item)).cloned())
    }

    pub fn push(&self, item: T) -> Result<T, RepositoryError> {
        self.lock()?.push(item.clone());
        Ok(item)
    }

    /// Builds the next item from the current contents and appends it under one lock.
    pub fn push_with(&self, build: impl FnOnce(&[T]) -> T) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        let item = build(&guard);
        guard.push(item.clone());
        Ok(item)
    }

    /// Applies `change` to the first matching item and returns the updated copy.
    pub fn modify(
        &self,
        predicate: impl Fn(&T) -> bool,
        change: impl FnOnce(&mut T),
    ) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        let item = guard
            .iter_mut()
            .find(|item| predicate(item))
            .ok_or(RepositoryError::NotFound)?;
        change(item);
        Ok(item.clone())
    }

    pub fn remove(&self, predicate: impl Fn(&T) -> bool) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        let index = guard
            .iter()
            .position(|item| predicate(item))
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_starts_empty() {
        let store: SessionStore<String> = SessionStore::default();
        assert_eq!(store.is_empty(), Ok(true));
        store.push("first".to_string()).expect("push succeeds");
        assert_eq!(store.len(), Ok(1));
    }

    #[test]
    fn clones_share_the_same_contents() {
        let store = SessionStore::new(vec![1, 2]);
        let view = store.clone();
        store.push(3).expect("push succeeds");
        assert_eq!(view.snapshot().expect("snapshot"), vec![1, 2, 3]);
    }

    #[test]
    fn modify_and_remove_report_missing_items() {
        let store = SessionStore::new(vec![1, 2, 3]);
        let updated = store.modify(|item| *item == 2, |item| *item = 20);
        assert_eq!(updated, Ok(20));
        assert_eq!(
            store.modify(|item| *item == 9, |item| *item = 0),
            Err(RepositoryError::NotFound)
        );
        assert_eq!(store.remove(|item| *item == 1), Ok(1));
        assert_eq!(store.snapshot().expect("snapshot"), vec![20, 3]);
    }
}
