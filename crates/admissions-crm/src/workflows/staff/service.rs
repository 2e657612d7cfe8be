use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use super::domain::{
    Performance, Permission, RoleCounts, StaffFilter, StaffForm, StaffId, StaffRole, StaffStatus,
    StaffUser,
};
use crate::workflows::clock::Clock;
use crate::workflows::notifications::{Notification, Notifier};
use crate::workflows::store::{RepositoryError, SessionStore};
use crate::workflows::validation::{require, ValidationError};

pub struct StaffService<N> {
    store: SessionStore<StaffUser>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
    /// Highest id ever issued; deleted ids stay retired.
    issued: AtomicU64,
}

impl<N: Notifier + 'static> StaffService<N> {
    pub fn new(store: SessionStore<StaffUser>, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            notifier,
            clock,
            issued: AtomicU64::new(0),
        }
    }

    pub fn list(&self) -> Result<Vec<StaffUser>, StaffServiceError> {
        Ok(self.store.snapshot()?)
    }

    pub fn filter(&self, criteria: &StaffFilter) -> Result<Vec<StaffUser>, StaffServiceError> {
        Ok(self
            .store
            .snapshot()?
            .into_iter()
            .filter(|user| criteria.matches(user))
            .collect())
    }

    pub fn role_counts(&self) -> Result<RoleCounts, StaffServiceError> {
        Ok(RoleCounts::tally(&self.store.snapshot()?))
    }

    pub fn create(&self, form: StaffForm) -> Result<StaffUser, StaffServiceError> {
        let role = self.validate(&form)?;
        let today = self.clock.today();
        let user = self.store.push_with(|existing| StaffUser {
            id: self.issue_id(existing),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            role,
            status: form.status,
            join_date: today,
            last_login: None,
            permissions: form.permissions.clone(),
            performance: Performance::default(),
        })?;

        info!(staff = %user.id, role = user.role.key(), "staff user created");
        self.notifier.notify_or_warn(Notification::success(
            "User Created Successfully",
            format!("{} has been created.", user.name),
        ));
        Ok(user)
    }

    /// Replaces the editable profile fields; history such as join date and performance is kept.
    pub fn update(&self, id: StaffId, form: StaffForm) -> Result<StaffUser, StaffServiceError> {
        let role = self.validate(&form)?;
        let user = self
            .store
            .modify(
                |user| user.id == id,
                |user| {
                    user.name = form.name.trim().to_string();
                    user.email = form.email.trim().to_string();
                    user.phone = form.phone.trim().to_string();
                    user.role = role;
                    user.status = form.status;
                    user.permissions = form.permissions;
                },
            )
            .map_err(|err| not_found_as(err, id))?;

        info!(staff = %id, "staff user updated");
        self.notifier.notify_or_warn(Notification::success(
            "User Updated Successfully",
            format!("{} has been updated.", user.name),
        ));
        Ok(user)
    }

    pub fn delete(&self, id: StaffId) -> Result<StaffUser, StaffServiceError> {
        let user = self
            .store
            .remove(|user| user.id == id)
            .map_err(|err| not_found_as(err, id))?;

        info!(staff = %id, "staff user deleted");
        self.notifier.notify_or_warn(Notification::success(
            "User Deleted",
            format!("{} has been deleted from the system.", user.name),
        ));
        Ok(user)
    }

    /// Runs inside the store lock, so reading and bumping the mark cannot interleave.
    fn issue_id(&self, existing: &[StaffUser]) -> StaffId {
        let seen = existing.iter().map(|user| user.id.0).max().unwrap_or(0);
        let next = self.issued.load(Ordering::Relaxed).max(seen) + 1;
        self.issued.store(next, Ordering::Relaxed);
        StaffId(next)
    }

    fn validate(&self, form: &StaffForm) -> Result<StaffRole, StaffServiceError> {
        let role_key = form.role.map(StaffRole::key).unwrap_or_default();
        let checked = require(&[
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("phone", form.phone.as_str()),
            ("role", role_key),
        ]);
        match (checked, form.role) {
            (Ok(()), Some(role)) => Ok(role),
            (Err(err), _) => {
                self.notifier.notify_or_warn(err.notice());
                Err(err.into())
            }
            (Ok(()), None) => Err(ValidationError::MissingFields(vec!["role"]).into()),
        }
    }
}

fn not_found_as(err: RepositoryError, id: StaffId) -> StaffServiceError {
    match err {
        RepositoryError::NotFound => StaffServiceError::NotFound { id },
        other => StaffServiceError::Repository(other),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StaffServiceError {
    #[error("staff user {id} not found")]
    NotFound { id: StaffId },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn login(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    date(year, month, day).and_hms_opt(hour, minute, 0)
}

pub fn seeded_staff() -> Vec<StaffUser> {
    let member = |id: u64,
                  name: &str,
                  email: &str,
                  role: StaffRole,
                  status: StaffStatus,
                  join_date: NaiveDate,
                  last_login: Option<NaiveDateTime>,
                  permissions: Vec<Permission>,
                  (leads, conversions): (u32, u32)| StaffUser {
        id: StaffId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("+123456789{}", id - 1),
        role,
        status,
        join_date,
        last_login,
        permissions,
        performance: Performance { leads, conversions },
    };

    vec![
        member(
            1,
            "John Smith",
            "john.smith@college.edu",
            StaffRole::Admin,
            StaffStatus::Active,
            date(2023, 1, 15),
            login(2024, 1, 20, 9, 30),
            vec![Permission::All],
            (0, 0),
        ),
        member(
            2,
            "Sarah Davis",
            "sarah.davis@college.edu",
            StaffRole::Counselor,
            StaffStatus::Active,
            date(2023, 3, 20),
            login(2024, 1, 20, 14, 15),
            vec![Permission::Inquiries, Permission::Admissions],
            (45, 32),
        ),
        member(
            3,
            "Mike Johnson",
            "mike.johnson@college.edu",
            StaffRole::Counselor,
            StaffStatus::Active,
            date(2023, 5, 10),
            login(2024, 1, 19, 16, 45),
            vec![Permission::Inquiries, Permission::Admissions],
            (52, 35),
        ),
        member(
            4,
            "Emma Wilson",
            "emma.wilson@college.edu",
            StaffRole::Finance,
            StaffStatus::Active,
            date(2023, 7, 5),
            login(2024, 1, 20, 11, 20),
            vec![Permission::Fees, Permission::Analytics],
            (0, 0),
        ),
        member(
            5,
            "Robert Brown",
            "robert.brown@college.edu",
            StaffRole::Principal,
            StaffStatus::Active,
            date(2022, 8, 1),
            login(2024, 1, 18, 10, 0),
            vec![Permission::All],
            (0, 0),
        ),
        member(
            6,
            "Lisa Anderson",
            "lisa.anderson@college.edu",
            StaffRole::Counselor,
            StaffStatus::Inactive,
            date(2023, 9, 15),
            login(2024, 1, 10, 15, 30),
            vec![Permission::Inquiries],
            (28, 18),
        ),
    ]
}
