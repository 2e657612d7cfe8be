use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::filtering::{matches_text, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub u64);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Principal,
    Counselor,
    Finance,
}

impl StaffRole {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Principal => "principal",
            Self::Counselor => "counselor",
            Self::Finance => "finance",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    #[default]
    Active,
    Inactive,
}

impl StaffStatus {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Inquiries,
    Admissions,
    Fees,
    Analytics,
    Users,
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub leads: u32,
    pub conversions: u32,
}

impl Performance {
    /// Whole-number percentage of leads converted; zero without leads.
    pub fn conversion_rate(&self) -> u32 {
        if self.leads == 0 {
            return 0;
        }
        ((f64::from(self.conversions) / f64::from(self.leads)) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
    pub status: StaffStatus,
    pub join_date: NaiveDate,
    pub last_login: Option<NaiveDateTime>,
    pub permissions: Vec<Permission>,
    pub performance: Performance,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Option<StaffRole>,
    pub status: StaffStatus,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffFilter {
    pub text: String,
    pub role: Selection,
    pub status: Selection,
}

impl StaffFilter {
    pub fn matches(&self, user: &StaffUser) -> bool {
        matches_text(&self.text, &[&user.name, &user.email])
            && self.role.admits(user.role.key())
            && self.status.admits(user.status.key())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub admins: usize,
    pub principals: usize,
    pub counselors: usize,
    pub finance: usize,
}

impl RoleCounts {
    pub fn tally(users: &[StaffUser]) -> Self {
        users.iter().fold(Self::default(), |mut counts, user| {
            match user.role {
                StaffRole::Admin => counts.admins += 1,
                StaffRole::Principal => counts.principals += 1,
                StaffRole::Counselor => counts.counselors += 1,
                StaffRole::Finance => counts.finance += 1,
            }
            counts
        })
    }
}
