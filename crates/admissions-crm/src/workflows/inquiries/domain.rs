use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::filtering::{matches_text, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(pub u64);

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    New,
    Contacted,
    Interested,
    FollowUp,
}

impl InquiryStatus {
    pub const fn key(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Interested => "interested",
            Self::FollowUp => "follow-up",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Interested => "Interested",
            Self::FollowUp => "Follow-up",
        }
    }
}

/// Where the lead came from. Serialized with the dashboard's display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquirySource {
    Website,
    WhatsApp,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Referral,
    #[serde(rename = "Walk-in")]
    WalkIn,
    #[serde(rename = "Phone Call")]
    PhoneCall,
}

impl InquirySource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::WhatsApp => "WhatsApp",
            Self::SocialMedia => "Social Media",
            Self::Referral => "Referral",
            Self::WalkIn => "Walk-in",
            Self::PhoneCall => "Phone Call",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactChannel {
    Phone,
    Email,
    WhatsApp,
}

impl ContactChannel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::WhatsApp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub source: Option<InquirySource>,
    pub status: InquiryStatus,
    pub date: NaiveDate,
    pub last_contact: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// "Add inquiry" form. Name, email, phone, and course are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub source: Option<InquirySource>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryFilter {
    pub text: String,
    pub status: Selection,
    pub source: Selection,
}

impl InquiryFilter {
    pub fn matches(&self, inquiry: &Inquiry) -> bool {
        let source = inquiry.source.map(InquirySource::label).unwrap_or_default();
        matches_text(&self.text, &[&inquiry.name, &inquiry.email, &inquiry.course])
            && self.status.admits(inquiry.status.key())
            && self.source.admits(source)
    }
}
