//! Inquiry intake: the lead list ahead of an admission application.

pub mod domain;
pub mod service;

pub use domain::{
    ContactChannel, Inquiry, InquiryFilter, InquiryForm, InquiryId, InquirySource, InquiryStatus,
};
pub use service::{seeded_inquiries, InquiryService, InquiryServiceError};
