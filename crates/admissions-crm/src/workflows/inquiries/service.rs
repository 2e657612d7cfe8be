use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{
    ContactChannel, Inquiry, InquiryFilter, InquiryForm, InquiryId, InquirySource, InquiryStatus,
};
use crate::workflows::clock::Clock;
use crate::workflows::notifications::{Notification, Notifier};
use crate::workflows::store::{RepositoryError, SessionStore};
use crate::workflows::validation::{require, ValidationError};

pub struct InquiryService<N> {
    store: SessionStore<Inquiry>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N: Notifier + 'static> InquiryService<N> {
    pub fn new(store: SessionStore<Inquiry>, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    pub fn list(&self) -> Result<Vec<Inquiry>, InquiryServiceError> {
        Ok(self.store.snapshot()?)
    }

    pub fn filter(&self, criteria: &InquiryFilter) -> Result<Vec<Inquiry>, InquiryServiceError> {
        Ok(self
            .store
            .snapshot()?
            .into_iter()
            .filter(|inquiry| criteria.matches(inquiry))
            .collect())
    }

    pub fn add(&self, form: InquiryForm) -> Result<Inquiry, InquiryServiceError> {
        if let Err(err) = require(&[
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("phone", form.phone.as_str()),
            ("course", form.course.as_str()),
        ]) {
            self.notifier.notify_or_warn(err.notice());
            return Err(err.into());
        }

        let today = self.clock.today();
        let inquiry = self.store.push_with(|existing| Inquiry {
            id: InquiryId(existing.iter().map(|item| item.id.0).max().unwrap_or(0) + 1),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            course: form.course.trim().to_string(),
            source: form.source,
            status: InquiryStatus::New,
            date: today,
            last_contact: None,
            notes: form.notes.trim().to_string(),
        })?;

        info!(inquiry = %inquiry.id, course = %inquiry.course, "inquiry added");
        self.notifier.notify_or_warn(Notification::success(
            "Inquiry Added Successfully",
            format!("New inquiry from {} has been created.", inquiry.name),
        ));
        Ok(inquiry)
    }

    /// Logs an outreach attempt. A `New` lead becomes `Contacted`; later statuses are kept.
    pub fn contact(
        &self,
        id: InquiryId,
        channel: ContactChannel,
    ) -> Result<Inquiry, InquiryServiceError> {
        let today = self.clock.today();
        let inquiry = self
            .store
            .modify(
                |inquiry| inquiry.id == id,
                |inquiry| {
                    if inquiry.status == InquiryStatus::New {
                        inquiry.status = InquiryStatus::Contacted;
                    }
                    inquiry.last_contact = Some(today);
                },
            )
            .map_err(|err| match err {
                RepositoryError::NotFound => InquiryServiceError::NotFound { id },
                other => InquiryServiceError::Repository(other),
            })?;

        self.notifier.notify_or_warn(Notification::success(
            format!("{} Contact", channel.label()),
            format!(
                "Initiating {} contact with {}",
                channel.label().to_lowercase(),
                inquiry.name
            ),
        ));
        Ok(inquiry)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryServiceError {
    #[error("inquiry {id} not found")]
    NotFound { id: InquiryId },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub fn seeded_inquiries() -> Vec<Inquiry> {
    let lead = |id: u64,
                name: &str,
                email: &str,
                phone: &str,
                course: &str,
                source: InquirySource,
                status: InquiryStatus,
                received: NaiveDate,
                last_contact: Option<NaiveDate>| Inquiry {
        id: InquiryId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        course: course.to_string(),
        source: Some(source),
        status,
        date: received,
        last_contact,
        notes: String::new(),
    };

    vec![
        lead(
            1,
            "Sarah Johnson",
            "sarah@example.com",
            "+1234567890",
            "Computer Science",
            InquirySource::Website,
            InquiryStatus::New,
            date(2024, 1, 15),
            None,
        ),
        lead(
            2,
            "Mike Chen",
            "mike@example.com",
            "+1234567891",
            "Business Administration",
            InquirySource::WhatsApp,
            InquiryStatus::Contacted,
            date(2024, 1, 14),
            Some(date(2024, 1, 18)),
        ),
        lead(
            3,
            "Emma Davis",
            "emma@example.com",
            "+1234567892",
            "Engineering",
            InquirySource::SocialMedia,
            InquiryStatus::Interested,
            date(2024, 1, 13),
            Some(date(2024, 1, 19)),
        ),
        lead(
            4,
            "Alex Kumar",
            "alex@example.com",
            "+1234567893",
            "Medicine",
            InquirySource::Referral,
            InquiryStatus::FollowUp,
            date(2024, 1, 12),
            Some(date(2024, 1, 20)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::clock::FixedClock;
    use crate::workflows::filtering::Selection;
    use crate::workflows::notifications::{InMemoryNotifier, NotificationKind};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")
    }

    fn service() -> (InquiryService<InMemoryNotifier>, Arc<InMemoryNotifier>) {
        let notifier = Arc::new(InMemoryNotifier::default());
        let service = InquiryService::new(
            SessionStore::new(seeded_inquiries()),
            notifier.clone(),
            Arc::new(FixedClock(today())),
        );
        (service, notifier)
    }

    fn form() -> InquiryForm {
        InquiryForm {
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+1234567899".to_string(),
            course: "Arts".to_string(),
            source: Some(InquirySource::WalkIn),
            notes: "Asked about scholarships".to_string(),
        }
    }

    #[test]
    fn add_creates_new_inquiry_and_notifies() {
        let (service, notifier) = service();
        let inquiry = service.add(form()).expect("inquiry added");

        assert_eq!(inquiry.id, InquiryId(5));
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(inquiry.date, today());
        assert_eq!(service.list().expect("list").len(), 5);

        let notice = notifier.last().expect("notice");
        assert_eq!(notice.title, "Inquiry Added Successfully");
        assert_eq!(notice.message, "New inquiry from Ana Ruiz has been created.");
    }

    #[test]
    fn add_requires_contact_details() {
        let (service, notifier) = service();
        let mut incomplete = form();
        incomplete.phone = String::new();

        match service.add(incomplete) {
            Err(InquiryServiceError::Validation(ValidationError::MissingFields(fields))) => {
                assert_eq!(fields, vec!["phone"])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        let notice = notifier.last().expect("notice");
        assert_eq!(notice.kind, NotificationKind::Error);
        assert_eq!(notice.message, "Please fill in all required fields.");
        assert_eq!(service.list().expect("list").len(), 4);
    }

    #[test]
    fn source_is_optional() {
        let (service, _) = service();
        let mut without_source = form();
        without_source.source = None;
        let inquiry = service.add(without_source).expect("inquiry added");
        assert!(inquiry.source.is_none());
    }

    #[test]
    fn filter_combines_text_status_and_source() {
        let (service, _) = service();

        let criteria = InquiryFilter {
            text: "EXAMPLE".to_string(),
            status: Selection::parse("follow-up"),
            source: Selection::All,
        };
        let visible = service.filter(&criteria).expect("filter");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Alex Kumar");

        let criteria = InquiryFilter {
            source: Selection::parse("Social Media"),
            ..InquiryFilter::default()
        };
        let visible = service.filter(&criteria).expect("filter");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].course, "Engineering");
    }

    #[test]
    fn contact_promotes_new_leads_only() {
        let (service, notifier) = service();

        let contacted = service
            .contact(InquiryId(1), ContactChannel::WhatsApp)
            .expect("contact logged");
        assert_eq!(contacted.status, InquiryStatus::Contacted);
        assert_eq!(contacted.last_contact, Some(today()));
        let notice = notifier.last().expect("notice");
        assert_eq!(notice.title, "WhatsApp Contact");
        assert_eq!(notice.message, "Initiating whatsapp contact with Sarah Johnson");

        let interested = service
            .contact(InquiryId(3), ContactChannel::Email)
            .expect("contact logged");
        assert_eq!(interested.status, InquiryStatus::Interested);

        assert!(matches!(
            service.contact(InquiryId(40), ContactChannel::Phone),
            Err(InquiryServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn sources_serialize_with_display_names() {
        let json = serde_json::to_string(&InquirySource::SocialMedia).expect("serializes");
        assert_eq!(json, "\"Social Media\"");
        let status = serde_json::to_string(&InquiryStatus::FollowUp).expect("serializes");
        assert_eq!(status, "\"follow-up\"");
    }
}
