//! Cross-module scenarios: inquiry intake, fee follow-up, staff edits, and the dashboard
//! counters they feed, all sharing one in-memory session.

use std::sync::Arc;

use chrono::NaiveDate;

use admissions_crm::workflows::admissions::{
    seeded_admissions, AdmissionId, AdmissionService, InMemoryAdmissionRepository,
};
use admissions_crm::workflows::clock::{Clock, FixedClock};
use admissions_crm::workflows::dashboard::DashboardSnapshot;
use admissions_crm::workflows::fees::{seeded_fees, FeeId, FeeService, ReminderChannel};
use admissions_crm::workflows::inquiries::{
    seeded_inquiries, ContactChannel, InquiryForm, InquiryId, InquiryService, InquirySource,
};
use admissions_crm::workflows::notifications::InMemoryNotifier;
use admissions_crm::workflows::staff::{seeded_staff, StaffId, StaffService};
use admissions_crm::workflows::store::SessionStore;

struct Session {
    admissions: AdmissionService<InMemoryAdmissionRepository, InMemoryNotifier>,
    inquiries: InquiryService<InMemoryNotifier>,
    fees: FeeService<InMemoryNotifier>,
    staff: StaffService<InMemoryNotifier>,
    notifier: Arc<InMemoryNotifier>,
}

impl Session {
    fn start() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
        ));
        let notifier = Arc::new(InMemoryNotifier::default());
        let repository = Arc::new(
            InMemoryAdmissionRepository::with_records(seeded_admissions()).expect("seed loads"),
        );

        Self {
            admissions: AdmissionService::new(repository, notifier.clone())
                .with_clock(clock.clone()),
            inquiries: InquiryService::new(
                SessionStore::new(seeded_inquiries()),
                notifier.clone(),
                clock.clone(),
            ),
            fees: FeeService::new(SessionStore::new(seeded_fees()), notifier.clone()),
            staff: StaffService::new(SessionStore::new(seeded_staff()), notifier.clone(), clock),
            notifier,
        }
    }

    fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot::compute(
            &self.inquiries.list().expect("inquiries"),
            &self.admissions.list().expect("admissions"),
            &self.fees.list().expect("fees"),
            self.admissions.stage_overview().expect("overview"),
        )
    }
}

#[test]
fn dashboard_tracks_session_activity() {
    let session = Session::start();
    let before = session.dashboard();
    assert_eq!(before.total_inquiries, 4);
    assert_eq!(before.active_leads, 3);
    assert_eq!(before.admissions, 1);
    assert_eq!(before.pending_fees, 3);

    let lead = session
        .inquiries
        .add(InquiryForm {
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+1234567899".to_string(),
            course: "Arts".to_string(),
            source: Some(InquirySource::Website),
            notes: String::new(),
        })
        .expect("inquiry added");
    session
        .inquiries
        .contact(lead.id, ContactChannel::Phone)
        .expect("contact logged");
    session
        .inquiries
        .contact(InquiryId(1), ContactChannel::Email)
        .expect("contact logged");
    session
        .admissions
        .update_stage(AdmissionId(3), "admitted")
        .expect("stage updated");

    let after = session.dashboard();
    assert_eq!(after.total_inquiries, 5);
    assert_eq!(after.active_leads, 5);
    assert_eq!(after.admissions, 2);

    let admitted = after
        .stage_overview
        .iter()
        .find(|count| count.label == "Admitted")
        .expect("admitted row");
    assert_eq!(admitted.count, 2);
}

#[test]
fn follow_up_actions_emit_operator_notices() {
    let session = Session::start();

    session
        .fees
        .send_reminder(FeeId(3), ReminderChannel::WhatsApp)
        .expect("reminder sent");
    session.staff.delete(StaffId(4)).expect("user deleted");

    let titles: Vec<String> = session
        .notifier
        .drain()
        .into_iter()
        .map(|notice| notice.title)
        .collect();
    assert_eq!(titles, vec!["WhatsApp Reminder Sent", "User Deleted"]);
    assert_eq!(session.staff.role_counts().expect("counts").finance, 0);
}
