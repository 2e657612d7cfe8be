use admissions_crm::config::AdmissionsConfig;
use admissions_crm::error::AppError;
use admissions_crm::workflows::admissions::{
    seeded_admissions, AdmissionRecord, AdmissionService, AdmissionServiceError,
    InMemoryAdmissionRepository, TransitionPolicyKind, UnknownStagePolicy,
};
use admissions_crm::workflows::analytics::AnalyticsReport;
use admissions_crm::workflows::clock::Clock;
use admissions_crm::workflows::dashboard::DashboardSnapshot;
use admissions_crm::workflows::fees::{seeded_fees, FeeService};
use admissions_crm::workflows::inquiries::{seeded_inquiries, InquiryService};
use admissions_crm::workflows::notifications::{Notification, NotificationKind, Notifier, NotifyError};
use admissions_crm::workflows::staff::{seeded_staff, StaffService};
use admissions_crm::workflows::store::SessionStore;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type AdmissionsHandle<N> = AdmissionService<InMemoryAdmissionRepository, N>;

/// Every workflow service for one operator session, sharing a notifier and clock.
pub(crate) struct CrmSession<N> {
    pub(crate) admissions: Arc<AdmissionsHandle<N>>,
    pub(crate) inquiries: Arc<InquiryService<N>>,
    pub(crate) fees: Arc<FeeService<N>>,
    pub(crate) staff: Arc<StaffService<N>>,
}

impl<N> Clone for CrmSession<N> {
    fn clone(&self) -> Self {
        Self {
            admissions: Arc::clone(&self.admissions),
            inquiries: Arc::clone(&self.inquiries),
            fees: Arc::clone(&self.fees),
            staff: Arc::clone(&self.staff),
        }
    }
}

impl<N: Notifier + 'static> CrmSession<N> {
    /// Starts a session from the fixture data.
    pub(crate) fn seeded(
        config: &AdmissionsConfig,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        Self::with_admissions(seeded_admissions(), config, notifier, clock)
    }

    /// Starts a session whose admission records come from `records`; the other
    /// stores still use the fixture data.
    pub(crate) fn with_admissions(
        records: Vec<AdmissionRecord>,
        config: &AdmissionsConfig,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let repository = Arc::new(
            InMemoryAdmissionRepository::with_records(records)
                .map_err(AdmissionServiceError::from)?,
        );
        let admissions = AdmissionService::from_config(repository, notifier.clone(), config)
            .with_clock(clock.clone());

        Ok(Self {
            admissions: Arc::new(admissions),
            inquiries: Arc::new(InquiryService::new(
                SessionStore::new(seeded_inquiries()),
                notifier.clone(),
                clock.clone(),
            )),
            fees: Arc::new(FeeService::new(
                SessionStore::new(seeded_fees()),
                notifier.clone(),
            )),
            staff: Arc::new(StaffService::new(
                SessionStore::new(seeded_staff()),
                notifier,
                clock,
            )),
        })
    }

    pub(crate) fn dashboard(&self) -> Result<DashboardSnapshot, AppError> {
        Ok(DashboardSnapshot::compute(
            &self.inquiries.list()?,
            &self.admissions.list()?,
            &self.fees.list()?,
            self.admissions.stage_overview()?,
        ))
    }

    pub(crate) fn analytics(&self) -> Result<AnalyticsReport, AppError> {
        Ok(AnalyticsReport::compute(
            &self.inquiries.list()?,
            &self.admissions.list()?,
            &self.fees.list()?,
            &self.staff.list()?,
        ))
    }
}

/// Prints operator notices to the terminal for CLI runs.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let marker = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "!!",
        };
        println!(
            "  [{marker}] {}: {}",
            notification.title, notification.message
        );
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_transitions(raw: &str) -> Result<TransitionPolicyKind, String> {
    TransitionPolicyKind::parse(raw)
        .ok_or_else(|| format!("unknown transition policy '{raw}' (expected any or forward)"))
}

pub(crate) fn parse_unknown_stage(raw: &str) -> Result<UnknownStagePolicy, String> {
    UnknownStagePolicy::parse(raw)
        .ok_or_else(|| format!("unknown stage policy '{raw}' (expected reject or fallback)"))
}
