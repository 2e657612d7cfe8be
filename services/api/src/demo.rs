use crate::admissions::render_admissions;
use crate::infra::{ConsoleNotifier, CrmSession};
use admissions_crm::config::AdmissionsConfig;
use admissions_crm::error::AppError;
use admissions_crm::workflows::admissions::{
    AdmissionDetail, AdmissionFilter, AdmissionId, TransitionPolicyKind,
};
use admissions_crm::workflows::clock::{Clock, FixedClock, SystemClock};
use admissions_crm::workflows::fees::{FeeId, ReminderChannel};
use admissions_crm::workflows::inquiries::{ContactChannel, InquiryForm, InquirySource};
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Session date used for new records and updates (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Stage transition rules for the walkthrough: any or forward
    #[arg(long, value_parser = crate::infra::parse_transitions)]
    pub(crate) transitions: Option<TransitionPolicyKind>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, transitions } = args;

    let clock: Arc<dyn Clock> = match today {
        Some(day) => Arc::new(FixedClock(day)),
        None => Arc::new(SystemClock),
    };
    let config = AdmissionsConfig {
        transitions: transitions.unwrap_or_default(),
        ..AdmissionsConfig::default()
    };
    let session = CrmSession::seeded(&config, Arc::new(ConsoleNotifier), clock)?;
    let admissions = session.admissions.as_ref();

    println!(
        "Admissions CRM demo (transition policy: {})",
        admissions.policy().name()
    );

    println!("\nPipeline");
    for count in admissions.stage_overview()? {
        println!(
            "  {:<22} {:>3}%  {} application(s)",
            count.label, count.canonical_progress, count.count
        );
    }

    println!("\nAll applications");
    render_admissions(&admissions.list()?);

    println!("\nSearch: \"engineering\"");
    render_admissions(&admissions.filter(&AdmissionFilter::text("engineering"))?);

    println!("\nReview application #3");
    let mut detail = AdmissionDetail::open(admissions, AdmissionId(3))?;
    let options: Vec<&str> = detail
        .stage_options()
        .iter()
        .map(|definition| definition.key)
        .collect();
    println!("  stage options: {}", options.join(", "));
    detail.schedule_interview()?;
    detail.select("admitted");
    match detail.confirm() {
        Ok(updated) => render_admissions(std::slice::from_ref(&updated)),
        Err(err) => println!("  update refused: {err}"),
    }

    println!("\nRe-submit the current stage for #3");
    if let Err(err) = admissions.update_stage(AdmissionId(3), "admitted") {
        println!("  refused: {err}");
    }

    println!("\nNew inquiry");
    let inquiry = session.inquiries.add(InquiryForm {
        name: "Ana Ruiz".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+1234567899".to_string(),
        course: "Arts".to_string(),
        source: Some(InquirySource::WalkIn),
        notes: "Asked about scholarships".to_string(),
    })?;
    session.inquiries.contact(inquiry.id, ContactChannel::WhatsApp)?;

    println!("\nFees");
    let summary = session.fees.summary()?;
    println!(
        "  pending {} | {} overdue | {} due soon | {:.1}% collected",
        summary.total_pending, summary.overdue_count, summary.due_soon_count, summary.collection_rate
    );
    session.fees.send_reminder(FeeId(1), ReminderChannel::Email)?;

    println!("\nStaff");
    let counts = session.staff.role_counts()?;
    println!(
        "  {} admin(s) | {} principal(s) | {} counselor(s) | {} finance",
        counts.admins, counts.principals, counts.counselors, counts.finance
    );
    for user in session.staff.list()? {
        if user.performance.leads > 0 {
            println!(
                "  {:<16} {} leads, {}% converted",
                user.name,
                user.performance.leads,
                user.performance.conversion_rate()
            );
        }
    }

    let dashboard = session.dashboard()?;
    println!("\nDashboard");
    println!(
        "  {} inquiries | {} active leads | {} admitted | {} with fees pending",
        dashboard.total_inquiries, dashboard.active_leads, dashboard.admissions, dashboard.pending_fees
    );

    let analytics = session.analytics()?;
    println!("\nAnalytics");
    println!(
        "  conversion {:.1}% | revenue {} | {} active counselors",
        analytics.kpis.conversion_rate,
        analytics.kpis.total_revenue,
        analytics.kpis.active_counselors
    );
    for step in &analytics.funnel {
        println!("  {:<28} {:>3} -> {:<3} {:>5.1}%", step.step, step.from, step.to, step.rate);
    }

    Ok(())
}
