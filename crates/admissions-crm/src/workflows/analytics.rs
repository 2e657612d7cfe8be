use serde::Serialize;

use super::admissions::{AdmissionRecord, AdmissionStage, COURSES};
use super::fees::{FeeRecord, FeeSummary};
use super::inquiries::{Inquiry, InquiryStatus};
use super::staff::{StaffRole, StaffStatus, StaffUser};

/// Interest and outcome per course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoursePopularity {
    pub course: String,
    pub inquiries: usize,
    pub applications: usize,
    pub admitted: usize,
}

/// One hop of the conversion funnel; `rate` is `to` over `from` in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStep {
    pub step: &'static str,
    pub from: usize,
    pub to: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounselorPerformance {
    pub name: String,
    pub status: StaffStatus,
    pub leads: u32,
    pub conversions: u32,
    pub conversion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsKpis {
    /// Conversions over leads across every staff member, one decimal.
    pub conversion_rate: f64,
    /// Sum of paid installments.
    pub total_revenue: u64,
    pub active_counselors: usize,
    pub admitted: usize,
    pub fee_collection_rate: f64,
}

/// Read-only analytics over the session stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub kpis: AnalyticsKpis,
    pub funnel: Vec<FunnelStep>,
    pub courses: Vec<CoursePopularity>,
    pub counselors: Vec<CounselorPerformance>,
}

impl AnalyticsReport {
    pub fn compute(
        inquiries: &[Inquiry],
        admissions: &[AdmissionRecord],
        fees: &[FeeRecord],
        staff: &[StaffUser],
    ) -> Self {
        let counselors: Vec<CounselorPerformance> = staff
            .iter()
            .filter(|user| user.role == StaffRole::Counselor)
            .map(|user| CounselorPerformance {
                name: user.name.clone(),
                status: user.status,
                leads: user.performance.leads,
                conversions: user.performance.conversions,
                conversion_rate: user.performance.conversion_rate(),
            })
            .collect();

        let leads: u64 = staff.iter().map(|user| u64::from(user.performance.leads)).sum();
        let conversions: u64 = staff
            .iter()
            .map(|user| u64::from(user.performance.conversions))
            .sum();

        let kpis = AnalyticsKpis {
            conversion_rate: percent(conversions, leads),
            total_revenue: fees.iter().map(FeeRecord::paid_amount).sum(),
            active_counselors: counselors
                .iter()
                .filter(|counselor| counselor.status == StaffStatus::Active)
                .count(),
            admitted: admissions
                .iter()
                .filter(|record| record.stage == AdmissionStage::Admitted)
                .count(),
            fee_collection_rate: FeeSummary::from_records(fees).collection_rate,
        };

        Self {
            kpis,
            funnel: funnel(inquiries, admissions),
            courses: course_popularity(inquiries, admissions),
            counselors,
        }
    }
}

fn funnel(inquiries: &[Inquiry], admissions: &[AdmissionRecord]) -> Vec<FunnelStep> {
    // Rejected records leave the pipeline wherever they stopped.
    let reached = |progress: u8| {
        admissions
            .iter()
            .filter(|record| record.stage != AdmissionStage::Rejected)
            .filter(|record| record.progress() >= progress)
            .count()
    };
    let leads = inquiries
        .iter()
        .filter(|inquiry| inquiry.status != InquiryStatus::New)
        .count();
    let verification = reached(AdmissionStage::DocumentVerification.canonical_progress());
    let interview = reached(AdmissionStage::InterviewScheduled.canonical_progress());
    let admitted = admissions
        .iter()
        .filter(|record| record.stage == AdmissionStage::Admitted)
        .count();

    [
        ("Inquiry to Lead", inquiries.len(), leads),
        ("Application to Verification", admissions.len(), verification),
        ("Verification to Interview", verification, interview),
        ("Interview to Admission", interview, admitted),
    ]
    .into_iter()
    .map(|(step, from, to)| FunnelStep {
        step,
        from,
        to,
        rate: percent(to as u64, from as u64),
    })
    .collect()
}

fn course_popularity(
    inquiries: &[Inquiry],
    admissions: &[AdmissionRecord],
) -> Vec<CoursePopularity> {
    let mut rows: Vec<CoursePopularity> = COURSES
        .iter()
        .map(|course| CoursePopularity {
            course: course.to_string(),
            inquiries: 0,
            applications: 0,
            admitted: 0,
        })
        .collect();

    for inquiry in inquiries {
        row_for(&mut rows, &inquiry.course).inquiries += 1;
    }
    for record in admissions {
        let row = row_for(&mut rows, &record.course);
        row.applications += 1;
        if record.stage == AdmissionStage::Admitted {
            row.admitted += 1;
        }
    }
    rows
}

/// Courses outside the catalogue get a row in first-seen order.
fn row_for<'a>(rows: &'a mut Vec<CoursePopularity>, course: &str) -> &'a mut CoursePopularity {
    let index = match rows.iter().position(|row| row.course == course) {
        Some(index) => index,
        None => {
            rows.push(CoursePopularity {
                course: course.to_string(),
                inquiries: 0,
                applications: 0,
                admitted: 0,
            });
            rows.len() - 1
        }
    };
    &mut rows[index]
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}
