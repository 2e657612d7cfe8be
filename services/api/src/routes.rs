use crate::infra::{AppState, CrmSession};
use admissions_crm::error::AppError;
use admissions_crm::workflows::admissions::admission_router;
use admissions_crm::workflows::analytics::AnalyticsReport;
use admissions_crm::workflows::dashboard::DashboardSnapshot;
use admissions_crm::workflows::fees::{FeeFilter, FeeId, FeeSummary, FeeView, ReminderChannel};
use admissions_crm::workflows::inquiries::{
    ContactChannel, Inquiry, InquiryFilter, InquiryForm, InquiryId,
};
use admissions_crm::workflows::notifications::Notifier;
use admissions_crm::workflows::staff::{
    RoleCounts, StaffFilter, StaffForm, StaffId, StaffUser,
};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ContactRequest {
    pub(crate) channel: ContactChannel,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReminderRequest {
    pub(crate) channel: ReminderChannel,
}

#[derive(Debug, Serialize)]
pub(crate) struct StaffDirectory {
    pub(crate) users: Vec<StaffUser>,
    pub(crate) role_counts: RoleCounts,
}

pub(crate) fn with_crm_routes<N>(session: CrmSession<N>) -> Router
where
    N: Notifier + 'static,
{
    let workflows = Router::new()
        .route(
            "/api/v1/inquiries",
            get(list_inquiries::<N>).post(create_inquiry::<N>),
        )
        .route(
            "/api/v1/inquiries/:inquiry_id/contact",
            post(contact_inquiry::<N>),
        )
        .route("/api/v1/fees", get(list_fees::<N>))
        .route("/api/v1/fees/summary", get(fee_summary::<N>))
        .route("/api/v1/fees/:fee_id/reminders", post(send_fee_reminder::<N>))
        .route(
            "/api/v1/staff",
            get(list_staff::<N>).post(create_staff::<N>),
        )
        .route(
            "/api/v1/staff/:staff_id",
            put(update_staff::<N>).delete(delete_staff::<N>),
        )
        .route("/api/v1/dashboard", get(dashboard::<N>))
        .route("/api/v1/analytics", get(analytics::<N>))
        .with_state(session.clone());

    admission_router(session.admissions)
        .merge(workflows)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_inquiries<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Query(criteria): Query<InquiryFilter>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    Ok(Json(session.inquiries.filter(&criteria)?))
}

pub(crate) async fn create_inquiry<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Json(form): Json<InquiryForm>,
) -> Result<(StatusCode, Json<Inquiry>), AppError> {
    let inquiry = session.inquiries.add(form)?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

pub(crate) async fn contact_inquiry<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Path(inquiry_id): Path<u64>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Inquiry>, AppError> {
    let inquiry = session
        .inquiries
        .contact(InquiryId(inquiry_id), request.channel)?;
    Ok(Json(inquiry))
}

pub(crate) async fn list_fees<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Query(criteria): Query<FeeFilter>,
) -> Result<Json<Vec<FeeView>>, AppError> {
    let records = session.fees.filter(&criteria)?;
    Ok(Json(records.iter().map(|record| record.view()).collect()))
}

pub(crate) async fn fee_summary<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
) -> Result<Json<FeeSummary>, AppError> {
    Ok(Json(session.fees.summary()?))
}

pub(crate) async fn send_fee_reminder<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Path(fee_id): Path<u64>,
    Json(request): Json<ReminderRequest>,
) -> Result<Json<FeeView>, AppError> {
    let record = session.fees.send_reminder(FeeId(fee_id), request.channel)?;
    Ok(Json(record.view()))
}

pub(crate) async fn list_staff<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Query(criteria): Query<StaffFilter>,
) -> Result<Json<StaffDirectory>, AppError> {
    Ok(Json(StaffDirectory {
        users: session.staff.filter(&criteria)?,
        role_counts: session.staff.role_counts()?,
    }))
}

pub(crate) async fn create_staff<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Json(form): Json<StaffForm>,
) -> Result<(StatusCode, Json<StaffUser>), AppError> {
    let user = session.staff.create(form)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub(crate) async fn update_staff<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Path(staff_id): Path<u64>,
    Json(form): Json<StaffForm>,
) -> Result<Json<StaffUser>, AppError> {
    Ok(Json(session.staff.update(StaffId(staff_id), form)?))
}

pub(crate) async fn delete_staff<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
    Path(staff_id): Path<u64>,
) -> Result<Json<StaffUser>, AppError> {
    Ok(Json(session.staff.delete(StaffId(staff_id))?))
}

pub(crate) async fn dashboard<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    Ok(Json(session.dashboard()?))
}

pub(crate) async fn analytics<N: Notifier + 'static>(
    State(session): State<CrmSession<N>>,
) -> Result<Json<AnalyticsReport>, AppError> {
    Ok(Json(session.analytics()?))
}
