use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AdmissionId, AdmissionView, NewAdmission, StageCount};
use super::export::write_admissions_csv;
use super::filter::AdmissionFilter;
use super::repository::AdmissionRepository;
use super::service::{AdmissionService, AdmissionServiceError};
use crate::error::AppError;
use crate::workflows::notifications::Notifier;

/// Body of a stage update from the detail surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageUpdateRequest {
    pub stage: String,
}

#[derive(Debug, Serialize)]
pub struct StageCatalogEntry {
    pub key: &'static str,
    #[serde(flatten)]
    pub count: StageCount,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Router builder exposing the admissions list, detail, and stage update endpoints.
pub fn admission_router<R, N>(service: Arc<AdmissionService<R, N>>) -> Router
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/admissions",
            get(list_handler::<R, N>).post(create_handler::<R, N>),
        )
        .route("/api/v1/admissions/stages", get(stages_handler::<R, N>))
        .route("/api/v1/admissions/export.csv", get(export_handler::<R, N>))
        .route("/api/v1/admissions/:admission_id", get(detail_handler::<R, N>))
        .route(
            "/api/v1/admissions/:admission_id/stage",
            post(update_stage_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
    Query(criteria): Query<AdmissionFilter>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.filter(&criteria) {
        Ok(records) => {
            let views: Vec<AdmissionView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stages_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.stage_overview() {
        Ok(counts) => {
            let entries: Vec<StageCatalogEntry> = counts
                .into_iter()
                .map(|count| {
                    let definition = count.stage.definition();
                    StageCatalogEntry {
                        key: definition.key,
                        color: definition.display.color,
                        icon: definition.display.icon,
                        count,
                    }
                })
                .collect();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
    Query(criteria): Query<AdmissionFilter>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    let records = match service.filter(&criteria) {
        Ok(records) => records,
        Err(err) => return error_response(err),
    };

    let mut buffer = Vec::new();
    match write_admissions_csv(&mut buffer, &records) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            buffer,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn detail_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
    Path(admission_id): Path<u64>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.get(AdmissionId(admission_id)) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_stage_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
    Path(admission_id): Path<u64>,
    Json(request): Json<StageUpdateRequest>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.update_stage(AdmissionId(admission_id), &request.stage) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R, N>(
    State(service): State<Arc<AdmissionService<R, N>>>,
    Json(submission): Json<NewAdmission>,
) -> Response
where
    R: AdmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.admit_application(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AdmissionServiceError) -> Response {
    let notice = err.notice();
    let payload = json!({
        "error": err.to_string(),
        "title": notice.title,
    });
    (AppError::from(err).status(), Json(payload)).into_response()
}
