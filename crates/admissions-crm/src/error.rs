use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::admissions::{AdmissionServiceError, ExportError};
use crate::workflows::fees::FeeServiceError;
use crate::workflows::inquiries::InquiryServiceError;
use crate::workflows::staff::StaffServiceError;
use crate::workflows::store::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Export(ExportError),
    Admissions(AdmissionServiceError),
    Inquiries(InquiryServiceError),
    Fees(FeeServiceError),
    Staff(StaffServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Export(_) => StatusCode::BAD_REQUEST,
            AppError::Admissions(err) => match err {
                AdmissionServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                AdmissionServiceError::NoChange { .. } => StatusCode::CONFLICT,
                AdmissionServiceError::UnknownStage(_)
                | AdmissionServiceError::TransitionNotPermitted { .. }
                | AdmissionServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AdmissionServiceError::Repository(err) => repository_status(err),
                AdmissionServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Inquiries(err) => match err {
                InquiryServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                InquiryServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                InquiryServiceError::Repository(err) => repository_status(err),
            },
            AppError::Fees(err) => match err {
                FeeServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                FeeServiceError::AlreadyPaid { .. } => StatusCode::CONFLICT,
                FeeServiceError::Repository(err) => repository_status(err),
                FeeServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Staff(err) => match err {
                StaffServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                StaffServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StaffServiceError::Repository(err) => repository_status(err),
            },
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Admissions(err) => write!(f, "admissions error: {}", err),
            AppError::Inquiries(err) => write!(f, "inquiry error: {}", err),
            AppError::Fees(err) => write!(f, "fee error: {}", err),
            AppError::Staff(err) => write!(f, "staff error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Admissions(err) => Some(err),
            AppError::Inquiries(err) => Some(err),
            AppError::Fees(err) => Some(err),
            AppError::Staff(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<AdmissionServiceError> for AppError {
    fn from(value: AdmissionServiceError) -> Self {
        Self::Admissions(value)
    }
}

impl From<InquiryServiceError> for AppError {
    fn from(value: InquiryServiceError) -> Self {
        Self::Inquiries(value)
    }
}

impl From<FeeServiceError> for AppError {
    fn from(value: FeeServiceError) -> Self {
        Self::Fees(value)
    }
}

impl From<StaffServiceError> for AppError {
    fn from(value: StaffServiceError) -> Self {
        Self::Staff(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::admissions::AdmissionId;
    use crate::workflows::fees::FeeId;
    use crate::workflows::validation::ValidationError;

    #[test]
    fn maps_domain_errors_to_statuses() {
        let missing = AppError::from(AdmissionServiceError::NotFound { id: AdmissionId(9) });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(InquiryServiceError::Validation(
            ValidationError::MissingFields(vec!["email"]),
        ));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let settled = AppError::from(FeeServiceError::AlreadyPaid { id: FeeId(2) });
        assert_eq!(settled.status(), StatusCode::CONFLICT);

        let outage = AppError::from(StaffServiceError::Repository(RepositoryError::Unavailable(
            "offline".to_string(),
        )));
        assert_eq!(outage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_prefixes_the_failing_area() {
        let err = AppError::from(FeeServiceError::NotFound { id: FeeId(7) });
        assert_eq!(err.to_string(), "fee error: fee record 7 not found");
    }
}
