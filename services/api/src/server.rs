use crate::cli::ServeArgs;
use crate::infra::{AppState, CrmSession};
use crate::routes::with_crm_routes;
use admissions_crm::config::AppConfig;
use admissions_crm::error::AppError;
use admissions_crm::telemetry;
use admissions_crm::workflows::clock::SystemClock;
use admissions_crm::workflows::notifications::TracingNotifier;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(transitions) = args.transitions {
        config.admissions.transitions = transitions;
    }
    if let Some(unknown_stage) = args.unknown_stage {
        config.admissions.unknown_stage = unknown_stage;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = CrmSession::seeded(
        &config.admissions,
        Arc::new(TracingNotifier),
        Arc::new(SystemClock),
    )?;

    let app = with_crm_routes(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        transitions = ?config.admissions.transitions,
        "admissions CRM ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
