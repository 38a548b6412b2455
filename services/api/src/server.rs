use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use postcovid::assessment::{AssessmentApi, AssessmentService};
use postcovid::config::AppConfig;
use postcovid::error::AppError;
use postcovid::session::MockAuthenticator;
use postcovid::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let api = Arc::new(AssessmentApi {
        service: AssessmentService::new(&config.assessment),
        authenticator: MockAuthenticator::new(config.session.login_latency),
    });

    let app = with_service_routes(api)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        region_policy = config.assessment.region_policy.label(),
        "post-covid assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
