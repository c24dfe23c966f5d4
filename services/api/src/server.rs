use crate::cli::ServeArgs;
use crate::infra::{http_dashboard, load_config, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hr_dashboard::error::AppError;
use hr_dashboard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = load_config(args.backend_url.take())?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dashboard = http_dashboard(&config)?;
    match dashboard.refresh_all().await {
        Ok(summary) => info!(employees = summary.employees, "initial snapshot loaded"),
        Err(err) => warn!(
            error = %err,
            backend = %config.backend.base_url,
            "starting with empty screens; POST /api/v1/refresh once the backend is reachable"
        ),
    }

    let app = with_dashboard_routes(dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hr dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
