use chrono::NaiveDate;
use hr_dashboard::backend::HttpBackend;
use hr_dashboard::config::AppConfig;
use hr_dashboard::dashboard::DashboardService;
use hr_dashboard::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Loads configuration, applying a command-line override of the backend URL.
pub(crate) fn load_config(backend_url: Option<String>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = backend_url {
        config.backend.base_url = url;
    }
    Ok(config)
}

pub(crate) fn http_dashboard(
    config: &AppConfig,
) -> Result<Arc<DashboardService<HttpBackend>>, AppError> {
    let backend = HttpBackend::new(&config.backend)?;
    Ok(Arc::new(DashboardService::new(Arc::new(backend))))
}
