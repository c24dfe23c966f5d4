use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::dashboard::attendance::ToggleError;
use crate::dashboard::payroll::PayrollUpdateError;
use crate::dashboard::DashboardError;
use crate::telemetry::TelemetryError;
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
    Backend(BackendError),
    Dashboard(DashboardError),
    Toggle(ToggleError),
    Payroll(PayrollUpdateError),
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Backend(err) => backend_status(err),
            AppError::Dashboard(err) => match err {
                DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
                DashboardError::UnknownEmployee(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DashboardError::AlreadyRecorded { .. } => StatusCode::CONFLICT,
                DashboardError::Refresh { .. } => StatusCode::BAD_GATEWAY,
                DashboardError::Backend(err) => backend_status(err),
                DashboardError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Toggle(err) => match err {
                ToggleError::NoBackingRecord { .. } => StatusCode::CONFLICT,
                ToggleError::RecordNotFound(_) => StatusCode::NOT_FOUND,
                ToggleError::Backend(err) => backend_status(err),
            },
            AppError::Payroll(err) => match err {
                PayrollUpdateError::NoBackingRecord { .. } => StatusCode::CONFLICT,
                PayrollUpdateError::RecordNotFound(_) => StatusCode::NOT_FOUND,
                PayrollUpdateError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                PayrollUpdateError::Backend(err) => backend_status(err),
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn backend_status(err: &BackendError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Backend(err) => write!(f, "{}", err),
            AppError::Dashboard(err) => write!(f, "{}", err),
            AppError::Toggle(err) => write!(f, "{}", err),
            AppError::Payroll(err) => write!(f, "{}", err),
            AppError::BadRequest(message) => write!(f, "bad request: {}", message),
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
            AppError::Backend(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
            AppError::Toggle(err) => Some(err),
            AppError::Payroll(err) => Some(err),
            AppError::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
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

impl From<BackendError> for AppError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<ToggleError> for AppError {
    fn from(value: ToggleError) -> Self {
        Self::Toggle(value)
    }
}

impl From<PayrollUpdateError> for AppError {
    fn from(value: PayrollUpdateError) -> Self {
        Self::Payroll(value)
    }
}
