use super::{BackendError, HrBackend};
use crate::config::BackendConfig;
use crate::dashboard::attendance::{AttendanceEntry, AttendanceStatus, NewAttendanceEntry};
use crate::dashboard::domain::RecordId;
use crate::dashboard::leaves::{LeaveRequest, LeaveStatus};
use crate::dashboard::payroll::{PayrollEntry, PayrollStatus};
use crate::dashboard::roster::EmployeeRecord;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

/// `HrBackend` over the backend's JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::InvalidUrl(config.base_url.clone()));
        }
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "calling hr backend");
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(path, status = status.as_u16(), "hr backend rejected request");
            return Err(BackendError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(bytes.to_vec())
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, BackendError> {
        let bytes = self.send(path, self.request(Method::GET, path)).await?;
        let items: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
            path: path.to_string(),
            source,
        })?;
        debug!(path, count = items.len(), "fetched collection");
        Ok(items)
    }

    async fn put_status(&self, path: String, status: &str) -> Result<(), BackendError> {
        let request = self
            .request(Method::PUT, &path)
            .json(&StatusBody { status });
        self.send(&path, request).await?;
        Ok(())
    }
}

#[async_trait]
impl HrBackend for HttpBackend {
    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, BackendError> {
        self.get_collection("employees").await
    }

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceEntry>, BackendError> {
        self.get_collection("attendance").await
    }

    async fn fetch_payrolls(&self) -> Result<Vec<PayrollEntry>, BackendError> {
        self.get_collection("payrolls").await
    }

    async fn fetch_leaves(&self) -> Result<Vec<LeaveRequest>, BackendError> {
        self.get_collection("leaves").await
    }

    async fn update_attendance_status(
        &self,
        id: RecordId,
        status: AttendanceStatus,
    ) -> Result<(), BackendError> {
        self.put_status(format!("attendance/{id}"), status.label())
            .await
    }

    async fn create_attendance(
        &self,
        entry: NewAttendanceEntry,
    ) -> Result<AttendanceEntry, BackendError> {
        let path = "attendance";
        let request = self.request(Method::POST, path).json(&entry);
        let bytes = self.send(path, request).await?;
        serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn update_payroll_status(
        &self,
        id: RecordId,
        status: PayrollStatus,
    ) -> Result<(), BackendError> {
        self.put_status(format!("payrolls/{id}"), status.label()).await
    }

    async fn update_leave_status(
        &self,
        id: RecordId,
        status: LeaveStatus,
    ) -> Result<(), BackendError> {
        self.put_status(format!("leaves/{id}"), status.label()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> BackendConfig {
        BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let backend = HttpBackend::new(&config("http://localhost:5001/api/")).expect("client");
        assert_eq!(backend.base_url(), "http://localhost:5001/api");
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(matches!(
            HttpBackend::new(&config("localhost:5001")),
            Err(BackendError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_surfaces_request_errors() {
        let backend = HttpBackend::new(&config("http://127.0.0.1:9/api")).expect("client");
        assert!(matches!(
            backend.fetch_employees().await,
            Err(BackendError::Request(_))
        ));
    }
}
