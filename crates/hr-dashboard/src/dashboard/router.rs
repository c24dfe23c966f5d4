use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::attendance::{AttendanceQuery, AttendanceStatus};
use super::directory::DirectoryQuery;
use super::domain::{parse_day, today, RecordId, RecordIdentity};
use super::filter::{DepartmentFilter, RowFilter};
use super::leaves::{LeaveDecision, LeaveStatus};
use super::payroll::PayrollStatus;
use super::service::{AttendanceDraft, DashboardService};
use crate::backend::HrBackend;
use crate::error::AppError;

type SharedService<B> = Arc<DashboardService<B>>;

/// HTTP endpoints over the dashboard screens.
pub fn dashboard_router<B>(service: SharedService<B>) -> Router
where
    B: HrBackend + 'static,
{
    Router::new()
        .route("/api/v1/refresh", post(refresh_handler::<B>))
        .route(
            "/api/v1/attendance",
            get(attendance_handler::<B>).post(record_attendance_handler::<B>),
        )
        .route("/api/v1/attendance/export", get(export_handler::<B>))
        .route("/api/v1/attendance/:key/toggle", post(toggle_handler::<B>))
        .route("/api/v1/payroll", get(payroll_handler::<B>))
        .route("/api/v1/payroll/:key/payslip", get(payslip_handler::<B>))
        .route("/api/v1/payroll/:key/status", put(payroll_status_handler::<B>))
        .route("/api/v1/employees", get(directory_handler::<B>))
        .route("/api/v1/leaves", get(leaves_handler::<B>))
        .route("/api/v1/leaves/:id/decision", post(leave_decision_handler::<B>))
        .with_state(service)
}

fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_day(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{value}' as YYYY-MM-DD"))
        }),
    }
}

fn parse_key(raw: &str) -> Result<RecordIdentity, AppError> {
    RecordIdentity::from_key(raw)
        .ok_or_else(|| AppError::BadRequest(format!("'{raw}' is not a row key")))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttendanceParams {
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    from: Option<NaiveDate>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    q: Option<String>,
}

impl From<AttendanceParams> for AttendanceQuery {
    fn from(params: AttendanceParams) -> Self {
        Self {
            date: params.date,
            from: params.from,
            department: params
                .department
                .as_deref()
                .map(DepartmentFilter::parse)
                .unwrap_or_default(),
            query: params.q,
        }
    }
}

#[derive(Debug, Serialize)]
struct RowStatus<S> {
    key: String,
    status: S,
}

pub(crate) async fn refresh_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
) -> Result<Response, AppError> {
    let summary = service.refresh_all().await?;
    Ok(Json(summary).into_response())
}

pub(crate) async fn attendance_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Query(params): Query<AttendanceParams>,
) -> Response {
    let query = AttendanceQuery::from(params);
    Json(service.attendance_view(&query, today()).await).into_response()
}

pub(crate) async fn export_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Query(params): Query<AttendanceParams>,
) -> Result<Response, AppError> {
    let query = AttendanceQuery::from(params);
    let export = service.attendance_export(&query, today()).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}

pub(crate) async fn record_attendance_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Json(draft): Json<AttendanceDraft>,
) -> Result<Response, AppError> {
    let created = service.record_attendance(draft).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

pub(crate) async fn toggle_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let identity = parse_key(&key)?;
    let status: AttendanceStatus = service.toggle_attendance(&identity).await?;
    Ok(Json(RowStatus {
        key: identity.key(),
        status,
    })
    .into_response())
}

pub(crate) async fn payroll_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Query(filter): Query<RowFilter>,
) -> Response {
    Json(service.payroll_view(&filter).await).into_response()
}

pub(crate) async fn payslip_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let identity = parse_key(&key)?;
    Ok(Json(service.payslip(&identity).await?).into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayrollStatusRequest {
    status: PayrollStatus,
}

pub(crate) async fn payroll_status_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Path(key): Path<String>,
    Json(request): Json<PayrollStatusRequest>,
) -> Result<Response, AppError> {
    let identity = parse_key(&key)?;
    let status = service
        .set_payroll_status(&identity, request.status)
        .await?;
    Ok(Json(RowStatus {
        key: identity.key(),
        status,
    })
    .into_response())
}

pub(crate) async fn directory_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Query(query): Query<DirectoryQuery>,
) -> Response {
    Json(service.directory_view(&query).await).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaveParams {
    #[serde(default)]
    status: Option<String>,
}

pub(crate) async fn leaves_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Query(params): Query<LeaveParams>,
) -> Result<Response, AppError> {
    let status = match params.status.as_deref() {
        None => LeaveStatus::default(),
        Some(raw) => LeaveStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown leave status '{raw}'")))?,
    };
    Ok(Json(service.leave_view(status).await).into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeaveDecisionRequest {
    decision: LeaveDecision,
}

pub(crate) async fn leave_decision_handler<B: HrBackend + 'static>(
    State(service): State<SharedService<B>>,
    Path(id): Path<i64>,
    Json(request): Json<LeaveDecisionRequest>,
) -> Result<Response, AppError> {
    let decided = service.decide_leave(RecordId(id), request.decision).await?;
    Ok(Json(decided).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::dashboard::attendance::AttendanceEntry;
    use crate::dashboard::domain::EmployeeId;
    use crate::dashboard::roster::EmployeeRecord;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn employee(id: i64, first: &str, last: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            id: EmployeeId(id),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            department: Some(department.to_string()),
            position: None,
            email: None,
            status: Some("Active".to_string()),
        }
    }

    async fn router() -> Router {
        let backend = InMemoryBackend::new()
            .with_employees(vec![
                employee(1, "A", "B", "IT"),
                employee(2, "C", "D", "Ops"),
            ])
            .with_attendance(vec![AttendanceEntry {
                id: RecordId(7),
                employee: "A B".to_string(),
                employee_id: None,
                department: None,
                date: "2024-05-01".to_string(),
                check_in: Some("09:00".to_string()),
                check_out: None,
                status: AttendanceStatus::Present,
                minutes_late: Some(0),
            }]);
        let service = Arc::new(DashboardService::new(Arc::new(backend)));
        service.refresh_all().await.expect("refresh");
        dashboard_router(service)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn attendance_route_returns_filtered_view() {
        let request = Request::get("/api/v1/attendance?department=Ops")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(router().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["targetDate"], "2024-05-01");
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["rows"][0]["identity"]["placeholder"], "temp-2");
        assert_eq!(body["stats"]["totalEmployees"], 2);
        assert_eq!(body["stats"]["averageCheckIn"], "09:00");
    }

    #[tokio::test]
    async fn malformed_dates_are_rejected() {
        let request = Request::get("/api/v1/attendance?date=05/01/2024")
            .body(Body::empty())
            .expect("request");
        let (status, _) = send(router().await, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn toggling_a_synthetic_row_conflicts() {
        let (status, body) = send(
            router().await,
            post_json("/api/v1/attendance/temp-2/toggle", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("no attendance record yet")));
    }

    #[tokio::test]
    async fn toggling_a_persisted_row_flips_it() {
        let (status, body) = send(
            router().await,
            post_json("/api/v1/attendance/7/toggle", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "key": "7", "status": "Absent" }));
    }

    #[tokio::test]
    async fn export_is_served_as_a_csv_attachment() {
        let response = router()
            .await
            .oneshot(
                Request::get("/api/v1/attendance/export")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"attendance_export_2024-05-01.csv\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let csv = String::from_utf8(bytes.to_vec()).expect("utf-8");
        assert!(csv.starts_with("\"Employee\",\"Department\""));
        assert_eq!(csv.lines().count(), 3);
    }

    #[tokio::test]
    async fn creating_attendance_for_a_missing_day() {
        let (status, body) = send(
            router().await,
            post_json(
                "/api/v1/attendance",
                json!({ "employeeId": 2, "date": "2024-05-01", "status": "Late", "checkIn": "09:45" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["employee"], "C D");
        assert_eq!(body["id"], 8);
    }

    #[tokio::test]
    async fn payroll_status_of_missing_record_conflicts() {
        let request = Request::put("/api/v1/payroll/temp-1/status")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "status": "Paid" }).to_string()))
            .expect("request");
        let (status, _) = send(router().await, request).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_leave_status_is_a_bad_request() {
        let request = Request::get("/api/v1/leaves?status=Someday")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(router().await, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn deciding_an_unknown_leave_is_not_found() {
        let (status, _) = send(
            router().await,
            post_json("/api/v1/leaves/99/decision", json!({ "decision": "Approved" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
