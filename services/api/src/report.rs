use crate::infra::{http_dashboard, load_config};
use chrono::NaiveDate;
use clap::Args;
use hr_dashboard::dashboard::attendance::{AttendanceQuery, AttendanceView};
use hr_dashboard::dashboard::payroll::PayrollView;
use hr_dashboard::dashboard::{today, DepartmentFilter, RowFilter};
use hr_dashboard::error::AppError;
use hr_dashboard::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AttendanceReportArgs {
    /// Day to report (YYYY-MM-DD). Defaults to the latest logged day.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// First day of the daily history (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Only show one department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Case-insensitive search over employee, department and status
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Also write the filtered table as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Override the configured HR backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PayrollReportArgs {
    /// Only show one department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Case-insensitive search over employee, department and status
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Override the configured HR backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

fn department_filter(raw: Option<&str>) -> DepartmentFilter {
    raw.map(DepartmentFilter::parse).unwrap_or_default()
}

pub(crate) async fn run_attendance_report(args: AttendanceReportArgs) -> Result<(), AppError> {
    let config = load_config(args.backend_url)?;
    telemetry::init(&config.telemetry)?;
    let dashboard = http_dashboard(&config)?;
    dashboard.refresh_attendance().await?;

    let query = AttendanceQuery {
        date: args.date,
        from: args.from,
        department: department_filter(args.department.as_deref()),
        query: args.search,
    };
    let today = today();
    let view = dashboard.attendance_view(&query, today).await;
    for line in attendance_lines(&view) {
        println!("{line}");
    }

    if let Some(path) = args.csv {
        let export = dashboard.attendance_export(&query, today).await?;
        std::fs::write(&path, export.body)?;
        println!("\nCSV written to {} ({})", path.display(), export.file_name);
    }
    Ok(())
}

pub(crate) async fn run_payroll_report(args: PayrollReportArgs) -> Result<(), AppError> {
    let config = load_config(args.backend_url)?;
    telemetry::init(&config.telemetry)?;
    let dashboard = http_dashboard(&config)?;
    dashboard.refresh_payroll().await?;

    let filter = RowFilter {
        department: department_filter(args.department.as_deref()),
        query: args.search,
    };
    for line in payroll_lines(&dashboard.payroll_view(&filter).await) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn attendance_lines(view: &AttendanceView) -> Vec<String> {
    let stats = &view.stats;
    let mut lines = vec![
        format!("Attendance for {}", view.target_date),
        format!(
            "Employees: {} | Present: {} | Late: {} | Absent: {} | Avg check-in: {}",
            stats.total_employees,
            stats.present,
            stats.late,
            stats.absent,
            stats.average_check_in_label()
        ),
        String::new(),
        format!(
            "{:<24} {:<16} {:>8} {:>9} {:<8} {:>4}",
            "Employee", "Department", "Check-in", "Check-out", "Status", "Late"
        ),
    ];
    for row in &view.rows {
        let marker = if row.identity.is_synthetic() { "*" } else { "" };
        lines.push(format!(
            "{:<24} {:<16} {:>8} {:>9} {:<8} {:>4}",
            format!("{}{marker}", row.employee),
            row.department,
            row.check_in_label(),
            row.check_out_label(),
            row.status.label(),
            row.minutes_late
        ));
    }
    if view.rows.iter().any(|row| row.identity.is_synthetic()) {
        lines.push("* no attendance record for this day".to_string());
    }

    if !view.chart.is_empty() {
        lines.push(String::new());
        lines.push("Daily history".to_string());
        for bucket in &view.chart {
            lines.push(format!(
                "  {}  present {:>3}  late {:>3}  absent {:>3}",
                bucket.date, bucket.present, bucket.late, bucket.absent
            ));
        }
    }
    lines
}

pub(crate) fn payroll_lines(view: &PayrollView) -> Vec<String> {
    let stats = &view.stats;
    let mut lines = vec![
        format!(
            "Employees: {} | Total payroll: {} | Paid: {} | Pending / Unset: {}",
            stats.total_employees, stats.total_payroll, stats.paid, stats.pending_or_unset
        ),
        String::new(),
        format!(
            "{:<24} {:<16} {:>10} {:>10} {:>10} {:>10} {:<8}",
            "Employee", "Department", "Base", "Overtime", "Deductions", "Net", "Status"
        ),
    ];
    for row in &view.rows {
        lines.push(format!(
            "{:<24} {:<16} {:>10} {:>10} {:>10} {:>10} {:<8}",
            row.employee,
            row.department,
            row.base,
            row.overtime,
            row.deductions,
            row.net,
            row.status.label()
        ));
    }
    lines.push(String::new());
    for bucket in &view.status_breakdown {
        lines.push(format!(
            "{:<8} {:>3} employees  net {}",
            bucket.label, bucket.count, bucket.net
        ));
    }
    lines
}
