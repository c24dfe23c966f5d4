use super::domain::AttendanceRow;
use chrono::NaiveDate;
use std::io::Write;

const HEADERS: [&str; 7] = [
    "Employee",
    "Department",
    "Date",
    "CheckIn",
    "CheckOut",
    "Status",
    "MinutesLate",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write attendance CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush attendance CSV: {0}")]
    Io(#[from] std::io::Error),
}

pub fn export_file_name(target: NaiveDate) -> String {
    format!("attendance_export_{}.csv", target.format("%Y-%m-%d"))
}

/// Writes the rows exactly as the table shows them, every cell quoted.
pub fn write_csv<W: Write>(rows: &[AttendanceRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for row in rows {
        let minutes_late = row.minutes_late.to_string();
        csv_writer.write_record([
            row.employee.as_str(),
            row.department.as_str(),
            row.date.as_str(),
            row.check_in_label(),
            row.check_out_label(),
            row.status.label(),
            minutes_late.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[AttendanceRow]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
