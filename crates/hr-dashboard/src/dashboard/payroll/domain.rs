use super::super::domain::{EmployeeId, RecordId, RecordIdentity};
use super::super::filter::FilterableRow;
use super::super::roster::SubjectRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayrollStatus {
    Paid,
    Pending,
    /// No payroll has been set up for the employee.
    #[default]
    Unset,
    /// Any status string the dashboard does not know; it counts as unset.
    #[serde(other)]
    Unrecognized,
}

impl PayrollStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Paid, Self::Pending, Self::Unset]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Unset => "Unset",
            Self::Unrecognized => "Unknown",
        }
    }

    /// Bucket used for statistics.
    pub const fn bucket(self) -> Self {
        match self {
            Self::Unrecognized => Self::Unset,
            other => other,
        }
    }
}

/// A payroll line as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub id: RecordId,
    pub employee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub base: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub overtime: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub deductions: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net: Decimal,
    #[serde(default)]
    pub status: PayrollStatus,
}

impl SubjectRecord for PayrollEntry {
    fn subject_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    fn subject_name(&self) -> &str {
        &self.employee
    }
}

/// Accepts numbers, numeric strings and null; anything unparseable counts as zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(number)) => parse_amount(&number.to_string()),
        Some(Value::String(text)) => parse_amount(&text),
        _ => None,
    }
    .unwrap_or(Decimal::ZERO))
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// A roster member's payroll, real or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRow {
    pub identity: RecordIdentity,
    pub employee_id: EmployeeId,
    pub employee: String,
    pub department: String,
    pub base: Decimal,
    pub overtime: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
    pub status: PayrollStatus,
}

impl PayrollRow {
    pub fn key(&self) -> String {
        self.identity.key()
    }
}

impl FilterableRow for PayrollRow {
    fn subject(&self) -> &str {
        &self.employee
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }
}
