//! Employee directory: searchable roster cards with status KPIs.

use super::filter::ALL;
use super::roster::EmployeeRecord;
use serde::{Deserialize, Serialize};

pub const ACTIVE: &str = "Active";
pub const ON_LEAVE: &str = "On Leave";

/// Status filter for the directory; `All` keeps everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, status: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "q")]
    pub query: Option<String>,
}

impl DirectoryQuery {
    fn status_filter(&self) -> StatusFilter {
        self.status
            .as_deref()
            .map(StatusFilter::parse)
            .unwrap_or_default()
    }

    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummary {
    pub total_employees: usize,
    pub active: usize,
    pub on_leave: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView {
    pub summary: DirectorySummary,
    pub employees: Vec<EmployeeRecord>,
}

fn searchable_fields(employee: &EmployeeRecord) -> [&str; 4] {
    [
        employee.first_name.as_deref().unwrap_or(""),
        employee.last_name.as_deref().unwrap_or(""),
        employee.department.as_deref().unwrap_or(""),
        employee.position.as_deref().unwrap_or(""),
    ]
}

pub fn summarize(employees: &[EmployeeRecord]) -> DirectorySummary {
    let count = |status: &str| {
        employees
            .iter()
            .filter(|employee| employee.status.as_deref() == Some(status))
            .count()
    };
    DirectorySummary {
        total_employees: employees.len(),
        active: count(ACTIVE),
        on_leave: count(ON_LEAVE),
    }
}

/// The roster as the Employees screen shows it.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScreen {
    employees: Vec<EmployeeRecord>,
}

impl DirectoryScreen {
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    pub fn replace(&mut self, employees: Vec<EmployeeRecord>) {
        self.employees = employees;
    }

    /// KPIs always describe the full roster; the card list honours the query.
    pub fn view(&self, query: &DirectoryQuery) -> DirectoryView {
        let status = query.status_filter();
        let needle = query.needle();
        let employees = self
            .employees
            .iter()
            .filter(|employee| status.matches(employee.status.as_deref()))
            .filter(|employee| match needle.as_deref() {
                None => true,
                Some(needle) => searchable_fields(employee)
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle)),
            })
            .cloned()
            .collect();

        DirectoryView {
            summary: summarize(&self.employees),
            employees,
        }
    }
}
