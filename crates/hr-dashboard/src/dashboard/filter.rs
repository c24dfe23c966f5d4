use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel selecting every department (or every status) instead of one.
pub const ALL: &str = "All";

/// The fields the text search looks at.
pub trait FilterableRow {
    fn subject(&self) -> &str;
    fn department(&self) -> &str;
    fn status_label(&self) -> &str;
}

/// Department selector: the `All` sentinel or one exact department name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == department,
        }
    }
}

impl From<DepartmentFilter> for String {
    fn from(value: DepartmentFilter) -> Self {
        match value {
            DepartmentFilter::All => ALL.to_string(),
            DepartmentFilter::Only(department) => department,
        }
    }
}

impl<'de> Deserialize<'de> for DepartmentFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Department and free-text criteria applied to reconciled rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    #[serde(default)]
    pub department: DepartmentFilter,
    #[serde(default, alias = "q")]
    pub query: Option<String>,
}

impl RowFilter {
    pub fn new(department: DepartmentFilter, query: impl Into<String>) -> Self {
        Self {
            department,
            query: Some(query.into()),
        }
    }

    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches<R: FilterableRow>(&self, row: &R) -> bool {
        self.matches_with(row, self.needle().as_deref())
    }

    fn matches_with<R: FilterableRow>(&self, row: &R, needle: Option<&str>) -> bool {
        if !self.department.matches(row.department()) {
            return false;
        }
        match needle {
            None => true,
            Some(needle) => [row.subject(), row.department(), row.status_label()]
                .iter()
                .any(|field| field.to_lowercase().contains(needle)),
        }
    }

    /// Keeps the rows passing both criteria, in their original order.
    pub fn apply<R: FilterableRow + Clone>(&self, rows: &[R]) -> Vec<R> {
        let needle = self.needle();
        rows.iter()
            .filter(|row| self.matches_with(*row, needle.as_deref()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, &'static str, &'static str);

    impl FilterableRow for Row {
        fn subject(&self) -> &str {
            self.0
        }

        fn department(&self) -> &str {
            self.1
        }

        fn status_label(&self) -> &str {
            self.2
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row("Ada Lovelace", "IT", "Present"),
            Row("Grace Hopper", "Ops", "Late"),
            Row("Alan Turing", "IT", "Absent"),
        ]
    }

    #[test]
    fn all_sentinel_and_blank_query_keep_everything() {
        let filter = RowFilter::new(DepartmentFilter::parse("All"), "   ");
        assert_eq!(filter.apply(&rows()), rows());
    }

    #[test]
    fn department_is_an_exact_match() {
        let filter = RowFilter::new(DepartmentFilter::parse("IT"), "");
        let names: Vec<_> = filter.apply(&rows()).into_iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);

        let partial = RowFilter::new(DepartmentFilter::parse("I"), "");
        assert!(partial.apply(&rows()).is_empty());
    }

    #[test]
    fn query_searches_name_department_and_status_case_insensitively() {
        let by_status = RowFilter::new(DepartmentFilter::All, " LATE ");
        assert_eq!(by_status.apply(&rows()), vec![rows()[1].clone()]);

        let by_department = RowFilter::new(DepartmentFilter::All, "ops");
        assert_eq!(by_department.apply(&rows()).len(), 1);

        let by_name = RowFilter::new(DepartmentFilter::All, "tur");
        assert_eq!(by_name.apply(&rows())[0].0, "Alan Turing");
    }

    #[test]
    fn criteria_compose_with_and() {
        let filter = RowFilter::new(DepartmentFilter::parse("IT"), "absent");
        assert_eq!(filter.apply(&rows()), vec![rows()[2].clone()]);

        let none = RowFilter::new(DepartmentFilter::parse("Ops"), "absent");
        assert!(none.apply(&rows()).is_empty());
    }

    #[test]
    fn deserializes_from_query_parameters() {
        let filter: RowFilter =
            serde_json::from_str(r#"{"department":"All","q":"ada"}"#).expect("valid filter");
        assert_eq!(filter.department, DepartmentFilter::All);
        assert!(filter.matches(&rows()[0]));
    }
}
