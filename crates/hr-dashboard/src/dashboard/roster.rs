use super::domain::{normalize_name, EmployeeId};
use super::filter::ALL;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Employee row as served by the backend's `/employees` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl EmployeeRecord {
    /// First and last name joined by a space, the form records use to name their subject.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        format!("{first} {last}").trim().to_string()
    }
}

/// A roster member as seen by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntity {
    pub id: EmployeeId,
    pub full_name: String,
    pub department: String,
}

impl From<&EmployeeRecord> for RosterEntity {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name(),
            department: record.department.clone().unwrap_or_default(),
        }
    }
}

/// Anything that names the roster member it belongs to.
pub trait SubjectRecord {
    fn subject_id(&self) -> Option<EmployeeId>;
    fn subject_name(&self) -> &str;
}

/// Which record wins when several resolve to the same roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DuplicatePolicy {
    KeepFirst,
    KeepLast,
}

#[derive(Debug, Clone, Copy)]
enum NameSlot {
    Unique(usize),
    Ambiguous,
}

/// The authoritative, ordered list of employees with lookup indexes for record matching.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Vec<RosterEntity>,
    by_id: HashMap<EmployeeId, usize>,
    by_name: HashMap<String, NameSlot>,
}

impl Roster {
    pub fn new(members: Vec<RosterEntity>) -> Self {
        let mut by_id = HashMap::with_capacity(members.len());
        let mut by_name: HashMap<String, NameSlot> = HashMap::with_capacity(members.len());

        for (position, member) in members.iter().enumerate() {
            by_id.entry(member.id).or_insert(position);
            by_name
                .entry(normalize_name(&member.full_name))
                .and_modify(|slot| *slot = NameSlot::Ambiguous)
                .or_insert(NameSlot::Unique(position));
        }

        Self {
            members,
            by_id,
            by_name,
        }
    }

    pub fn from_employees(employees: &[EmployeeRecord]) -> Self {
        Self::new(employees.iter().map(RosterEntity::from).collect())
    }

    pub fn members(&self) -> &[RosterEntity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&RosterEntity> {
        self.by_id.get(&id).map(|position| &self.members[*position])
    }

    /// `All` followed by the distinct, non-blank departments in alphabetical order.
    pub fn department_options(&self) -> Vec<String> {
        let departments: BTreeSet<&str> = self
            .members
            .iter()
            .map(|member| member.department.trim())
            .filter(|department| !department.is_empty())
            .collect();

        std::iter::once(ALL.to_string())
            .chain(departments.into_iter().map(str::to_string))
            .collect()
    }

    /// Roster position a record belongs to.
    ///
    /// A foreign key decides on its own when present. Otherwise the normalized name is used,
    /// but only when exactly one roster member carries it.
    pub fn resolve<R: SubjectRecord + ?Sized>(&self, record: &R) -> Option<usize> {
        if let Some(id) = record.subject_id() {
            return self.by_id.get(&id).copied();
        }

        match self.by_name.get(&normalize_name(record.subject_name())) {
            Some(NameSlot::Unique(position)) => Some(*position),
            Some(NameSlot::Ambiguous) => {
                debug!(
                    subject = record.subject_name(),
                    "record names an ambiguous roster member; leaving it unmatched"
                );
                None
            }
            None => None,
        }
    }

    /// Assigns records to roster positions.
    pub(crate) fn index_records<'a, R, I>(
        &self,
        records: I,
        policy: DuplicatePolicy,
    ) -> HashMap<usize, &'a R>
    where
        R: SubjectRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut index = HashMap::new();
        for record in records {
            let Some(position) = self.resolve(record) else {
                debug!(
                    subject = record.subject_name(),
                    "record has no roster member; skipping"
                );
                continue;
            };
            match policy {
                DuplicatePolicy::KeepFirst => {
                    index.entry(position).or_insert(record);
                }
                DuplicatePolicy::KeepLast => {
                    index.insert(position, record);
                }
            }
        }
        index
    }
}
