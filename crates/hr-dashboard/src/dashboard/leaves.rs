//! Leave requests awaiting an HR decision.

use super::domain::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unrecognized,
}

impl LeaveStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unrecognized => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// A decision HR can take on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => Self::Approved,
            LeaveDecision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RecordId,
    #[serde(default)]
    pub employee: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, rename = "type")]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveStatusCount {
    pub status: LeaveStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveView {
    pub status: LeaveStatus,
    pub counts: Vec<LeaveStatusCount>,
    pub requests: Vec<LeaveRequest>,
}

/// Leave requests as the permissions screen shows them.
///
/// Decisions are applied only after the backend has stored them.
#[derive(Debug, Clone, Default)]
pub struct LeaveQueue {
    requests: Vec<LeaveRequest>,
}

impl LeaveQueue {
    pub fn new(requests: Vec<LeaveRequest>) -> Self {
        Self { requests }
    }

    pub fn replace(&mut self, requests: Vec<LeaveRequest>) {
        self.requests = requests;
    }

    pub fn get(&self, id: RecordId) -> Option<&LeaveRequest> {
        self.requests.iter().find(|request| request.id == id)
    }

    pub fn view(&self, status: LeaveStatus) -> LeaveView {
        let counts = LeaveStatus::ordered()
            .into_iter()
            .map(|status| LeaveStatusCount {
                status,
                count: self
                    .requests
                    .iter()
                    .filter(|request| request.status == status)
                    .count(),
            })
            .collect();

        LeaveView {
            status,
            counts,
            requests: self
                .requests
                .iter()
                .filter(|request| request.status == status)
                .cloned()
                .collect(),
        }
    }

    /// Records a decision the backend accepted. Returns `false` for unknown ids.
    pub fn apply_decision(&mut self, id: RecordId, decision: LeaveDecision) -> bool {
        match self.requests.iter_mut().find(|request| request.id == id) {
            Some(request) => {
                request.status = decision.into();
                true
            }
            None => false,
        }
    }
}
