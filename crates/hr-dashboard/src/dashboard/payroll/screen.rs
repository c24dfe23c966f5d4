use super::super::domain::{RecordId, RecordIdentity};
use super::super::filter::RowFilter;
use super::super::roster::Roster;
use super::domain::{PayrollEntry, PayrollRow, PayrollStatus};
use super::reconcile::reconcile;
use super::report::{status_breakdown, summary_stats, PayrollStats, PayrollStatusBucket, Payslip};
use crate::backend::BackendError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollView {
    pub departments: Vec<String>,
    pub rows: Vec<PayrollRow>,
    pub stats: PayrollStats,
    pub status_breakdown: Vec<PayrollStatusBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStatusChange {
    pub id: RecordId,
    pub previous: PayrollStatus,
    pub next: PayrollStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum PayrollUpdateError {
    #[error("{placeholder} has no payroll record yet; set one up before changing its status")]
    NoBackingRecord { placeholder: String },
    #[error("payroll record {0} is not loaded")]
    RecordNotFound(RecordId),
    #[error("{0:?} is not a status a payroll can be moved to")]
    InvalidStatus(PayrollStatus),
    #[error("payroll status was not saved: {0}")]
    Backend(#[from] BackendError),
}

/// State behind the payroll screen.
#[derive(Debug, Clone, Default)]
pub struct PayrollScreen {
    roster: Roster,
    entries: Vec<PayrollEntry>,
}

impl PayrollScreen {
    pub fn new(roster: Roster, entries: Vec<PayrollEntry>) -> Self {
        Self { roster, entries }
    }

    pub fn replace(&mut self, roster: Roster, entries: Vec<PayrollEntry>) {
        self.roster = roster;
        self.entries = entries;
    }

    pub fn entries(&self) -> &[PayrollEntry] {
        &self.entries
    }

    pub fn rows(&self) -> Vec<PayrollRow> {
        reconcile(&self.roster, &self.entries)
    }

    /// Table rows honour the filter; cards and breakdown cover the whole roster.
    pub fn view(&self, filter: &RowFilter) -> PayrollView {
        let all_rows = self.rows();
        PayrollView {
            departments: self.roster.department_options(),
            rows: filter.apply(&all_rows),
            stats: summary_stats(&all_rows),
            status_breakdown: status_breakdown(&all_rows),
        }
    }

    /// Payslip for the row addressed by `identity`, synthetic rows included.
    pub fn payslip(&self, identity: &RecordIdentity) -> Option<Payslip> {
        self.rows()
            .iter()
            .find(|row| &row.identity == identity)
            .map(Payslip::for_row)
    }

    pub fn begin_status_change(
        &mut self,
        identity: &RecordIdentity,
        next: PayrollStatus,
    ) -> Result<PendingStatusChange, PayrollUpdateError> {
        if !matches!(next, PayrollStatus::Paid | PayrollStatus::Pending) {
            return Err(PayrollUpdateError::InvalidStatus(next));
        }
        let id = match identity {
            RecordIdentity::Persisted { id } => *id,
            RecordIdentity::Synthetic { placeholder } => {
                return Err(PayrollUpdateError::NoBackingRecord {
                    placeholder: placeholder.clone(),
                })
            }
        };

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(PayrollUpdateError::RecordNotFound(id))?;

        let pending = PendingStatusChange {
            id,
            previous: entry.status,
            next,
        };
        entry.status = next;
        Ok(pending)
    }

    pub fn revert_status_change(&mut self, pending: &PendingStatusChange) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == pending.id && entry.status == pending.next)
        {
            entry.status = pending.previous;
        }
    }
}
