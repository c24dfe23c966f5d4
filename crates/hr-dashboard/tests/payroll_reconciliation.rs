//! Payroll reconciliation, totals and payslips over backend-shaped JSON payloads.

use hr_dashboard::dashboard::payroll::{
    reconcile, status_breakdown, summary_stats, PayrollEntry, PayrollStatus, Payslip,
};
use hr_dashboard::dashboard::{EmployeeRecord, RecordId, Roster};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn roster() -> Roster {
    let employees: Vec<EmployeeRecord> = serde_json::from_str(
        r#"[
            {"id": 1, "first_name": "Ada", "last_name": "Lovelace", "department": "Engineering"},
            {"id": 2, "first_name": "Alan", "last_name": "Turing", "department": "Research"},
            {"id": 3, "first_name": "Grace", "last_name": "Hopper", "department": "Engineering"},
            {"id": 4, "first_name": "Alan", "last_name": "Turing", "department": "Finance"}
        ]"#,
    )
    .expect("roster payload");
    Roster::from_employees(&employees)
}

fn payrolls() -> Vec<PayrollEntry> {
    serde_json::from_str(
        r#"[
            {"id": 10, "employee": "Ada Lovelace", "base": 5000, "overtime": "250.50",
             "deductions": 750, "net": 4500.5, "status": "Paid", "department": "Old Dept"},
            {"id": 11, "employee": "ada  lovelace", "base": 1, "net": 1, "status": "Pending"},
            {"id": 12, "employee": "Alan Turing", "base": 4000, "net": 3600, "status": "Pending"},
            {"id": 13, "employee": "Whoever", "employee_id": 3, "base": 3000, "net": "2800",
             "status": "Frozen"}
        ]"#,
    )
    .expect("payroll payload")
}

#[test]
fn reconciled_rows_follow_the_roster() {
    let rows = reconcile(&roster(), &payrolls());
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].identity.record_id(), Some(RecordId(10)));
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(rows[0].overtime, dec!(250.50));

    // two roster members share the name, so the name alone cannot place the line
    assert!(rows[1].identity.is_synthetic());
    assert!(rows[3].identity.is_synthetic());

    assert_eq!(rows[2].identity.record_id(), Some(RecordId(13)));
    assert_eq!(rows[2].status, PayrollStatus::Unrecognized);
}

#[test]
fn synthetic_rows_are_unset_and_zeroed() {
    for row in reconcile(&roster(), &payrolls())
        .iter()
        .filter(|row| row.identity.is_synthetic())
    {
        assert_eq!(row.status, PayrollStatus::Unset);
        assert_eq!(row.base, Decimal::ZERO);
        assert_eq!(row.overtime, Decimal::ZERO);
        assert_eq!(row.deductions, Decimal::ZERO);
        assert_eq!(row.net, Decimal::ZERO);
    }
}

#[test]
fn totals_cover_the_reconciled_roster() {
    let rows = reconcile(&roster(), &payrolls());
    let stats = summary_stats(&rows);

    assert_eq!(stats.total_employees, 4);
    assert_eq!(stats.total_payroll, dec!(7300.5));
    assert_eq!(stats.paid, 1);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.unset, 3);
    assert_eq!(stats.paid + stats.pending + stats.unset, stats.total_employees);

    let breakdown = status_breakdown(&rows);
    assert_eq!(breakdown[0].net, dec!(4500.5));
    assert_eq!(breakdown[2].count, 3);
}

#[test]
fn payslip_lines_for_a_paid_row() {
    let rows = reconcile(&roster(), &payrolls());
    let slip = Payslip::for_row(&rows[0]);
    let lines: Vec<_> = slip
        .lines
        .iter()
        .map(|line| (line.description, line.amount))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("Base Salary", dec!(5000)),
            ("Overtime", dec!(250.50)),
            ("Deductions", dec!(-750)),
            ("Net Salary", dec!(4500.5)),
        ]
    );
}
