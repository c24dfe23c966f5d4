//! Reconciliation and aggregation engine for the HR administration dashboard.
//!
//! The roster fetched from the HR backend is authoritative for membership. Sparse attendance
//! and payroll records are merged onto it so every employee shows up in every view, with
//! synthesized placeholder rows standing in for the records that do not exist yet.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod telemetry;
