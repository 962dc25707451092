//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod compensation;
mod payroll_report;
mod reporting_period;

pub use attendance::{AttendanceAnomaly, AttendanceEvent};
pub use compensation::CompensationProfile;
pub use payroll_report::{
    AllowancePayment, AuditStep, AuditTrace, DeductionBreakdown, PayrollReport, PayrollRun,
    ReportStatus, ReportWarning, RunFailure, WARNING_MALFORMED_ATTENDANCE, WARNING_NO_ATTENDANCE,
};
pub use reporting_period::ReportingPeriod;
