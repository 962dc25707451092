//! Payroll report models for the Payroll Engine.
//!
//! This module contains the [`PayrollReport`] type and its associated structures
//! that capture all outputs of a pay calculation: summed hours, gross pay, the
//! statutory deduction breakdown, allowances, net pay, data-quality warnings
//! and an audit trace.
//!
//! None of these types carry timestamps or generated identifiers, so a report
//! rebuilt from the same inputs compares equal to the original.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReportingPeriod;

/// Warning code for an attendance day excluded from pay.
pub const WARNING_MALFORMED_ATTENDANCE: &str = "MALFORMED_ATTENDANCE";

/// Warning code for a period with no attendance for the employee.
pub const WARNING_NO_ATTENDANCE: &str = "NO_ATTENDANCE";

/// The statutory deductions taken from one gross pay figure.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionBreakdown;
/// use rust_decimal::Decimal;
///
/// let none = DeductionBreakdown::zero();
/// assert_eq!(none.total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Social-insurance contribution.
    pub social_insurance: Decimal,
    /// Health-insurance contribution (employee share).
    pub health_insurance: Decimal,
    /// Housing-fund contribution.
    pub housing_fund: Decimal,
    /// Withholding tax on the taxable income.
    pub withholding_tax: Decimal,
    /// Gross pay net of the three contributions; the base for withholding tax.
    pub taxable_income: Decimal,
    /// Sum of the four deductions.
    pub total: Decimal,
}

impl DeductionBreakdown {
    /// A breakdown with every amount zero, used when there is nothing to deduct from.
    pub fn zero() -> Self {
        Self {
            social_insurance: Decimal::ZERO,
            health_insurance: Decimal::ZERO,
            housing_fund: Decimal::ZERO,
            withholding_tax: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Returns the sum of the three statutory contributions (excluding tax).
    pub fn contributions(&self) -> Decimal {
        self.social_insurance + self.health_insurance + self.housing_fund
    }
}

/// Represents an allowance payment.
///
/// Allowances are fixed monthly amounts; for weekly periods `amount` is the
/// pro-rated share of `monthly_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePayment {
    /// The type of allowance ("rice_subsidy", "phone", "clothing").
    #[serde(rename = "type")]
    pub allowance_type: String,
    /// A description of the allowance.
    pub description: String,
    /// The configured monthly amount.
    pub monthly_amount: Decimal,
    /// The amount paid for this period.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// A data-quality warning attached to a report.
///
/// Warnings never stop a calculation; they tell the caller that a figure was
/// computed from incomplete data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The attendance date the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<NaiveDate>,
}

/// How much of the requested period the report is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Every matching attendance day was usable.
    Complete,
    /// At least one matching attendance day was excluded as malformed.
    Incomplete,
    /// No attendance matched the employee and period; all figures are zero by absence.
    NoData,
}

/// The aggregate pay result for one employee over one reporting period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{
///     AuditTrace, DeductionBreakdown, PayrollReport, ReportStatus, ReportingPeriod,
/// };
/// use rust_decimal::Decimal;
///
/// let report = PayrollReport {
///     employee_id: "10001".to_string(),
///     period: ReportingPeriod::Month { year: 2024, month: 6 },
///     days_counted: 0,
///     days_excluded: 0,
///     regular_hours: Decimal::ZERO,
///     overtime_hours: Decimal::ZERO,
///     regular_pay: Decimal::ZERO,
///     overtime_pay: Decimal::ZERO,
///     gross_pay: Decimal::ZERO,
///     deductions: DeductionBreakdown::zero(),
///     allowances: vec![],
///     total_allowances: Decimal::ZERO,
///     net_pay: Decimal::ZERO,
///     status: ReportStatus::NoData,
///     warnings: vec![],
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(!report.has_data());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The employee the report is for.
    pub employee_id: String,
    /// The period the report covers.
    pub period: ReportingPeriod,
    /// Attendance days that contributed hours.
    pub days_counted: u32,
    /// Attendance days excluded as malformed.
    pub days_excluded: u32,
    /// Summed regular hours.
    pub regular_hours: Decimal,
    /// Summed overtime hours.
    pub overtime_hours: Decimal,
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours, including the premium.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// Statutory deductions taken from the gross pay.
    pub deductions: DeductionBreakdown,
    /// Allowance payments for the period.
    pub allowances: Vec<AllowancePayment>,
    /// Sum of the allowance payments.
    pub total_allowances: Decimal,
    /// Gross pay minus deductions plus allowances.
    pub net_pay: Decimal,
    /// Data completeness of the report.
    pub status: ReportStatus,
    /// Data-quality warnings.
    pub warnings: Vec<ReportWarning>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollReport {
    /// Returns false when no attendance backed the report.
    pub fn has_data(&self) -> bool {
        self.status != ReportStatus::NoData
    }

    /// Returns regular plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}

/// An employee whose report could not be built during a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    /// The employee whose report failed.
    pub employee_id: String,
    /// The error message.
    pub message: String,
}

/// Reports for many employees over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The period every report covers.
    pub period: ReportingPeriod,
    /// Successfully built reports, in profile order.
    pub reports: Vec<PayrollReport>,
    /// Employees whose report failed, in profile order.
    pub failures: Vec<RunFailure>,
}

impl PayrollRun {
    /// Returns the summed net pay of every report in the run, saturating at
    /// the decimal range.
    pub fn total_net_pay(&self) -> Decimal {
        self.reports
            .iter()
            .fold(Decimal::ZERO, |total, r| total.saturating_add(r.net_pay))
    }
}
