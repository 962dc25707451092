//! Calculation logic for the Payroll Engine.
//!
//! This module contains all the calculation functions for turning attendance
//! into pay: shift policy classification of each day's punches, gross pay,
//! the statutory contribution and withholding-tax tables, the deduction
//! sequence that applies them, allowances, the per-employee payroll report,
//! the parallel payroll run, and the monthly hours summary.

mod allowances;
mod contribution_tables;
mod deductions;
mod gross_pay;
mod health_insurance;
mod hours_summary;
mod housing_fund;
mod payroll;
mod shift_policy;
mod social_insurance;
mod withholding_tax;

pub use allowances::{
    AllowancesResult, CLOTHING_ALLOWANCE, PHONE_ALLOWANCE, RICE_SUBSIDY, compute_allowances,
};
pub use contribution_tables::ContributionTables;
pub use deductions::{DeductionResult, compute_deductions};
pub use gross_pay::{GrossPayResult, compute_gross_pay};
pub use health_insurance::HealthInsuranceSchedule;
pub use hours_summary::{MonthlyHoursSummary, summarize_monthly_hours};
pub use housing_fund::HousingFundSchedule;
pub use payroll::{build_payroll_report, build_payroll_run};
pub use shift_policy::{ShiftPolicy, ShiftPolicyResult, WorkDurations, compute_work_durations};
pub use social_insurance::{ContributionStep, SocialInsuranceSchedule};
pub use withholding_tax::{TaxBracket, WithholdingTaxSchedule};
