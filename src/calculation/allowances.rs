//! Allowance calculation functionality.
//!
//! Rice subsidy, phone allowance and clothing allowance are fixed monthly
//! amounts on the compensation profile. A monthly report pays them in full; a
//! weekly report pays each one divided by the configured weeks per month.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowancePayment, AuditStep, CompensationProfile, ReportingPeriod};

/// Allowance type for the rice subsidy.
pub const RICE_SUBSIDY: &str = "rice_subsidy";

/// Allowance type for the phone allowance.
pub const PHONE_ALLOWANCE: &str = "phone";

/// Allowance type for the clothing allowance.
pub const CLOTHING_ALLOWANCE: &str = "clothing";

/// The result of calculating allowances, including the payments and audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowancesResult {
    /// One payment per allowance with a non-zero monthly amount.
    pub allowances: Vec<AllowancePayment>,
    /// Sum of the payments.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the allowance payments for a reporting period.
///
/// Allowances with a zero monthly amount are omitted.
///
/// # Arguments
///
/// * `profile` - The compensation profile holding the monthly amounts
/// * `period` - The reporting period; weekly periods are pro-rated
/// * `weeks_per_month` - The divisor used for weekly periods (e.g., 4)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when `weeks_per_month` is zero
/// for a weekly period, or when the allowances sum past the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_allowances;
/// use payroll_engine::models::{CompensationProfile, ReportingPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     employee_id: "10001".to_string(),
///     hourly_rate: Decimal::from_str("535.71").unwrap(),
///     basic_salary: Decimal::from_str("90000").unwrap(),
///     rice_subsidy: Decimal::from_str("1500").unwrap(),
///     phone_allowance: Decimal::from_str("2000").unwrap(),
///     clothing_allowance: Decimal::from_str("1000").unwrap(),
/// };
/// let week = ReportingPeriod::Week {
///     start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
/// };
///
/// let result = compute_allowances(&profile, &week, Decimal::from(4), 1).unwrap();
/// assert_eq!(result.allowances.len(), 3);
/// assert_eq!(result.total, Decimal::from_str("1125").unwrap());
/// ```
pub fn compute_allowances(
    profile: &CompensationProfile,
    period: &ReportingPeriod,
    weeks_per_month: Decimal,
    step_number: u32,
) -> EngineResult<AllowancesResult> {
    let divisor = if period.is_weekly() {
        weeks_per_month
    } else {
        Decimal::ONE
    };

    let mut allowances: Vec<AllowancePayment> = Vec::new();
    for (allowance_type, description, monthly_amount) in [
        (RICE_SUBSIDY, "Rice subsidy", profile.rice_subsidy),
        (PHONE_ALLOWANCE, "Phone allowance", profile.phone_allowance),
        (CLOTHING_ALLOWANCE, "Clothing allowance", profile.clothing_allowance),
    ] {
        if monthly_amount <= Decimal::ZERO {
            continue;
        }
        let amount = monthly_amount
            .checked_div(divisor)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("cannot divide {} by {} weeks per month", allowance_type, divisor),
            })?;
        allowances.push(AllowancePayment {
            allowance_type: allowance_type.to_string(),
            description: description.to_string(),
            monthly_amount,
            amount,
        });
    }

    let total = allowances
        .iter()
        .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(a.amount))
        .ok_or_else(|| EngineError::overflow("total allowances"))?;
    let monthly_total = profile
        .monthly_allowances()
        .ok_or_else(|| EngineError::overflow("monthly allowances"))?;

    let reasoning = if allowances.is_empty() {
        "No allowances configured for this employee".to_string()
    } else if period.is_weekly() {
        format!(
            "Weekly period: monthly allowances ${} / {} weeks = ${}",
            monthly_total.normalize(),
            weeks_per_month.normalize(),
            total.normalize()
        )
    } else {
        format!(
            "Monthly period: allowances paid in full, ${}",
            total.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Allowances".to_string(),
        input: serde_json::json!({
            "employee_id": profile.employee_id,
            "period": period.label(),
            "rice_subsidy": profile.rice_subsidy.normalize().to_string(),
            "phone_allowance": profile.phone_allowance.normalize().to_string(),
            "clothing_allowance": profile.clothing_allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "divisor": divisor.normalize().to_string(),
            "total_allowances": total.normalize().to_string()
        }),
        reasoning,
    };

    Ok(AllowancesResult {
        allowances,
        total,
        audit_step,
    })
}
