//! Gross pay calculation.
//!
//! Regular hours are paid at the hourly rate; overtime hours at the hourly
//! rate times the overtime multiplier.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of computing gross pay, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrossPayResult {
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes gross pay from summed hours.
///
/// # Arguments
///
/// * `regular_hours` - Summed regular hours for the period
/// * `overtime_hours` - Summed overtime hours for the period
/// * `hourly_rate` - The employee's hourly rate
/// * `overtime_multiplier` - The overtime premium (1.25 for time and a quarter)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when either hour figure is
/// negative, or when a pay amount exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_gross_pay;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = compute_gross_pay(
///     Decimal::from_str("8").unwrap(),
///     Decimal::from_str("2").unwrap(),
///     Decimal::from_str("100").unwrap(),
///     Decimal::from_str("1.25").unwrap(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.regular_pay, Decimal::from_str("800").unwrap());
/// assert_eq!(result.overtime_pay, Decimal::from_str("250").unwrap());
/// assert_eq!(result.gross_pay, Decimal::from_str("1050").unwrap());
/// ```
pub fn compute_gross_pay(
    regular_hours: Decimal,
    overtime_hours: Decimal,
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
    step_number: u32,
) -> EngineResult<GrossPayResult> {
    if regular_hours < Decimal::ZERO || overtime_hours < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!(
                "hours must not be negative (regular {}, overtime {})",
                regular_hours, overtime_hours
            ),
        });
    }

    let regular_pay = regular_hours
        .checked_mul(hourly_rate)
        .ok_or_else(|| EngineError::overflow("regular pay"))?;
    let overtime_rate = hourly_rate
        .checked_mul(overtime_multiplier)
        .ok_or_else(|| EngineError::overflow("overtime rate"))?;
    let overtime_pay = overtime_hours
        .checked_mul(overtime_rate)
        .ok_or_else(|| EngineError::overflow("overtime pay"))?;
    let gross_pay = regular_pay
        .checked_add(overtime_pay)
        .ok_or_else(|| EngineError::overflow("gross pay"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "overtime_multiplier": overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_pay": regular_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} regular hours x ${} = ${}; {} overtime hours x ${} ({} x {}) = ${}",
            regular_hours.normalize(),
            hourly_rate.normalize(),
            regular_pay.normalize(),
            overtime_hours.normalize(),
            overtime_rate.normalize(),
            hourly_rate.normalize(),
            overtime_multiplier.normalize(),
            overtime_pay.normalize()
        ),
    };

    Ok(GrossPayResult {
        regular_pay,
        overtime_pay,
        gross_pay,
        audit_step,
    })
}
