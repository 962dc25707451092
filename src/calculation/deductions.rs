//! Statutory deduction calculation.
//!
//! This module composes the contribution and tax tables against one gross pay
//! figure. The order is load-bearing: the three contributions are computed
//! first, and withholding tax is computed on gross pay *net of* those
//! contributions.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeductionBreakdown};

use super::contribution_tables::ContributionTables;

/// The result of computing statutory deductions, including the audit steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionResult {
    /// The four deductions, taxable income and total.
    pub breakdown: DeductionBreakdown,
    /// The audit steps recording this calculation (contributions, then tax).
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the statutory deductions for a gross pay figure.
///
/// 1. Social-insurance and housing-fund contributions are looked up from
///    `gross_pay`; the health-insurance contribution from `basic_salary`.
/// 2. Taxable income is `gross_pay` minus the three contributions.
/// 3. Withholding tax is computed on the taxable income.
/// 4. The total is the sum of all four.
///
/// # Arguments
///
/// * `gross_pay` - Gross pay for the period
/// * `basic_salary` - Monthly basic salary (health insurance only)
/// * `tables` - The statutory tables
/// * `start_step_number` - The starting step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when a sum falls outside the
/// decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compute_deductions, ContributionTables};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = compute_deductions(
///     Decimal::from_str("50000").unwrap(),
///     Decimal::from_str("50000").unwrap(),
///     &ContributionTables::default(),
///     1,
/// )
/// .unwrap();
///
/// let breakdown = result.breakdown;
/// assert_eq!(breakdown.social_insurance, Decimal::from_str("1125").unwrap());
/// assert_eq!(breakdown.health_insurance, Decimal::from_str("750").unwrap());
/// assert_eq!(breakdown.housing_fund, Decimal::from_str("100").unwrap());
/// assert_eq!(breakdown.taxable_income, Decimal::from_str("48025").unwrap());
/// ```
pub fn compute_deductions(
    gross_pay: Decimal,
    basic_salary: Decimal,
    tables: &ContributionTables,
    start_step_number: u32,
) -> EngineResult<DeductionResult> {
    let social_insurance = tables.social_insurance.contribution(gross_pay);
    let health_insurance = tables.health_insurance.contribution(basic_salary);
    let housing_fund = tables.housing_fund.contribution(gross_pay);
    let contributions = social_insurance
        .checked_add(health_insurance)
        .and_then(|sum| sum.checked_add(housing_fund))
        .ok_or_else(|| EngineError::overflow("statutory contributions"))?;

    let taxable_income = gross_pay
        .checked_sub(contributions)
        .ok_or_else(|| EngineError::overflow("taxable income"))?;
    let withholding_tax = tables.withholding_tax.tax(taxable_income);
    let total = contributions
        .checked_add(withholding_tax)
        .ok_or_else(|| EngineError::overflow("total deductions"))?;

    let contributions_step = AuditStep {
        step_number: start_step_number,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "basic_salary": basic_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_insurance": social_insurance.normalize().to_string(),
            "health_insurance": health_insurance.normalize().to_string(),
            "housing_fund": housing_fund.normalize().to_string(),
            "contributions": contributions.normalize().to_string()
        }),
        reasoning: format!(
            "Social insurance ${} and housing fund ${} from gross ${}; health insurance ${} from basic salary ${}",
            social_insurance.normalize(),
            housing_fund.normalize(),
            gross_pay.normalize(),
            health_insurance.normalize(),
            basic_salary.normalize()
        ),
    };

    let tax_reasoning = match tables.withholding_tax.bracket_for(taxable_income) {
        Some(bracket) => format!(
            "Taxable income ${} = ${} - ${} contributions; ${} + {}% of excess over ${} = ${}",
            taxable_income.normalize(),
            gross_pay.normalize(),
            contributions.normalize(),
            bracket.base.normalize(),
            (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
            bracket.excess_over.normalize(),
            withholding_tax.normalize()
        ),
        None => format!(
            "Taxable income ${} = ${} - ${} contributions is within the ${} exemption; no tax",
            taxable_income.normalize(),
            gross_pay.normalize(),
            contributions.normalize(),
            tables.withholding_tax.exempt_up_to.normalize()
        ),
    };

    let tax_step = AuditStep {
        step_number: start_step_number + 1,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "contributions": contributions.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "withholding_tax": withholding_tax.normalize().to_string(),
            "total_deductions": total.normalize().to_string()
        }),
        reasoning: tax_reasoning,
    };

    Ok(DeductionResult {
        breakdown: DeductionBreakdown {
            social_insurance,
            health_insurance,
            housing_fund,
            withholding_tax,
            taxable_income,
            total,
        },
        audit_steps: vec![contributions_step, tax_step],
    })
}
