//! Progressive withholding-tax schedule.
//!
//! Tax is computed on taxable income (gross pay net of statutory
//! contributions). Each bracket carries a literal base amount rather than one
//! derived from the brackets below it, because the statutory schedule is not
//! continuous at its seams.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Built-in brackets as `(from, base, rate in percent, excess over)`; amounts in cents.
const STATUTORY_BRACKETS: [(i64, i64, i64, i64); 5] = [
    (20_832_00, 0, 20, 20_832_00),
    (33_333_00, 2_500_00, 25, 33_333_00),
    (66_667_00, 10_833_00, 30, 66_667_00),
    (166_667_00, 40_833_33, 32, 166_667_00),
    (666_667_00, 200_833_33, 35, 666_667_00),
];

/// Taxable income at or below this is not taxed, in cents.
const STATUTORY_EXEMPT_UP_TO_CENTS: i64 = 20_832_00;

/// One bracket of the withholding-tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Incomes from this amount upward use this bracket (until the next bracket).
    pub from: Decimal,
    /// Fixed tax for income reaching this bracket.
    pub base: Decimal,
    /// Marginal rate on the excess (0.20 for 20%).
    pub rate: Decimal,
    /// The excess is measured from this amount.
    pub excess_over: Decimal,
}

/// The withholding-tax schedule.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::WithholdingTaxSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = WithholdingTaxSchedule::default();
/// assert_eq!(schedule.tax(Decimal::from_str("20832").unwrap()), Decimal::ZERO);
/// assert!(schedule.tax(Decimal::from_str("20833").unwrap()) > Decimal::ZERO);
/// // 2,500 + 25% of 6,667
/// assert_eq!(
///     schedule.tax(Decimal::from_str("40000").unwrap()),
///     Decimal::from_str("4166.75").unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTaxSchedule {
    /// Income at or below this is exempt.
    pub exempt_up_to: Decimal,
    /// Brackets in ascending `from` order.
    pub brackets: Vec<TaxBracket>,
}

impl Default for WithholdingTaxSchedule {
    fn default() -> Self {
        Self {
            exempt_up_to: Decimal::new(STATUTORY_EXEMPT_UP_TO_CENTS, 2),
            brackets: STATUTORY_BRACKETS
                .iter()
                .map(|&(from, base, rate_percent, excess_over)| TaxBracket {
                    from: Decimal::new(from, 2),
                    base: Decimal::new(base, 2),
                    rate: Decimal::new(rate_percent, 2),
                    excess_over: Decimal::new(excess_over, 2),
                })
                .collect(),
        }
    }
}

impl WithholdingTaxSchedule {
    /// Returns the bracket that applies to a taxable income, if any.
    pub fn bracket_for(&self, taxable_income: Decimal) -> Option<&TaxBracket> {
        if taxable_income <= self.exempt_up_to {
            return None;
        }
        self.brackets
            .iter()
            .rev()
            .find(|bracket| bracket.from <= taxable_income)
    }

    /// Computes the withholding tax on a taxable income. Never negative.
    pub fn tax(&self, taxable_income: Decimal) -> Decimal {
        self.bracket_for(taxable_income)
            .map(|bracket| bracket.base + (taxable_income - bracket.excess_over) * bracket.rate)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    /// Checks bracket order and rates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when brackets are not strictly
    /// ascending, a rate is outside 0..=1, or a base is negative.
    pub fn validate(&self) -> EngineResult<()> {
        for pair in self.brackets.windows(2) {
            if pair[1].from <= pair[0].from {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "withholding tax brackets must be strictly ascending ({} after {})",
                        pair[1].from, pair[0].from
                    ),
                });
            }
        }
        for bracket in &self.brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "withholding tax rate for bracket from {} must be between 0 and 1, got {}",
                        bracket.from, bracket.rate
                    ),
                });
            }
            if bracket.base < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "withholding tax base for bracket from {} must not be negative",
                        bracket.from
                    ),
                });
            }
        }
        Ok(())
    }
}
