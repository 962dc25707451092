//! Social-insurance contribution table.
//!
//! The contribution is a step function of monthly gross pay. The table is held
//! as data (ascending salary breakpoints, each with a fixed contribution) and
//! consulted in order: the first breakpoint strictly greater than the salary
//! wins. Salaries at or above the last breakpoint pay the ceiling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Built-in schedule as `(salary below, contribution)` pairs in cents.
///
/// Breakpoints rise by 500.00 from 3,250.00; contributions rise by 22.50.
const STATUTORY_STEPS_CENTS: [(i64, i64); 44] = [
    (3_250_00, 135_00),
    (3_750_00, 157_50),
    (4_250_00, 180_00),
    (4_750_00, 202_50),
    (5_250_00, 225_00),
    (5_750_00, 247_50),
    (6_250_00, 270_00),
    (6_750_00, 292_50),
    (7_250_00, 315_00),
    (7_750_00, 337_50),
    (8_250_00, 360_00),
    (8_750_00, 382_50),
    (9_250_00, 405_00),
    (9_750_00, 427_50),
    (10_250_00, 450_00),
    (10_750_00, 472_50),
    (11_250_00, 495_00),
    (11_750_00, 517_50),
    (12_250_00, 540_00),
    (12_750_00, 562_50),
    (13_250_00, 585_00),
    (13_750_00, 607_50),
    (14_250_00, 630_00),
    (14_750_00, 652_50),
    (15_250_00, 675_00),
    (15_750_00, 697_50),
    (16_250_00, 720_00),
    (16_750_00, 742_50),
    (17_250_00, 765_00),
    (17_750_00, 787_50),
    (18_250_00, 810_00),
    (18_750_00, 832_50),
    (19_250_00, 855_00),
    (19_750_00, 877_50),
    (20_250_00, 900_00),
    (20_750_00, 922_50),
    (21_250_00, 945_00),
    (21_750_00, 967_50),
    (22_250_00, 990_00),
    (22_750_00, 1_012_50),
    (23_250_00, 1_035_00),
    (23_750_00, 1_057_50),
    (24_250_00, 1_080_00),
    (24_750_00, 1_102_50),
];

/// Contribution for salaries at or above the last breakpoint, in cents.
const STATUTORY_CEILING_CENTS: i64 = 1_125_00;

/// One row of the social-insurance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStep {
    /// Salaries strictly below this amount use this row.
    pub below: Decimal,
    /// The contribution for this row.
    pub contribution: Decimal,
}

/// The social-insurance contribution schedule.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::SocialInsuranceSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = SocialInsuranceSchedule::default();
/// assert_eq!(
///     schedule.contribution(Decimal::from_str("3249.99").unwrap()),
///     Decimal::from_str("135.00").unwrap()
/// );
/// assert_eq!(
///     schedule.contribution(Decimal::from_str("24750").unwrap()),
///     Decimal::from_str("1125.00").unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceSchedule {
    /// Rows in ascending breakpoint order.
    pub steps: Vec<ContributionStep>,
    /// Contribution once the salary reaches the last breakpoint.
    pub ceiling_contribution: Decimal,
}

impl Default for SocialInsuranceSchedule {
    fn default() -> Self {
        Self {
            steps: STATUTORY_STEPS_CENTS
                .iter()
                .map(|&(below, contribution)| ContributionStep {
                    below: Decimal::new(below, 2),
                    contribution: Decimal::new(contribution, 2),
                })
                .collect(),
            ceiling_contribution: Decimal::new(STATUTORY_CEILING_CENTS, 2),
        }
    }
}

impl SocialInsuranceSchedule {
    /// Looks up the contribution for a monthly gross salary.
    pub fn contribution(&self, gross_monthly: Decimal) -> Decimal {
        self.steps
            .iter()
            .find(|step| gross_monthly < step.below)
            .map(|step| step.contribution)
            .unwrap_or(self.ceiling_contribution)
    }

    /// Checks that breakpoints ascend strictly and amounts are non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] describing the first bad row.
    pub fn validate(&self) -> EngineResult<()> {
        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1].below <= pair[0].below {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "social insurance breakpoints must be strictly ascending (row {}: {} after {})",
                        index + 1,
                        pair[1].below,
                        pair[0].below
                    ),
                });
            }
        }
        let negative = self
            .steps
            .iter()
            .any(|step| step.contribution < Decimal::ZERO)
            || self.ceiling_contribution < Decimal::ZERO;
        if negative {
            return Err(EngineError::InvalidConfig {
                message: "social insurance contributions must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
