//! Housing-fund contribution.
//!
//! A percentage of monthly gross pay: a lower rate up to a low-income
//! threshold and a standard rate above it, capped at a fixed maximum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The housing-fund contribution schedule.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::HousingFundSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = HousingFundSchedule::default();
/// assert_eq!(
///     schedule.contribution(Decimal::from_str("1000").unwrap()),
///     Decimal::from_str("10").unwrap()
/// );
/// assert_eq!(
///     schedule.contribution(Decimal::from_str("25000").unwrap()),
///     Decimal::from_str("100").unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingFundSchedule {
    /// Gross pay at or below this uses `low_income_rate`.
    pub low_income_threshold: Decimal,
    /// Rate at or below the threshold (0.01 for 1%).
    pub low_income_rate: Decimal,
    /// Rate above the threshold (0.02 for 2%).
    pub standard_rate: Decimal,
    /// Maximum contribution.
    pub cap: Decimal,
}

impl Default for HousingFundSchedule {
    fn default() -> Self {
        Self {
            low_income_threshold: Decimal::new(1_500, 0),
            low_income_rate: Decimal::new(1, 2),
            standard_rate: Decimal::new(2, 2),
            cap: Decimal::new(100, 0),
        }
    }
}

impl HousingFundSchedule {
    /// Computes the contribution for a monthly gross pay.
    pub fn contribution(&self, gross_monthly: Decimal) -> Decimal {
        let rate = if gross_monthly <= self.low_income_threshold {
            self.low_income_rate
        } else {
            self.standard_rate
        };
        (gross_monthly * rate).min(self.cap).max(Decimal::ZERO)
    }

    /// Checks rates and cap.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a rate is outside 0..=1 or the cap is negative.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, rate) in [
            ("low_income_rate", self.low_income_rate),
            ("standard_rate", self.standard_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("housing fund {} must be between 0 and 1, got {}", name, rate),
                });
            }
        }
        if self.cap < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!("housing fund cap must not be negative, got {}", self.cap),
            });
        }
        Ok(())
    }
}
