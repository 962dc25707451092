//! Health-insurance contribution.
//!
//! The monthly premium is a flat percentage of basic salary, split evenly
//! between employer and employee. The employee share has a floor for low basic
//! salaries and a ceiling for high ones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The health-insurance contribution schedule.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::HealthInsuranceSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = HealthInsuranceSchedule::default();
/// // 30,000 x 3% / 2
/// assert_eq!(
///     schedule.contribution(Decimal::from_str("30000").unwrap()),
///     Decimal::from_str("450").unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsuranceSchedule {
    /// Premium as a fraction of basic salary (0.03 for 3%).
    pub premium_rate: Decimal,
    /// Fraction of the premium paid by the employee (0.5 for half).
    pub employee_share: Decimal,
    /// Basic salaries at or below this pay `floor_contribution`.
    pub floor_salary: Decimal,
    /// Minimum employee contribution.
    pub floor_contribution: Decimal,
    /// Basic salaries at or above this pay `ceiling_contribution`.
    pub ceiling_salary: Decimal,
    /// Maximum employee contribution.
    pub ceiling_contribution: Decimal,
}

impl Default for HealthInsuranceSchedule {
    fn default() -> Self {
        Self {
            premium_rate: Decimal::new(3, 2),
            employee_share: Decimal::new(5, 1),
            floor_salary: Decimal::new(10_000, 0),
            floor_contribution: Decimal::new(150, 0),
            ceiling_salary: Decimal::new(60_000, 0),
            ceiling_contribution: Decimal::new(900, 0),
        }
    }
}

impl HealthInsuranceSchedule {
    /// Computes the employee contribution for a monthly basic salary.
    pub fn contribution(&self, basic_salary: Decimal) -> Decimal {
        if basic_salary <= self.floor_salary {
            self.floor_contribution
        } else if basic_salary >= self.ceiling_salary {
            self.ceiling_contribution
        } else {
            basic_salary * self.premium_rate * self.employee_share
        }
    }

    /// Checks rates and bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a rate is outside 0..=1,
    /// an amount is negative, or the floor salary is not below the ceiling salary.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, rate) in [
            ("premium_rate", self.premium_rate),
            ("employee_share", self.employee_share),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("health insurance {} must be between 0 and 1, got {}", name, rate),
                });
            }
        }
        if self.floor_contribution < Decimal::ZERO || self.ceiling_contribution < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "health insurance contributions must not be negative".to_string(),
            });
        }
        if self.floor_salary >= self.ceiling_salary {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "health insurance floor salary {} must be below ceiling salary {}",
                    self.floor_salary, self.ceiling_salary
                ),
            });
        }
        Ok(())
    }
}
