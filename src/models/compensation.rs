//! Compensation profile model.
//!
//! This module defines the [`CompensationProfile`] struct holding the pay
//! figures the aggregator needs for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Per-employee pay figures supplied by the employee store.
///
/// `basic_salary` is a monthly reference figure used only for the
/// health-insurance contribution. The three allowances are fixed monthly
/// amounts, pro-rated by the aggregator for weekly periods.
///
/// # Example
///
/// ```
/// use payroll_engine::models::CompensationProfile;
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
/// assert!(profile.validate().is_ok());
/// assert_eq!(profile.monthly_allowances(), Decimal::from_str("4500").ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// The employee this profile belongs to.
    pub employee_id: String,
    /// Pay per regular hour.
    pub hourly_rate: Decimal,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly rice subsidy.
    #[serde(default)]
    pub rice_subsidy: Decimal,
    /// Monthly phone allowance.
    #[serde(default)]
    pub phone_allowance: Decimal,
    /// Monthly clothing allowance.
    #[serde(default)]
    pub clothing_allowance: Decimal,
}

impl CompensationProfile {
    /// Checks that the profile can produce a meaningful pay figure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCompensation`] naming the first offending
    /// field when the hourly rate is not positive, or the basic salary or any
    /// allowance is negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hourly_rate <= Decimal::ZERO {
            return Err(self.invalid(
                "hourly_rate",
                format!("must be greater than zero, got {}", self.hourly_rate),
            ));
        }

        let non_negative = [
            ("basic_salary", self.basic_salary),
            ("rice_subsidy", self.rice_subsidy),
            ("phone_allowance", self.phone_allowance),
            ("clothing_allowance", self.clothing_allowance),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(self.invalid(field, format!("must not be negative, got {}", value)));
            }
        }

        Ok(())
    }

    /// Returns the sum of the three monthly allowances, or `None` if it
    /// exceeds the decimal range.
    pub fn monthly_allowances(&self) -> Option<Decimal> {
        self.rice_subsidy
            .checked_add(self.phone_allowance)?
            .checked_add(self.clothing_allowance)
    }

    fn invalid(&self, field: &str, message: String) -> EngineError {
        EngineError::InvalidCompensation {
            employee_id: self.employee_id.clone(),
            field: field.to_string(),
            message,
        }
    }
}
