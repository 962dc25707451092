//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    ContributionTables, HealthInsuranceSchedule, HousingFundSchedule, ShiftPolicy,
    SocialInsuranceSchedule,
};
use crate::error::{EngineError, EngineResult};

/// Metadata about the payroll configuration.
///
/// Contains identifying information about the table set, such as the
/// organisation it was prepared for and the version of the statutory tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollMetadata {
    /// The human-readable name of the configuration.
    pub name: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// Where the statutory figures were taken from.
    #[serde(default)]
    pub source: String,
}

impl Default for PayrollMetadata {
    fn default() -> Self {
        Self {
            name: "Statutory payroll defaults".to_string(),
            version: "built-in".to_string(),
            source: String::new(),
        }
    }
}

/// Pay rules that apply on top of the shift policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Multiplier applied to the hourly rate for overtime hours.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Divisor turning monthly allowances into weekly ones.
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: Decimal,
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(125, 2)
}

fn default_weeks_per_month() -> Decimal {
    Decimal::new(4, 0)
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            overtime_multiplier: default_overtime_multiplier(),
            weeks_per_month: default_weeks_per_month(),
        }
    }
}

impl PayPolicy {
    /// Checks the multiplier and divisor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the overtime multiplier is
    /// below one or weeks per month is not positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.overtime_multiplier < Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "overtime multiplier must be at least 1, got {}",
                    self.overtime_multiplier
                ),
            });
        }
        if self.weeks_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "weeks per month must be greater than zero, got {}",
                    self.weeks_per_month
                ),
            });
        }
        Ok(())
    }
}

/// Structure of payroll.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollFile {
    /// Configuration metadata.
    pub metadata: PayrollMetadata,
    /// The working-day definition.
    pub shift: ShiftPolicy,
    /// Overtime and allowance rules.
    #[serde(default)]
    pub pay: PayPolicy,
}

/// Structure of contributions.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsFile {
    /// Social-insurance step table.
    pub social_insurance: SocialInsuranceSchedule,
    /// Health-insurance premium schedule.
    pub health_insurance: HealthInsuranceSchedule,
    /// Housing-fund schedule.
    pub housing_fund: HousingFundSchedule,
}

/// The complete payroll configuration.
///
/// This struct aggregates everything loaded from a configuration directory.
/// `PayrollConfig::default()` holds the compiled-in statutory values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollConfig {
    metadata: PayrollMetadata,
    shift: ShiftPolicy,
    pay: PayPolicy,
    tables: ContributionTables,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: PayrollMetadata,
        shift: ShiftPolicy,
        pay: PayPolicy,
        tables: ContributionTables,
    ) -> Self {
        Self {
            metadata,
            shift,
            pay,
            tables,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns the shift policy.
    pub fn shift_policy(&self) -> &ShiftPolicy {
        &self.shift
    }

    /// Returns the pay policy.
    pub fn pay_policy(&self) -> &PayPolicy {
        &self.pay
    }

    /// Returns the contribution and tax tables.
    pub fn tables(&self) -> &ContributionTables {
        &self.tables
    }

    /// Returns a copy of this configuration with a different pay policy.
    pub fn with_pay_policy(mut self, pay: PayPolicy) -> Self {
        self.pay = pay;
        self
    }

    /// Validates every part of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError::InvalidConfig`] found.
    pub fn validate(&self) -> EngineResult<()> {
        self.shift.validate()?;
        self.pay.validate()?;
        self.tables.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_config_validates() {
        assert!(PayrollConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_pay_policy() {
        let pay = PayPolicy::default();
        assert_eq!(pay.overtime_multiplier, dec("1.25"));
        assert_eq!(pay.weeks_per_month, dec("4"));
    }

    #[test]
    fn test_multiplier_below_one_rejected() {
        let pay = PayPolicy {
            overtime_multiplier: dec("0.9"),
            ..PayPolicy::default()
        };
        assert!(matches!(
            pay.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_weeks_per_month_rejected() {
        let config = PayrollConfig::default().with_pay_policy(PayPolicy {
            weeks_per_month: Decimal::ZERO,
            ..PayPolicy::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pay_section_defaults_when_fields_missing() {
        let pay: PayPolicy = serde_yaml::from_str("overtime_multiplier: \"1.5\"").unwrap();
        assert_eq!(pay.overtime_multiplier, dec("1.5"));
        assert_eq!(pay.weeks_per_month, dec("4"));
    }

    #[test]
    fn test_payroll_file_parses_shift_times() {
        let yaml = r#"
metadata:
  name: Test
  version: "1"
shift:
  shift_start: "09:00:00"
  grace_minutes: 5
  shift_end: "18:00:00"
  unpaid_break_minutes: 30
"#;
        let file: PayrollFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.shift.grace_minutes, 5);
        assert_eq!(file.shift.shift_end.to_string(), "18:00:00");
        assert_eq!(file.pay, PayPolicy::default());
        assert_eq!(file.metadata.source, "");
    }
}
