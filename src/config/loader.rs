//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{ContributionTables, WithholdingTaxSchedule};
use crate::error::{EngineError, EngineResult};

use super::types::{ContributionsFile, PayrollConfig, PayrollFile};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and hands out the resulting [`PayrollConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/motorph/
/// ├── payroll.yaml          # Metadata, shift policy and pay policy
/// ├── contributions.yaml    # Social insurance, health insurance, housing fund
/// └── withholding_tax.yaml  # Tax brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/motorph").unwrap();
/// println!("Loaded: {}", loader.metadata().name);
/// println!("Shift ends at {}", loader.config().shift_policy().shift_end);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/motorph")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded values are inconsistent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/motorph")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollFile>(&path.join("payroll.yaml"))?;
        let contributions = Self::load_yaml::<ContributionsFile>(&path.join("contributions.yaml"))?;
        let withholding_tax =
            Self::load_yaml::<WithholdingTaxSchedule>(&path.join("withholding_tax.yaml"))?;

        let tables = ContributionTables {
            social_insurance: contributions.social_insurance,
            health_insurance: contributions.health_insurance,
            housing_fund: contributions.housing_fund,
            withholding_tax,
        };
        let config = PayrollConfig::new(payroll.metadata, payroll.shift, payroll.pay, tables);

        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &super::PayrollMetadata {
        self.config.metadata()
    }
}
