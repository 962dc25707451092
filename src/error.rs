//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while turning attendance into pay.
//!
//! Data-quality problems in attendance (a missing punch, a clock-out before
//! clock-in) are deliberately *not* errors: they surface as warnings on the
//! [`PayrollReport`](crate::models::PayrollReport) so one bad day never aborts
//! a whole payroll run.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidCompensation {
///     employee_id: "10001".to_string(),
///     field: "hourly_rate".to_string(),
///     message: "must be greater than zero, got 0".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid compensation for employee '10001', field 'hourly_rate': must be greater than zero, got 0"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values (unsorted table, bad rate).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A compensation profile contained a value that cannot produce a sensible pay figure.
    #[error("Invalid compensation for employee '{employee_id}', field '{field}': {message}")]
    InvalidCompensation {
        /// The employee the profile belongs to.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of the violated constraint.
        message: String,
    },

    /// A reporting period was malformed.
    #[error("Invalid reporting period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// The error for a monetary amount that exceeds the decimal range.
    pub(crate) fn overflow(what: &str) -> Self {
        EngineError::CalculationError {
            message: format!("{} is too large to represent", what),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
